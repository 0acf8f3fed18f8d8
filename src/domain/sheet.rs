//! Sheet creation and sheet-level updates.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::config::Settings;
use crate::domain::arena::ResourceIndex;
use crate::domain::id::{IdSource, UuidIdSource};
use crate::domain::structure::StructureClass;
use crate::domain::topic::Topic;

/// Optional parameters of [`new_sheet_with`].
pub struct SheetOptions {
    pub structure_class: StructureClass,
    pub auto_title_prefix: String,
    pub id_source: Box<dyn IdSource>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            structure_class: StructureClass::default(),
            auto_title_prefix: "Topic ".to_string(),
            id_source: Box::new(UuidIdSource),
        }
    }
}

impl fmt::Debug for SheetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetOptions")
            .field("structure_class", &self.structure_class)
            .field("auto_title_prefix", &self.auto_title_prefix)
            .finish_non_exhaustive()
    }
}

impl SheetOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            structure_class: settings.structure_class,
            auto_title_prefix: settings.auto_title_prefix.clone(),
            id_source: settings.id_source.build(),
        }
    }

    pub fn with_structure_class(mut self, structure_class: StructureClass) -> Self {
        self.structure_class = structure_class;
        self
    }

    pub fn with_id_source(mut self, id_source: impl IdSource + 'static) -> Self {
        self.id_source = Box::new(id_source);
        self
    }
}

/// Creates a sheet and returns its central topic.
pub fn new_sheet(sheet_title: &str, central_title: &str) -> Topic {
    new_sheet_with(sheet_title, central_title, SheetOptions::default())
}

#[instrument(level = "debug")]
pub fn new_sheet_with(sheet_title: &str, central_title: &str, options: SheetOptions) -> Topic {
    let index = ResourceIndex::new(
        sheet_title,
        central_title,
        options.structure_class,
        options.id_source,
        options.auto_title_prefix,
    );
    let center = index.center();
    debug!("sheet created");
    Topic::new(Rc::new(RefCell::new(index)), center)
}

impl ResourceIndex {
    /// Renames the sheet and its central topic, optionally changing the layout.
    #[instrument(level = "debug", skip(self))]
    pub(super) fn update_sheet(
        &mut self,
        sheet_title: &str,
        central_title: &str,
        structure_class: Option<StructureClass>,
    ) {
        let root = self.root();
        let center = self.center();
        if let Some(node) = self.get_node_mut(root) {
            node.title = sheet_title.to_string();
        }
        if let Some(node) = self.get_node_mut(center) {
            node.title = central_title.to_string();
            if structure_class.is_some() {
                node.structure_class = structure_class;
            }
        }
    }
}
