//! Owned topic trees built outside the engine, and their adoption into a sheet.

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::arena::ResourceIndex;
use crate::domain::id::TopicId;
use crate::domain::structure::StructureClass;

/// A detached topic tree, e.g. produced by a deserializer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicDraft {
    pub id: Option<TopicId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_class: Option<StructureClass>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TopicDraft>,
}

impl TopicDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: TopicId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_child(mut self, child: TopicDraft) -> Self {
        self.children.push(child);
        self
    }

    /// Number of topics in this draft, itself included.
    pub fn topic_count(&self) -> usize {
        1 + self.children.iter().map(TopicDraft::topic_count).sum::<usize>()
    }
}

impl ResourceIndex {
    /// Appends `draft` under `at`, registering every node.
    ///
    /// Nodes without an id, or with one already taken, get a fresh id. Returns
    /// the slot of the grafted draft root, `None` if `at` is the document root
    /// or freed.
    #[instrument(level = "debug", skip(self, draft), fields(title = %draft.title))]
    pub(super) fn graft(&mut self, at: Index, draft: TopicDraft) -> Option<Index> {
        if self.get_node(at)?.parent.is_none() {
            debug!("cannot graft onto the document root");
            return None;
        }

        let mut grafted = None;
        let mut stack = vec![(draft, at)];
        while let Some((draft, parent)) = stack.pop() {
            let id = match draft.id {
                Some(id) if !self.ids.contains_key(&id) => id,
                Some(id) => {
                    warn!(%id, "draft id already registered, assigning a fresh one");
                    self.allocate_id()
                }
                None => self.allocate_id(),
            };
            if draft.structure_class.is_some() {
                debug!("structure class on a non-central draft topic is dropped");
            }
            let idx = self.insert_node(id, draft.title, Some(parent));
            if let Some(node) = self.get_node_mut(parent) {
                node.children.push(idx);
            }
            grafted.get_or_insert(idx);

            // Reverse so siblings are popped, and therefore appended, in order
            for child in draft.children.into_iter().rev() {
                stack.push((child, idx));
            }
        }
        grafted
    }

    /// Owned copy of the subtree at `at`.
    pub fn export(&self, at: Index) -> Option<TopicDraft> {
        let node = self.get_node(at)?;
        Some(TopicDraft {
            id: Some(node.id.clone()),
            title: node.title.clone(),
            structure_class: node.structure_class,
            children: node
                .children
                .iter()
                .filter_map(|&child| self.export(child))
                .collect(),
        })
    }
}
