//! In-memory mind-map tree: one sheet, one central topic and any number of
//! descendant topics, edited through cursor-style [`Topic`] handles.
//!
//! Every edit degrades instead of failing: unknown keys fall back to the
//! last-focused topic, invalid structural requests are no-ops.

pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod util;

pub use config::Settings;
pub use domain::{
    new_sheet, new_sheet_with, AddMode, IdSource, SequentialIdSource, SheetOptions,
    StructureClass, Topic, TopicDraft, TopicId, TopicKey, UuidIdSource,
};
pub use errors::{SheetError, SheetResult};
pub use tree_traits::TopicTreeConvert;
