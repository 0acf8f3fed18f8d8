//! Domain layer: the mind-map tree and its editing engine
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod id;
mod lookup;
pub mod mutation;
mod navigation;
pub mod sheet;
pub mod structure;
pub mod topic;

pub use arena::{ResourceIndex, TopicNode};
pub use builder::TopicDraft;
pub use id::{IdSource, SequentialIdSource, TopicId, TopicKey, UuidIdSource};
pub use mutation::AddMode;
pub use sheet::{new_sheet, new_sheet_with, SheetOptions};
pub use structure::StructureClass;
pub use topic::Topic;
