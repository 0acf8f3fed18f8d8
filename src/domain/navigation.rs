//! Cursor handling: resolving keys to slots and moving the focus.
//!
//! Navigation degrades instead of failing. A key that resolves to nothing
//! yields the last-focused topic.

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::domain::arena::ResourceIndex;
use crate::domain::id::TopicKey;

impl ResourceIndex {
    /// Slot a key points at, if it is live.
    pub fn resolve(&self, key: &TopicKey) -> Option<Index> {
        let idx = match key {
            TopicKey::Root => self.sentinels.root,
            TopicKey::Center => self.sentinels.center,
            TopicKey::Last => self.sentinels.last,
            TopicKey::Content(id) => self.slot_of(id)?,
        };
        self.contains(idx).then_some(idx)
    }

    /// Moves the focus to `key` and returns it, or returns the current focus
    /// when the key is unknown.
    #[instrument(level = "trace", skip(self))]
    pub(super) fn focus(&mut self, key: &TopicKey) -> Index {
        match self.resolve(key) {
            Some(idx) => {
                self.sentinels.last = idx;
                idx
            }
            None => {
                trace!("key not found, staying on last focused topic");
                self.last_or_center()
            }
        }
    }

    /// Parent slot of the topic `key` resolves to.
    pub fn parent_slot(&self, key: &TopicKey) -> Option<Index> {
        let idx = self.resolve(key)?;
        self.get_node(idx)?.parent
    }

    /// Resets the focus to the central topic.
    pub(super) fn refocus_center(&mut self) -> Index {
        self.sentinels.last = self.sentinels.center;
        self.sentinels.center
    }

    /// The last-focused slot, repaired to the center if it was freed.
    pub(super) fn last_or_center(&mut self) -> Index {
        if !self.contains(self.sentinels.last) {
            self.sentinels.last = self.sentinels.center;
        }
        self.sentinels.last
    }
}
