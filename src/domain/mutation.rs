//! Structural edits: the four insertion modes and cascading removal.

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::ResourceIndex;
use crate::domain::id::TopicKey;

/// Where [`Topic::add_with`](crate::domain::Topic::add_with) places the new topic
/// relative to the acting one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddMode {
    /// Append as the last child.
    #[default]
    Sub,
    /// Insert as the sibling right before.
    Before,
    /// Insert as the sibling right after.
    After,
    /// Wrap in a new parent topic.
    Parent,
}

impl ResourceIndex {
    /// Inserts a topic relative to `at` and returns the slot the caller should
    /// keep acting on.
    ///
    /// The document root and freed slots are left untouched. An empty title is
    /// replaced by the next auto title, and on the central topic every mode
    /// becomes [`AddMode::Sub`].
    #[instrument(level = "debug", skip(self))]
    pub(super) fn add(&mut self, at: Index, title: &str, mode: AddMode) -> Index {
        let Some(parent) = self.get_node(at).and_then(|node| node.parent) else {
            debug!("no parent, nothing to add to");
            return at;
        };

        let title = if title.is_empty() {
            self.next_auto_title()
        } else {
            title.to_string()
        };

        let mode = if at == self.center() { AddMode::Sub } else { mode };

        let id = self.allocate_id();
        match mode {
            AddMode::Sub => {
                let idx = self.insert_node(id, title, Some(at));
                if let Some(node) = self.get_node_mut(at) {
                    node.children.push(idx);
                }
                at
            }
            AddMode::Parent => {
                let idx = self.insert_node(id, title, Some(at));
                self.wrap(at, idx);
                idx
            }
            AddMode::Before | AddMode::After => {
                let idx = self.insert_node(id, title, Some(parent));
                self.splice_sibling(parent, at, idx, mode == AddMode::Before);
                at
            }
        }
    }

    /// Moves the text and children of `at` one level down into `inner`, leaving
    /// `inner` as the only child of `at`.
    fn wrap(&mut self, at: Index, inner: Index) {
        let (outer_title, moved) = match self.get_node_mut(at) {
            Some(node) => (
                std::mem::take(&mut node.title),
                std::mem::replace(&mut node.children, vec![inner]),
            ),
            None => return,
        };
        let inner_title = match self.get_node_mut(inner) {
            Some(node) => {
                node.children = moved.clone();
                std::mem::replace(&mut node.title, outer_title)
            }
            None => return,
        };
        if let Some(node) = self.get_node_mut(at) {
            node.title = inner_title;
        }
        for child in moved {
            if let Some(node) = self.get_node_mut(child) {
                node.parent = Some(inner);
            }
        }
    }

    /// Pushes `new` to the tail of `parent`'s children, then swaps it towards
    /// the head until it sits next to `at`.
    fn splice_sibling(&mut self, parent: Index, at: Index, new: Index, before: bool) {
        let Some(node) = self.get_node_mut(parent) else {
            return;
        };
        let siblings = &mut node.children;
        if siblings.is_empty() {
            warn!("parent has no children list, appending");
            siblings.push(new);
            return;
        }
        siblings.push(new);

        for i in (1..siblings.len()).rev() {
            if before {
                siblings.swap(i, i - 1);
                if siblings[i] == at {
                    break;
                }
            } else {
                if siblings[i - 1] == at {
                    break;
                }
                siblings.swap(i, i - 1);
            }
        }
    }

    /// Removes the child of its parent that `key` names, with its subtree.
    ///
    /// Only content keys can match. The central topic and the document root
    /// are never removed. A freed `at` removes nothing. Returns the central
    /// topic after a removal, `at` otherwise.
    #[instrument(level = "debug", skip(self))]
    pub(super) fn remove_by_key(&mut self, at: Index, key: &TopicKey) -> Index {
        if !self.contains(at) {
            debug!("stale receiver, nothing removed");
            return at;
        }
        let Some(id) = key.content_id() else {
            return at;
        };
        let Some(target) = self.slot_of(id) else {
            return at;
        };
        if target == self.center() || target == self.root() {
            debug!(%id, "refusing to remove a permanent topic");
            return at;
        }
        let Some(parent) = self.parent_slot(key) else {
            return at;
        };

        let siblings = match self.get_node_mut(parent) {
            Some(node) if !node.children.is_empty() => std::mem::take(&mut node.children),
            _ => return at,
        };

        let mut kept = Vec::with_capacity(siblings.len());
        let mut removed = Vec::new();
        for child in siblings {
            let matches = self.get_node(child).is_some_and(|node| &node.id == id);
            if matches {
                removed.push(child);
            } else {
                kept.push(child);
            }
        }
        if let Some(node) = self.get_node_mut(parent) {
            node.children = kept;
        }

        if removed.is_empty() {
            return at;
        }
        for child in removed {
            self.remove_children(child);
            self.release(child);
        }
        debug!(%id, "removed topic");
        self.refocus_center()
    }

    /// Purges every descendant of `at` from the index and empties its children.
    ///
    /// The document root keeps its only child, the central topic.
    #[instrument(level = "trace", skip(self))]
    pub(super) fn remove_children(&mut self, at: Index) {
        if at == self.root() {
            debug!("document root keeps the central topic");
            return;
        }
        let children = match self.get_node_mut(at) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.remove_children(child);
            self.release(child);
        }
        self.last_or_center();
    }
}
