//! The handle callers hold on a topic of a live sheet.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use generational_arena::Index;

use crate::domain::arena::ResourceIndex;
use crate::domain::builder::TopicDraft;
use crate::domain::id::{TopicId, TopicKey};
use crate::domain::mutation::AddMode;
use crate::domain::structure::StructureClass;

pub type SharedIndex = Rc<RefCell<ResourceIndex>>;

/// A topic of a sheet.
///
/// Handles are cheap to clone and all handles of one sheet share the same
/// [`ResourceIndex`]. Once its topic is removed a handle goes stale: reads
/// return `None` or empty values and edits return the handle unchanged.
///
/// Edits return a handle so calls can be chained:
///
/// ```
/// use mindsheet::{new_sheet, AddMode};
///
/// let center = new_sheet("Sheet", "Plan");
/// center.add("Design").add("Build");
/// center.on_title("Design").add_with("Research", AddMode::Before);
///
/// let titles: Vec<String> = center.children().iter().filter_map(|t| t.title()).collect();
/// assert_eq!(titles, ["Research", "Design", "Build"]);
/// ```
#[derive(Clone)]
pub struct Topic {
    index: SharedIndex,
    slot: Index,
}

impl PartialEq for Topic {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.index, &other.index) && self.slot == other.slot
    }
}

impl Eq for Topic {}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Topic");
        out.field("slot", &self.slot);
        if let Ok(index) = self.index.try_borrow() {
            if let Some(node) = index.get_node(self.slot) {
                out.field("id", &node.id).field("title", &node.title);
            }
        }
        out.finish()
    }
}

impl Topic {
    pub(crate) fn new(index: SharedIndex, slot: Index) -> Self {
        Self { index, slot }
    }

    fn at(&self, slot: Index) -> Topic {
        Topic::new(Rc::clone(&self.index), slot)
    }

    /// Read access to the shared index, e.g. for serializers.
    pub fn with_index<R>(&self, f: impl FnOnce(&ResourceIndex) -> R) -> R {
        f(&*self.index.borrow())
    }

    pub fn shares_index_with(&self, other: &Topic) -> bool {
        Rc::ptr_eq(&self.index, &other.index)
    }

    pub fn slot(&self) -> Index {
        self.slot
    }

    pub fn is_alive(&self) -> bool {
        self.index.borrow().contains(self.slot)
    }

    pub fn is_center(&self) -> bool {
        self.index.borrow().center() == self.slot
    }

    pub fn is_root(&self) -> bool {
        self.index.borrow().root() == self.slot
    }

    pub fn id(&self) -> Option<TopicId> {
        self.index.borrow().get_node(self.slot).map(|node| node.id.clone())
    }

    /// Content key of this topic, usable with [`Topic::on`] and [`Topic::remove_by_id`].
    pub fn key(&self) -> Option<TopicKey> {
        self.id().map(TopicKey::Content)
    }

    pub fn title(&self) -> Option<String> {
        self.index
            .borrow()
            .get_node(self.slot)
            .map(|node| node.title.clone())
    }

    /// Only the central topic carries a structure class.
    pub fn structure_class(&self) -> Option<StructureClass> {
        self.index
            .borrow()
            .get_node(self.slot)
            .and_then(|node| node.structure_class)
    }

    pub fn children(&self) -> Vec<Topic> {
        let slots = self
            .index
            .borrow()
            .get_node(self.slot)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        slots.into_iter().map(|slot| self.at(slot)).collect()
    }

    // ----------------------------------------------------------------
    // Navigation
    // ----------------------------------------------------------------

    /// Focuses the topic `key` resolves to and returns it.
    ///
    /// An unknown key returns the last-focused topic instead; there is no
    /// failure. [`TopicKey::default()`] is the central topic.
    pub fn on(&self, key: impl Into<TopicKey>) -> Topic {
        let key = key.into();
        let slot = self.index.borrow_mut().focus(&key);
        self.at(slot)
    }

    /// Focuses the first topic titled `title`; empty title means the center.
    pub fn on_title(&self, title: &str) -> Topic {
        let key = self.cid(title);
        self.on(key)
    }

    /// Current cursor, without moving it.
    pub fn last_focused(&self) -> Topic {
        let slot = self.index.borrow_mut().last_or_center();
        self.at(slot)
    }

    /// Own parent; `None` for the document root or a stale handle.
    pub fn parent(&self) -> Option<Topic> {
        let parent = self.index.borrow().get_node(self.slot)?.parent?;
        Some(self.at(parent))
    }

    /// Parent of the topic `key` resolves to; `None` when unknown.
    pub fn parent_of(&self, key: impl Into<TopicKey>) -> Option<Topic> {
        let parent = self.index.borrow().parent_slot(&key.into())?;
        Some(self.at(parent))
    }

    pub fn center(&self) -> Topic {
        let slot = self.index.borrow().center();
        self.at(slot)
    }

    pub fn sheet_root(&self) -> Topic {
        let slot = self.index.borrow().root();
        self.at(slot)
    }

    pub fn sheet_title(&self) -> String {
        let index = self.index.borrow();
        index
            .get_node(index.root())
            .map(|node| node.title.clone())
            .unwrap_or_default()
    }

    // ----------------------------------------------------------------
    // Lookup
    // ----------------------------------------------------------------

    /// Key of a topic titled `title`.
    ///
    /// Empty title gives [`TopicKey::Center`], no match gives [`TopicKey::Last`].
    /// Which topic is returned among several with the same title is unspecified.
    pub fn cid(&self, title: &str) -> TopicKey {
        self.index.borrow().title_key(title)
    }

    /// Keys of all topics titled `title`, in unspecified order.
    ///
    /// Empty title gives `[Center]`, no match gives `[Last]`.
    pub fn cids(&self, title: &str) -> Vec<TopicKey> {
        self.index.borrow().title_keys(title)
    }

    // ----------------------------------------------------------------
    // Mutation
    // ----------------------------------------------------------------

    /// Appends a child and returns `self`. An empty title is replaced by the
    /// next `Topic N`.
    pub fn add(&self, title: &str) -> Topic {
        self.add_with(title, AddMode::Sub)
    }

    /// Inserts a topic according to `mode`.
    ///
    /// Returns `self`, except for [`AddMode::Parent`] which returns the new
    /// topic: it now carries this topic's title, so the caller keeps pointing
    /// at the same content.
    pub fn add_with(&self, title: &str, mode: AddMode) -> Topic {
        let slot = self.index.borrow_mut().add(self.slot, title, mode);
        self.at(slot)
    }

    /// Removes the topic titled `title` along with its subtree.
    pub fn remove(&self, title: &str) -> Topic {
        let key = self.cid(title);
        self.remove_by_id(key)
    }

    /// Removes the topic `key` names along with its subtree.
    ///
    /// On success the focus moves to the central topic, which is returned.
    /// Otherwise nothing changes and `self` is returned.
    pub fn remove_by_id(&self, key: impl Into<TopicKey>) -> Topic {
        let key = key.into();
        let slot = self.index.borrow_mut().remove_by_key(self.slot, &key);
        self.at(slot)
    }

    /// Deletes every descendant; the topic itself stays. The document root
    /// never loses the central topic.
    pub fn remove_children(&self) {
        self.index.borrow_mut().remove_children(self.slot);
    }

    /// Adopts an externally built tree as the last child.
    ///
    /// Returns the grafted topic, or `None` on the document root or a stale handle.
    pub fn graft(&self, draft: TopicDraft) -> Option<Topic> {
        let slot = self.index.borrow_mut().graft(self.slot, draft)?;
        Some(self.at(slot))
    }

    /// Renames sheet and central topic; callable on any live topic of the sheet.
    pub fn up_sheet(
        &self,
        sheet_title: &str,
        central_title: &str,
        structure_class: Option<StructureClass>,
    ) {
        if !self.is_alive() {
            return;
        }
        self.index
            .borrow_mut()
            .update_sheet(sheet_title, central_title, structure_class);
    }

    // ----------------------------------------------------------------
    // Traversal
    // ----------------------------------------------------------------

    /// This topic and its descendants, depth first, parents before children.
    pub fn iter_pre_order(&self) -> impl Iterator<Item = Topic> {
        let slots: Vec<Index> = self
            .index
            .borrow()
            .iter_pre_order(self.slot)
            .map(|(slot, _)| slot)
            .collect();
        self.handles(slots)
    }

    pub fn iter_post_order(&self) -> impl Iterator<Item = Topic> {
        let slots: Vec<Index> = self
            .index
            .borrow()
            .iter_post_order(self.slot)
            .map(|(slot, _)| slot)
            .collect();
        self.handles(slots)
    }

    /// This topic and its descendants, breadth first.
    pub fn iter_level_order(&self) -> impl Iterator<Item = Topic> {
        let slots: Vec<Index> = self
            .index
            .borrow()
            .iter_level_order(self.slot)
            .map(|(slot, _)| slot)
            .collect();
        self.handles(slots)
    }

    fn handles(&self, slots: Vec<Index>) -> std::vec::IntoIter<Topic> {
        slots
            .into_iter()
            .map(|slot| self.at(slot))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Levels below and including this topic; 0 for a stale handle.
    pub fn depth(&self) -> usize {
        self.index.borrow().depth(self.slot)
    }

    pub fn leaf_titles(&self) -> Vec<String> {
        self.index.borrow().leaf_titles(self.slot)
    }

    /// Owned snapshot of this subtree, ids included.
    pub fn to_draft(&self) -> Option<TopicDraft> {
        self.index.borrow().export(self.slot)
    }
}
