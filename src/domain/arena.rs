use std::collections::{HashMap, VecDeque};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace, warn};

use crate::domain::id::{IdSource, TopicId, UuidIdSource};
use crate::domain::structure::StructureClass;

/// Collisions tolerated before a sheet stops trusting its id source.
const MAX_ID_DRAWS: usize = 64;

/// A node of the mind-map tree.
#[derive(Debug, Clone)]
pub struct TopicNode {
    pub id: TopicId,
    pub title: String,
    /// Only set on the central topic.
    pub structure_class: Option<StructureClass>,
    /// Arena slot of the parent, None for the document root
    pub parent: Option<Index>,
    /// Arena slots of the children, in display order
    pub children: Vec<Index>,
}

impl fmt::Display for TopicNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Bookkeeping entries that are not addressable as content.
#[derive(Debug, Clone, Copy)]
pub(super) struct Sentinels {
    pub(super) root: Index,
    pub(super) center: Index,
    pub(super) last: Index,
    pub(super) counter: u64,
}

/// Shared storage of one sheet.
///
/// Every [`Topic`](crate::domain::Topic) handle of a sheet holds the same
/// `ResourceIndex` behind an `Rc<RefCell<_>>`. Freed slots invalidate stale
/// handles through the arena's generation check.
pub struct ResourceIndex {
    pub(super) arena: Arena<TopicNode>,
    pub(super) ids: HashMap<TopicId, Index>,
    pub(super) sentinels: Sentinels,
    pub(super) id_source: Box<dyn IdSource>,
    pub(super) auto_title_prefix: String,
}

impl fmt::Debug for ResourceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceIndex")
            .field("topics", &self.arena.len())
            .field("sentinels", &self.sentinels)
            .field("auto_title_prefix", &self.auto_title_prefix)
            .finish()
    }
}

/// Draws from `source` until an id is not in `ids`.
///
/// After [`MAX_ID_DRAWS`] collisions `source` is replaced by [`UuidIdSource`].
fn draw_unique_id(source: &mut Box<dyn IdSource>, ids: &HashMap<TopicId, Index>) -> TopicId {
    for _ in 0..MAX_ID_DRAWS {
        let id = source.next_id();
        if !ids.contains_key(&id) {
            return id;
        }
        trace!(%id, "id source returned a registered id, drawing again");
    }
    warn!(
        draws = MAX_ID_DRAWS,
        "id source keeps returning registered ids, switching to uuid ids"
    );
    *source = Box::new(UuidIdSource);
    loop {
        let id = source.next_id();
        if !ids.contains_key(&id) {
            return id;
        }
    }
}

impl ResourceIndex {
    pub(super) fn new(
        sheet_title: &str,
        central_title: &str,
        structure_class: StructureClass,
        mut id_source: Box<dyn IdSource>,
        auto_title_prefix: String,
    ) -> Self {
        let mut arena = Arena::new();
        let mut ids = HashMap::new();

        let root_id = id_source.next_id();
        let root = arena.insert(TopicNode {
            id: root_id.clone(),
            title: sheet_title.to_string(),
            structure_class: None,
            parent: None,
            children: Vec::new(),
        });
        ids.insert(root_id, root);

        let center_id = draw_unique_id(&mut id_source, &ids);
        let center = arena.insert(TopicNode {
            id: center_id.clone(),
            title: central_title.to_string(),
            structure_class: Some(structure_class),
            parent: Some(root),
            children: Vec::new(),
        });
        ids.insert(center_id, center);
        if let Some(root_node) = arena.get_mut(root) {
            root_node.children.push(center);
        }

        Self {
            arena,
            ids,
            sentinels: Sentinels {
                root,
                center,
                last: center,
                counter: 0,
            },
            id_source,
            auto_title_prefix,
        }
    }

    /// Draws identifiers until one is not registered yet.
    #[instrument(level = "trace", skip(self))]
    pub(super) fn allocate_id(&mut self) -> TopicId {
        draw_unique_id(&mut self.id_source, &self.ids)
    }

    /// Creates and registers a node. Splicing it into a children list is
    /// left to the caller.
    #[instrument(level = "trace", skip(self))]
    pub(super) fn insert_node(&mut self, id: TopicId, title: String, parent: Option<Index>) -> Index {
        let idx = self.arena.insert(TopicNode {
            id: id.clone(),
            title,
            structure_class: None,
            parent,
            children: Vec::new(),
        });
        self.ids.insert(id, idx);
        idx
    }

    /// Unregisters a single node and frees its slot.
    #[instrument(level = "trace", skip(self))]
    pub(super) fn release(&mut self, idx: Index) -> Option<TopicNode> {
        let node = self.arena.remove(idx)?;
        if self.ids.get(&node.id) == Some(&idx) {
            self.ids.remove(&node.id);
        }
        Some(node)
    }

    /// Next auto-generated title, e.g. `Topic 3`.
    pub(super) fn next_auto_title(&mut self) -> String {
        self.sentinels.counter += 1;
        format!("{}{}", self.auto_title_prefix, self.sentinels.counter)
    }

    pub fn get_node(&self, idx: Index) -> Option<&TopicNode> {
        self.arena.get(idx)
    }

    pub(super) fn get_node_mut(&mut self, idx: Index) -> Option<&mut TopicNode> {
        self.arena.get_mut(idx)
    }

    pub fn contains(&self, idx: Index) -> bool {
        self.arena.contains(idx)
    }

    pub fn root(&self) -> Index {
        self.sentinels.root
    }

    pub fn center(&self) -> Index {
        self.sentinels.center
    }

    pub fn last(&self) -> Index {
        self.sentinels.last
    }

    pub fn counter(&self) -> u64 {
        self.sentinels.counter
    }

    pub fn slot_of(&self, id: &TopicId) -> Option<Index> {
        self.ids.get(id).copied()
    }

    /// Number of topics, the document root excluded.
    pub fn len(&self) -> usize {
        self.arena.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter_pre_order(&self, start: Index) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, start)
    }

    pub fn iter_post_order(&self, start: Index) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, start)
    }

    pub fn iter_level_order(&self, start: Index) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self, start)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, start: Index) -> usize {
        if let Some(node) = self.get_node(start) {
            1 + node
                .children
                .iter()
                .map(|&child| self.depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Titles of all leaves below `start`, left to right.
    pub fn leaf_titles(&self, start: Index) -> Vec<String> {
        self.iter_pre_order(start)
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.title.clone())
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    index: &'a ResourceIndex,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(index: &'a ResourceIndex, start: Index) -> Self {
        let mut stack = Vec::new();
        if index.contains(start) {
            stack.push(start);
        }
        Self { index, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TopicNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.index.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    index: &'a ResourceIndex,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(index: &'a ResourceIndex, start: Index) -> Self {
        let mut stack = Vec::new();
        if index.contains(start) {
            stack.push((start, false));
        }
        Self { index, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TopicNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.index.get_node(current) {
                if !visited {
                    self.stack.push((current, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current, node));
                }
            }
        }
        None
    }
}

/// Breadth-first traversal.
pub struct LevelOrderIterator<'a> {
    index: &'a ResourceIndex,
    queue: VecDeque<Index>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(index: &'a ResourceIndex, start: Index) -> Self {
        let mut queue = VecDeque::new();
        if index.contains(start) {
            queue.push_back(start);
        }
        Self { index, queue }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (Index, &'a TopicNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.queue.pop_front() {
            if let Some(node) = self.index.get_node(current) {
                self.queue.extend(node.children.iter().copied());
                return Some((current, node));
            }
        }
        None
    }
}
