use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;

use super::node::{NodeId, SearchNode};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Which of the two lists a position currently sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    node: NodeId,
    list: ListKind,
}

/// The open and closed lists of one search.
///
/// Nodes live in an arena and refer to their parents by [NodeId]. The lists themselves hold
/// positions; each position maps to the node currently standing for it, so replacing a node keeps
/// its place in the list. Superseded nodes stay in the arena, which keeps the parent chains of
/// their descendants intact until the lists are dropped.
#[derive(Clone, Debug, Default)]
pub struct NodeLists {
    nodes: Vec<SearchNode>,
    open: Vec<Point>,
    closed: Vec<Point>,
    slots: FxIndexMap<Point, Slot>,
}

impl NodeLists {
    pub fn new() -> NodeLists {
        NodeLists::default()
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Appends a newly discovered node to the open list.
    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        debug_assert!(
            !self.slots.contains_key(&node.position),
            "{} is already listed",
            node.position
        );
        let id = self.alloc(node);
        let position = self.nodes[id.0].position;
        self.open.push(position);
        self.slots.insert(
            position,
            Slot {
                node: id,
                list: ListKind::Open,
            },
        );
        id
    }

    /// Stable sort of the open list by estimated total cost. Equal costs keep their current order.
    pub fn sort_open(&mut self) {
        let nodes = &self.nodes;
        let slots = &self.slots;
        self.open
            .sort_by(|a, b| nodes[slots[a].node.0].cmp_f(&nodes[slots[b].node.0]));
    }

    /// Sorts the open list and returns its cheapest node without removing it.
    pub fn best(&mut self) -> Option<NodeId> {
        self.sort_open();
        self.open.first().map(|p| self.slots[p].node)
    }

    /// Sorts the open list and removes its cheapest node.
    pub fn pop_best(&mut self) -> Option<NodeId> {
        self.sort_open();
        if self.open.is_empty() {
            return None;
        }
        let position = self.open.remove(0);
        self.slots.swap_remove(&position).map(|slot| slot.node)
    }

    /// Moves the front of the open list to the back of the closed list. Call [best](Self::best)
    /// first so that the front is the cheapest node.
    pub fn close_best(&mut self) -> Option<NodeId> {
        if self.open.is_empty() {
            return None;
        }
        let position = self.open.remove(0);
        self.closed.push(position);
        let slot = self.slots.get_mut(&position)?;
        slot.list = ListKind::Closed;
        Some(slot.node)
    }

    /// The node currently stored for `position` in the given list.
    pub fn find(&self, list: ListKind, position: &Point) -> Option<NodeId> {
        self.slots
            .get(position)
            .filter(|slot| slot.list == list)
            .map(|slot| slot.node)
    }

    /// Replaces the node stored for `position` in `list` by a child of `parent` if that is cheaper.
    /// Returns whether a replacement happened.
    pub fn replace_if_improved(
        &mut self,
        list: ListKind,
        position: Point,
        parent: NodeId,
        h: f32,
    ) -> bool {
        let Some(stored) = self.find(list, &position) else {
            return false;
        };
        if !self.node(stored).improved_by(self.node(parent)) {
            return false;
        }
        let child = SearchNode::child(position, h, self.node(parent), parent);
        let id = self.alloc(child);
        if let Some(slot) = self.slots.get_mut(&position) {
            slot.node = id;
        }
        true
    }

    /// Positions from the root to `id`, following parent links.
    pub fn path_to(&self, id: NodeId) -> Vec<Point> {
        let mut path: Vec<Point> = std::iter::successors(Some(id), |&i| self.node(i).parent)
            .map(|i| self.node(i).position)
            .collect();
        path.reverse();
        path
    }

    /// Nodes of the open list in list order.
    pub fn open(&self) -> impl Iterator<Item = &SearchNode> {
        self.open.iter().map(|p| self.node(self.slots[p].node))
    }

    /// Nodes of the closed list in the order they were closed.
    pub fn closed(&self) -> impl Iterator<Item = &SearchNode> {
        self.closed.iter().map(|p| self.node(self.slots[p].node))
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    pub fn is_open_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Releases all nodes of both lists.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.closed.clear();
        self.slots.clear();
    }

    fn alloc(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}
