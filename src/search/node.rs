use grid_util::point::Point;
use std::cmp::Ordering;

/// Index of a node in the arena of a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A position reached during search together with the cost of the route that reached it. Nodes
/// are never changed after construction; a cheaper route to the same position produces a new node.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode {
    pub position: Point,
    /// Number of steps taken from the start.
    pub g: u32,
    /// Estimated remaining cost to the target.
    pub h: f32,
    pub parent: Option<NodeId>,
}

impl SearchNode {
    pub fn root(position: Point, h: f32) -> SearchNode {
        SearchNode {
            position,
            g: 0,
            h,
            parent: None,
        }
    }

    /// Every move costs one step, diagonal or not.
    pub fn child(position: Point, h: f32, parent: &SearchNode, parent_id: NodeId) -> SearchNode {
        SearchNode {
            position,
            g: parent.g + 1,
            h,
            parent: Some(parent_id),
        }
    }

    pub fn f(&self) -> f32 {
        self.g as f32 + self.h
    }

    /// Orders by estimated total cost, lowest first.
    pub fn cmp_f(&self, other: &SearchNode) -> Ordering {
        self.f().total_cmp(&other.f())
    }

    /// Whether a route through `candidate` should replace this node. The parent's cost has to
    /// undercut this node's by more than one step, so that the new child is strictly cheaper.
    pub fn improved_by(&self, candidate: &SearchNode) -> bool {
        (candidate.g as i64) < self.g as i64 - 1
    }
}
