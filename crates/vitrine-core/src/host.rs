//! The seam between the engine and whatever renders the page.
//!
//! The engine never owns nodes. It reads geometry, writes scroll offsets, moves
//! focus and inserts the two sentinel stops of a focus boundary, all through
//! [`VisualTree`]. Everything is `&self`: hosts are single-threaded and keep
//! their own interior mutability.

use crate::ScrollRegion;

/// Opaque handle to a node in the host's visual tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Which side of a container a sentinel is placed on in traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentinelSide {
    Start,
    End,
}

pub trait VisualTree {
    fn contains_node(&self, node: NodeId) -> bool;

    /// Inclusive: every node is its own ancestor.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// `None` for unknown nodes. Unlaid-out nodes report zeros.
    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollRegion>;

    fn set_scroll_offset(&self, node: NodeId, x: f32);

    fn focus(&self, node: NodeId);

    /// Insert an invisible keyboard-focusable marker directly before
    /// (`Start`) or after (`End`) `container` in traversal order.
    fn insert_sentinel(&self, container: NodeId, side: SentinelSide) -> Option<NodeId>;

    fn remove_node(&self, node: NodeId);
}
