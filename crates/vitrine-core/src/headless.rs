//! In-memory [`VisualTree`] for tests, demos and server-side hosts.
//!
//! Nodes live in a single arena with document order given by parent/child
//! links. Scroll offsets are clamped on write the way a browser clamps
//! `scrollLeft`. Default tab traversal (what the host does when the engine
//! lets a Tab through) is available as [`HeadlessTree::default_tab`].

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{NodeId, ScrollRegion, SentinelSide, VisualTree};

#[derive(Debug, Default)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    focusable: bool,
    sentinel: bool,
    metrics: ScrollRegion,
}

#[derive(Debug)]
struct TreeState {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
    root: NodeId,
    focused: Option<NodeId>,
    scroll_writes: usize,
}

#[derive(Debug)]
pub struct HeadlessTree {
    state: RefCell<TreeState>,
}

impl Default for HeadlessTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessTree {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::default());
        Self {
            state: RefCell::new(TreeState {
                nodes,
                next_id: 1,
                root,
                focused: None,
                scroll_writes: 0,
            }),
        }
    }

    pub fn root(&self) -> NodeId {
        self.state.borrow().root
    }

    /// Append a child; returns `None` if `parent` is unknown.
    pub fn append(&self, parent: NodeId, focusable: bool) -> Option<NodeId> {
        let mut st = self.state.borrow_mut();
        if !st.nodes.contains_key(&parent) {
            return None;
        }
        let id = st.alloc(Node {
            parent: Some(parent),
            focusable,
            ..Node::default()
        });
        st.nodes.get_mut(&parent)?.children.push(id);
        Some(id)
    }

    /// Set the laid-out extents of `node`, keeping its offset in range.
    pub fn set_extents(&self, node: NodeId, visible: f32, content: f32) {
        if let Some(n) = self.state.borrow_mut().nodes.get_mut(&node) {
            let off = n.metrics.current_offset;
            n.metrics = ScrollRegion::new(visible, content, off).normalized();
        }
    }

    pub fn offset(&self, node: NodeId) -> f32 {
        self.state
            .borrow()
            .nodes
            .get(&node)
            .map_or(0.0, |n| n.metrics.current_offset)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.state.borrow().focused
    }

    pub fn is_sentinel(&self, node: NodeId) -> bool {
        self.state
            .borrow()
            .nodes
            .get(&node)
            .is_some_and(|n| n.sentinel)
    }

    pub fn node_count(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    /// Number of offset writes received so far.
    pub fn scroll_writes(&self) -> usize {
        self.state.borrow().scroll_writes
    }

    /// Focusable nodes in document (pre-)order.
    pub fn traversal_order(&self) -> Vec<NodeId> {
        let st = self.state.borrow();
        let mut out = Vec::new();
        let mut stack = vec![st.root];
        while let Some(id) = stack.pop() {
            let Some(n) = st.nodes.get(&id) else { continue };
            if n.focusable {
                out.push(id);
            }
            stack.extend(n.children.iter().rev().copied());
        }
        out
    }

    /// Move focus the way the host does for an unintercepted Tab.
    /// Wraps at both ends of the document.
    pub fn default_tab(&self, backward: bool) -> Option<NodeId> {
        let chain = self.traversal_order();
        if chain.is_empty() {
            return None;
        }
        let next = match self.focused().and_then(|f| chain.iter().position(|&id| id == f)) {
            Some(idx) if backward => chain[(idx + chain.len() - 1) % chain.len()],
            Some(idx) => chain[(idx + 1) % chain.len()],
            None if backward => chain[chain.len() - 1],
            None => chain[0],
        };
        self.state.borrow_mut().focused = Some(next);
        Some(next)
    }
}

impl TreeState {
    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }
}

impl VisualTree for HeadlessTree {
    fn contains_node(&self, node: NodeId) -> bool {
        self.state.borrow().nodes.contains_key(&node)
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let st = self.state.borrow();
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = st.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollRegion> {
        self.state.borrow().nodes.get(&node).map(|n| n.metrics)
    }

    fn set_scroll_offset(&self, node: NodeId, x: f32) {
        let mut st = self.state.borrow_mut();
        if let Some(n) = st.nodes.get_mut(&node) {
            n.metrics.current_offset = n.metrics.clamp_offset(x);
            st.scroll_writes += 1;
        }
    }

    fn focus(&self, node: NodeId) {
        let mut st = self.state.borrow_mut();
        if st.nodes.contains_key(&node) {
            st.focused = Some(node);
        }
    }

    fn insert_sentinel(&self, container: NodeId, side: SentinelSide) -> Option<NodeId> {
        let mut st = self.state.borrow_mut();
        let parent = st.nodes.get(&container)?.parent?;
        let at = st
            .nodes
            .get(&parent)?
            .children
            .iter()
            .position(|&c| c == container)?;
        let id = st.alloc(Node {
            parent: Some(parent),
            focusable: true,
            sentinel: true,
            ..Node::default()
        });
        let siblings = &mut st.nodes.get_mut(&parent)?.children;
        match side {
            SentinelSide::Start => siblings.insert(at, id),
            SentinelSide::End => siblings.insert(at + 1, id),
        }
        Some(id)
    }

    fn remove_node(&self, node: NodeId) {
        let mut st = self.state.borrow_mut();
        let Some(parent) = st.nodes.get(&node).map(|n| n.parent) else {
            log::warn!("remove_node: {node:?} already gone");
            return;
        };
        if let Some(parent) = parent
            && let Some(p) = st.nodes.get_mut(&parent)
        {
            p.children.retain(|&c| c != node);
        }
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = st.nodes.remove(&id) {
                stack.extend(n.children);
            }
            if st.focused == Some(id) {
                st.focused = None;
            }
        }
    }
}
