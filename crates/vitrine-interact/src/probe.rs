use std::rc::Rc;

use vitrine_core::{NodeId, ScrollRegion, VisualTree};

/// Read-only view of one scroller's live geometry.
#[derive(Clone)]
pub struct GeometryProbe {
    tree: Rc<dyn VisualTree>,
    node: NodeId,
}

impl std::fmt::Debug for GeometryProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryProbe")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl GeometryProbe {
    pub fn new(tree: Rc<dyn VisualTree>, node: NodeId) -> Self {
        Self { tree, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Fresh snapshot. Unknown or unlaid-out nodes read as the zero region.
    pub fn read(&self) -> ScrollRegion {
        self.tree
            .scroll_metrics(self.node)
            .map(ScrollRegion::normalized)
            .unwrap_or_default()
    }
}
