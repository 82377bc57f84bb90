//! Keyboard focus containment.
//!
//! A [`FocusRing`] brackets an externally owned subtree with two invisible,
//! focusable sentinels so that Tab traversal cycles
//! `start -> subtree -> end -> start` and Shift+Tab mirrors it. The ring only
//! steps in when focus sits on a sentinel and is about to leave the ring;
//! Tabs inside the subtree go to the host's default traversal untouched.

use std::rc::Rc;

use vitrine_core::{Error, Key, KeyEvent, NodeId, Result, SentinelSide, VisualTree};

/// Whether a boundary corrals focus. The predicate form is evaluated at
/// every keydown, so it can flip without re-registering anything.
#[derive(Clone)]
pub enum Enabled {
    Static(bool),
    Predicate(Rc<dyn Fn() -> bool>),
}

impl Enabled {
    pub fn dynamic(f: impl Fn() -> bool + 'static) -> Self {
        Enabled::Predicate(Rc::new(f))
    }

    pub fn get(&self) -> bool {
        match self {
            Enabled::Static(b) => *b,
            Enabled::Predicate(f) => f(),
        }
    }
}

impl Default for Enabled {
    fn default() -> Self {
        Enabled::Static(true)
    }
}

impl From<bool> for Enabled {
    fn from(b: bool) -> Self {
        Enabled::Static(b)
    }
}

impl std::fmt::Debug for Enabled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Enabled::Static(b) => f.debug_tuple("Static").field(b).finish(),
            Enabled::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// How a keydown was routed by a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabRoute {
    NotTab,
    Disabled,
    /// Target is inside the bounded subtree; default traversal continues.
    Contained,
    /// Focus was sent to this sentinel; the host must suppress its default.
    Wrapped(NodeId),
    /// Outside the subtree but not leaving the ring.
    Default,
}

impl TabRoute {
    pub fn redirected(&self) -> bool {
        matches!(self, TabRoute::Wrapped(_))
    }
}

pub struct FocusRing {
    tree: Rc<dyn VisualTree>,
    content: NodeId,
    start: NodeId,
    end: NodeId,
    enabled: Enabled,
}

impl std::fmt::Debug for FocusRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusRing")
            .field("content", &self.content)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl FocusRing {
    /// Insert both sentinels around `content`, then focus the start sentinel
    /// if the ring is enabled at activation time.
    pub fn attach(tree: Rc<dyn VisualTree>, content: NodeId, enabled: Enabled) -> Result<Self> {
        if !tree.contains_node(content) {
            return Err(Error::UnknownNode(content));
        }
        let start = tree
            .insert_sentinel(content, SentinelSide::Start)
            .ok_or(Error::SentinelRejected(content))?;
        let Some(end) = tree.insert_sentinel(content, SentinelSide::End) else {
            tree.remove_node(start);
            return Err(Error::SentinelRejected(content));
        };

        let ring = Self {
            tree,
            content,
            start,
            end,
            enabled,
        };
        if ring.is_enabled() {
            ring.tree.focus(start);
        }
        log::debug!("focus ring around {content:?}: sentinels {start:?} / {end:?}");
        Ok(ring)
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn sentinels(&self) -> (NodeId, NodeId) {
        (self.start, self.end)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Decide what a keydown should do, without side effects.
    pub fn route(&self, ev: &KeyEvent) -> TabRoute {
        if ev.key != Key::Tab {
            return TabRoute::NotTab;
        }
        if !self.is_enabled() {
            return TabRoute::Disabled;
        }
        if self.tree.is_ancestor(self.content, ev.target) {
            return TabRoute::Contained;
        }
        let backward = ev.modifiers.shift;
        if ev.target == self.end && !backward {
            TabRoute::Wrapped(self.start)
        } else if ev.target == self.start && backward {
            TabRoute::Wrapped(self.end)
        } else {
            TabRoute::Default
        }
    }

    /// Route a keydown and perform the focus redirect, if any.
    pub fn handle_key(&self, ev: &KeyEvent) -> TabRoute {
        let route = self.route(ev);
        if let TabRoute::Wrapped(to) = route {
            log::trace!("focus ring {:?}: {:?} -> {to:?}", self.content, ev.target);
            self.tree.focus(to);
        }
        route
    }

    /// Remove both sentinels from the tree.
    pub fn detach(&self) {
        self.tree.remove_node(self.start);
        self.tree.remove_node(self.end);
        log::debug!("focus ring around {:?} detached", self.content);
    }
}
