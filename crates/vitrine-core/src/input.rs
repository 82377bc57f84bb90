use crate::{NodeId, Size, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    Cancel,
    Enter,
    Leave,
}

#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub event: PointerEventKind,
    /// Client-space position.
    pub position: Vec2,
    /// Node the host hit-tested this event to.
    pub target: NodeId,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Mouse event at horizontal client position `x`.
    pub fn mouse(event: PointerEventKind, target: NodeId, x: f32) -> Self {
        Self {
            id: PointerId(0),
            kind: PointerKind::Mouse,
            event,
            position: Vec2 { x, y: 0.0 },
            target,
            modifiers: Modifiers::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win key on Windows
}

/// Keys a host forwards to the engine. Anything else the host may drop;
/// only `Tab` is routed today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Space,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

#[derive(Clone, Debug)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub is_repeat: bool,
    /// Node holding focus when the key went down.
    pub target: NodeId,
}

impl KeyEvent {
    pub fn new(key: Key, target: NodeId) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            is_repeat: false,
            target,
        }
    }

    pub fn tab(target: NodeId) -> Self {
        Self::new(Key::Tab, target)
    }

    pub fn shift_tab(target: NodeId) -> Self {
        Self {
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::default()
            },
            ..Self::tab(target)
        }
    }
}

/// Every signal a host forwards into the engine.
#[derive(Clone, Debug)]
pub enum HostEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// Viewport resized.
    Resize(Size),
    /// Native scroll position of `target` changed.
    Scroll { target: NodeId },
    /// Children of `target` were added, removed or resized.
    ContentChanged { target: NodeId },
}
