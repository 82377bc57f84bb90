//! # Paged / drag horizontal scrolling
//!
//! [`ScrollController`] is the single writer of one scroller's offset. It
//! never caches geometry: every decision re-reads a [`ScrollRegion`] through
//! its [`GeometryProbe`], so stale timer callbacks cannot act on old sizes.
//!
//! Offsets change three ways:
//!
//! - `advance(dir)`: one page (`visible_extent`) left or right, animated
//!   through an `AnimatedValue<f32>` that `tick` steps each frame.
//! - `begin_drag` / `drag_to` / `end_drag`: pointer drag, written directly:
//!   `offset = anchor_offset - (pointer - anchor_pointer)`.
//! - the host's own scrolling (wheel, inertia), which the controller only
//!   observes through `on_scroll_settled`.
//!
//! Prev/next visibility is an [`AffordanceState`] held in a `Signal`; it is
//! only written when it actually changes, so observers see no churn.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_core::{
    AnimatedValue, AnimationSpec, Dispose, NodeId, ScrollRegion, Signal, VisualTree, signal,
};
use web_time::Instant;

use crate::probe::GeometryProbe;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards offset 0.
    Prev,
    /// Towards the end of the content.
    Next,
}

/// What the prev/next controls may currently offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffordanceState {
    pub can_retreat: bool,
    pub can_advance: bool,
    pub is_scrollable: bool,
}

impl AffordanceState {
    pub fn from_region(r: &ScrollRegion) -> Self {
        // Not laid out yet: keep everything hidden until the next recompute.
        if !r.is_laid_out() {
            return Self::default();
        }
        Self {
            can_retreat: r.current_offset > 0.0,
            can_advance: r.visible_extent + r.current_offset < r.content_extent,
            is_scrollable: r.content_extent > r.visible_extent,
        }
    }

    pub fn allows(&self, dir: Direction) -> bool {
        match dir {
            Direction::Prev => self.can_retreat,
            Direction::Next => self.can_advance,
        }
    }
}

/// One pointer gesture, from pointer-down to pointer-up/leave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub anchor_offset: f32,
    pub anchor_pointer: f32,
}

impl DragSession {
    /// Unclamped offset for a pointer at `pointer`.
    pub fn offset_for(&self, pointer: f32) -> f32 {
        self.anchor_offset - (pointer - self.anchor_pointer)
    }
}

/// Result of stepping the scroll animation for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationFrame {
    /// Nothing in flight; no offset written.
    Idle,
    /// Offset written, more frames needed.
    Running,
    /// Offset written, transition reached its target.
    Finished,
}

impl AnimationFrame {
    pub fn wrote_offset(self) -> bool {
        !matches!(self, AnimationFrame::Idle)
    }
}

pub struct ScrollController {
    tree: Rc<dyn VisualTree>,
    probe: GeometryProbe,
    affordances: Signal<AffordanceState>,
    drag: RefCell<Option<DragSession>>,
    animation: RefCell<Option<AnimatedValue<f32>>>,
    spec: AnimationSpec,
}

impl std::fmt::Debug for ScrollController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollController")
            .field("node", &self.probe.node())
            .field("affordances", &self.affordances.get())
            .field("drag", &*self.drag.borrow())
            .field("animating", &self.is_animating())
            .finish()
    }
}

impl ScrollController {
    pub fn new(tree: Rc<dyn VisualTree>, node: NodeId, spec: AnimationSpec) -> Self {
        Self {
            probe: GeometryProbe::new(tree.clone(), node),
            tree,
            affordances: signal(AffordanceState::default()),
            drag: RefCell::new(None),
            animation: RefCell::new(None),
            spec,
        }
    }

    pub fn node(&self) -> NodeId {
        self.probe.node()
    }

    pub fn region(&self) -> ScrollRegion {
        self.probe.read()
    }

    pub fn affordances(&self) -> AffordanceState {
        self.affordances.get()
    }

    /// Observe affordance changes. Only real changes are delivered.
    pub fn subscribe(&self, f: impl Fn(&AffordanceState) + 'static) -> Dispose {
        self.affordances.observe(f)
    }

    pub fn observer_count(&self) -> usize {
        self.affordances.subscriber_count()
    }

    /// Re-read geometry and publish the derived state if it changed.
    /// Returns whether observers were notified.
    pub fn recompute_affordances(&self) -> bool {
        let region = self.probe.read();
        let next = AffordanceState::from_region(&region);
        let changed = self.affordances.set_if_changed(next);
        if changed {
            log::debug!(
                "scroller {:?}: affordances -> {:?} ({:?})",
                self.node(),
                next,
                region
            );
        }
        changed
    }

    pub fn on_scroll_settled(&self) -> bool {
        self.recompute_affordances()
    }

    /// Page one viewport width in `dir`. No-op when the matching affordance
    /// is off or the clamped target equals the current offset. Returns
    /// whether a transition was issued.
    pub fn advance(&self, dir: Direction, now: Instant) -> bool {
        if !self.affordances().allows(dir) {
            log::trace!("scroller {:?}: advance {dir:?} disabled", self.node());
            return false;
        }
        let region = self.probe.read();
        let delta = match dir {
            Direction::Prev => -region.visible_extent,
            Direction::Next => region.visible_extent,
        };
        let target = region.clamp_offset(region.current_offset + delta);
        if target == region.current_offset {
            return false;
        }

        if self.spec.is_instant() {
            *self.animation.borrow_mut() = None;
            self.tree.set_scroll_offset(self.node(), target);
        } else {
            let mut anim = AnimatedValue::new(region.current_offset, self.spec);
            anim.set_target(target, now);
            *self.animation.borrow_mut() = Some(anim);
        }
        log::trace!(
            "scroller {:?}: advance {dir:?} {} -> {}",
            self.node(),
            region.current_offset,
            target
        );
        true
    }

    /// Step an in-flight `advance` transition and write its offset.
    pub fn tick(&self, now: Instant) -> AnimationFrame {
        let (value, running) = {
            let mut slot = self.animation.borrow_mut();
            let Some(anim) = slot.as_mut() else {
                return AnimationFrame::Idle;
            };
            let running = anim.update(now);
            let value = *anim.get();
            if !running {
                *slot = None;
            }
            (value, running)
        };
        // Clamp against live geometry: the content may have shrunk mid-flight.
        let off = self.probe.read().clamp_offset(value);
        self.tree.set_scroll_offset(self.node(), off);
        if running {
            AnimationFrame::Running
        } else {
            AnimationFrame::Finished
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.borrow().is_some()
    }

    pub fn animation_deadline(&self) -> Option<Instant> {
        self.animation
            .borrow()
            .as_ref()
            .and_then(|a| a.finishes_at())
    }

    /// Open a drag session anchored at the live offset. Cancels any
    /// in-flight page transition.
    pub fn begin_drag(&self, pointer: f32) {
        *self.animation.borrow_mut() = None;
        let session = DragSession {
            anchor_offset: self.probe.read().current_offset,
            anchor_pointer: pointer,
        };
        log::trace!("scroller {:?}: begin drag {session:?}", self.node());
        *self.drag.borrow_mut() = Some(session);
    }

    /// Returns whether an offset was written (i.e. a session is open).
    pub fn drag_to(&self, pointer: f32) -> bool {
        let Some(session) = *self.drag.borrow() else {
            return false;
        };
        let off = self.probe.read().clamp_offset(session.offset_for(pointer));
        self.tree.set_scroll_offset(self.node(), off);
        true
    }

    /// Close the session. A stray end without a session is a no-op.
    pub fn end_drag(&self) -> bool {
        let had = self.drag.borrow_mut().take().is_some();
        if had {
            log::trace!("scroller {:?}: end drag", self.node());
        }
        had
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.borrow().is_some()
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        *self.drag.borrow()
    }

    /// Drop any drag session and transition.
    pub fn cancel(&self) {
        self.drag.borrow_mut().take();
        self.animation.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::headless::HeadlessTree;
    use vitrine_core::{Clock, Easing, ManualClock};
    use web_time::Duration;

    fn setup(
        visible: f32,
        content: f32,
        spec: AnimationSpec,
    ) -> (Rc<HeadlessTree>, ScrollController) {
        let tree = Rc::new(HeadlessTree::new());
        let node = tree.append(tree.root(), false).unwrap();
        tree.set_extents(node, visible, content);
        let ctl = ScrollController::new(tree.clone(), node, spec);
        ctl.recompute_affordances();
        (tree, ctl)
    }

    #[test]
    fn affordances_follow_region() {
        let a = AffordanceState::from_region(&ScrollRegion::new(300.0, 1000.0, 0.0));
        assert_eq!(
            a,
            AffordanceState {
                can_retreat: false,
                can_advance: true,
                is_scrollable: true
            }
        );

        let a = AffordanceState::from_region(&ScrollRegion::new(300.0, 1000.0, 700.0));
        assert!(a.can_retreat && !a.can_advance && a.is_scrollable);

        let a = AffordanceState::from_region(&ScrollRegion::new(300.0, 1000.0, 350.0));
        assert!(a.can_retreat && a.can_advance);
    }

    #[test]
    fn unlaid_out_region_hides_everything() {
        let a = AffordanceState::from_region(&ScrollRegion::new(0.0, 800.0, 0.0));
        assert_eq!(a, AffordanceState::default());
    }

    #[test]
    fn affordance_sweep_matches_definition() {
        for visible in [1.0f32, 50.0, 300.0, 999.0] {
            for content in [0.0f32, 1.0, 300.0, 1000.0] {
                let max = (content - visible).max(0.0);
                for k in 0..=4 {
                    let off = max * k as f32 / 4.0;
                    let r = ScrollRegion::new(visible, content, off);
                    let a = AffordanceState::from_region(&r);
                    assert_eq!(a.can_retreat, off > 0.0);
                    assert_eq!(a.can_advance, visible + off < content);
                    if content <= visible {
                        assert!(!a.is_scrollable && !a.can_retreat && !a.can_advance);
                    }
                }
            }
        }
    }

    #[test]
    fn page_through_with_instant_spec_clamps_at_end() {
        let (tree, ctl) = setup(300.0, 1000.0, AnimationSpec::instant());
        let now = Instant::now();
        let node = ctl.node();

        assert!(ctl.advance(Direction::Next, now));
        assert_eq!(tree.offset(node), 300.0);
        assert!(ctl.advance(Direction::Next, now));
        assert_eq!(tree.offset(node), 600.0);
        assert!(ctl.advance(Direction::Next, now));
        assert_eq!(tree.offset(node), 700.0);

        // cached affordances still say "can advance" until recomputed, but
        // the target is already the current offset
        assert!(!ctl.advance(Direction::Next, now));
        ctl.on_scroll_settled();
        assert!(!ctl.affordances().can_advance);
        assert!(!ctl.advance(Direction::Next, now));
        assert_eq!(tree.offset(node), 700.0);
    }

    #[test]
    fn retreat_never_goes_below_zero() {
        let (tree, ctl) = setup(300.0, 1000.0, AnimationSpec::instant());
        let node = ctl.node();
        tree.set_scroll_offset(node, 450.0);
        ctl.recompute_affordances();

        let now = Instant::now();
        assert!(ctl.advance(Direction::Prev, now));
        assert_eq!(tree.offset(node), 150.0);
        assert!(ctl.advance(Direction::Prev, now));
        assert_eq!(tree.offset(node), 0.0);
        ctl.recompute_affordances();
        assert!(!ctl.advance(Direction::Prev, now));
    }

    #[test]
    fn animated_advance_reaches_target_over_frames() {
        let clock = ManualClock::new();
        let spec = AnimationSpec::tween(Duration::from_millis(200), Easing::Linear);
        let (tree, ctl) = setup(300.0, 1000.0, spec);
        let node = ctl.node();

        assert!(ctl.advance(Direction::Next, clock.now()));
        assert_eq!(tree.offset(node), 0.0);

        clock.advance(Duration::from_millis(100));
        assert_eq!(ctl.tick(clock.now()), AnimationFrame::Running);
        assert!((tree.offset(node) - 150.0).abs() < 0.5);

        clock.advance(Duration::from_millis(100));
        assert_eq!(ctl.tick(clock.now()), AnimationFrame::Finished);
        assert_eq!(tree.offset(node), 300.0);
        assert_eq!(ctl.tick(clock.now()), AnimationFrame::Idle);
    }

    #[test]
    fn drag_is_linear_and_clamped() {
        let (tree, ctl) = setup(300.0, 1000.0, AnimationSpec::instant());
        let node = ctl.node();
        tree.set_scroll_offset(node, 200.0);

        ctl.begin_drag(500.0);
        assert!(ctl.drag_to(450.0));
        assert_eq!(tree.offset(node), 250.0);
        assert!(ctl.drag_to(600.0));
        assert_eq!(tree.offset(node), 100.0);
        assert!(ctl.drag_to(900.0));
        assert_eq!(tree.offset(node), 0.0);
        assert!(ctl.drag_to(-2000.0));
        assert_eq!(tree.offset(node), 700.0);

        assert!(ctl.end_drag());
        assert!(!ctl.drag_to(0.0));
        assert_eq!(tree.offset(node), 700.0);
    }

    #[test]
    fn stray_end_drag_is_noop() {
        let (_tree, ctl) = setup(300.0, 1000.0, AnimationSpec::instant());
        assert!(!ctl.end_drag());
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn begin_drag_cancels_transition() {
        let clock = ManualClock::new();
        let (_tree, ctl) = setup(300.0, 1000.0, AnimationSpec::default());
        assert!(ctl.advance(Direction::Next, clock.now()));
        assert!(ctl.is_animating());
        ctl.begin_drag(10.0);
        assert!(!ctl.is_animating());
        assert_eq!(ctl.tick(clock.now()), AnimationFrame::Idle);
    }

    #[test]
    fn recompute_twice_notifies_once() {
        let (tree, ctl) = setup(300.0, 1000.0, AnimationSpec::instant());
        let hits = Rc::new(std::cell::Cell::new(0));
        let h = hits.clone();
        let _d = ctl.subscribe(move |_| h.set(h.get() + 1));

        tree.set_scroll_offset(ctl.node(), 100.0);
        assert!(ctl.recompute_affordances());
        assert!(!ctl.recompute_affordances());
        assert_eq!(hits.get(), 1);
    }
}
