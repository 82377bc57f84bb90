//! # Event coordination
//!
//! [`EventCoordinator`] is the one place host signals enter the engine.
//! Mounted components register listeners on a small topic bus; every
//! registration is made inside the mount's [`Scope`] through `effect`, so
//! detaching (or dropping) the returned handle releases all of them along
//! with the component's timers and sentinels.
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine_core::{ManualClock, headless::HeadlessTree};
//! use vitrine_interact::{CarouselConfig, Direction, EventCoordinator};
//!
//! let tree = Rc::new(HeadlessTree::new());
//! let scroller = tree.append(tree.root(), false).unwrap();
//! tree.set_extents(scroller, 300.0, 1000.0);
//!
//! let events = EventCoordinator::new(tree.clone(), Rc::new(ManualClock::new()));
//! let carousel = events.mount_carousel(scroller, CarouselConfig::default()).unwrap();
//! assert!(carousel.presentation().next_enabled);
//! assert!(carousel.advance(Direction::Next));
//!
//! carousel.detach();
//! assert_eq!(events.listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use vitrine_core::{
    Clock, Dispose, Error, HostEvent, KeyEvent, NodeId, PointerEvent, PointerEventKind, Result,
    Scope, Size, SystemClock, VisualTree, effect, on_unmount,
};
use web_time::Instant;

use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::focus::{Enabled, FocusRing};

/// Whether the host should suppress its default handling of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Handled {
    Ignored,
    Consumed,
}

impl Handled {
    pub fn is_consumed(self) -> bool {
        self == Handled::Consumed
    }

    pub fn or(self, other: Handled) -> Handled {
        if self.is_consumed() { self } else { other }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Topic {
    Key,
    Pointer,
    Resize,
    Scroll,
    Content,
}

impl Topic {
    fn of(ev: &HostEvent) -> Self {
        match ev {
            HostEvent::Key(_) => Topic::Key,
            HostEvent::Pointer(_) => Topic::Pointer,
            HostEvent::Resize(_) => Topic::Resize,
            HostEvent::Scroll { .. } => Topic::Scroll,
            HostEvent::ContentChanged { .. } => Topic::Content,
        }
    }
}

type Listener = Rc<dyn Fn(&HostEvent, Instant) -> Handled>;

new_key_type! {
    struct ListenerId;
    struct TickerId;
}

#[derive(Default)]
struct Bus {
    listeners: SlotMap<ListenerId, (Topic, Listener)>,
    tickers: SlotMap<TickerId, Rc<Carousel>>,
}

pub struct EventCoordinator {
    tree: Rc<dyn VisualTree>,
    clock: Rc<dyn Clock>,
    bus: Rc<RefCell<Bus>>,
}

impl std::fmt::Debug for EventCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCoordinator")
            .field("listeners", &self.listener_count())
            .field("carousels", &self.carousel_count())
            .finish_non_exhaustive()
    }
}

impl EventCoordinator {
    pub fn new(tree: Rc<dyn VisualTree>, clock: Rc<dyn Clock>) -> Self {
        Self {
            tree,
            clock,
            bus: Rc::new(RefCell::new(Bus::default())),
        }
    }

    pub fn with_system_clock(tree: Rc<dyn VisualTree>) -> Self {
        Self::new(tree, Rc::new(SystemClock))
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    pub fn listener_count(&self) -> usize {
        self.bus.borrow().listeners.len()
    }

    pub fn carousel_count(&self) -> usize {
        self.bus.borrow().tickers.len()
    }

    // Must be called inside the mount's scope.
    fn listen(
        &self,
        topic: Topic,
        f: impl Fn(&HostEvent, Instant) -> Handled + 'static,
    ) -> Dispose {
        let bus = self.bus.clone();
        effect(move || {
            let id = bus.borrow_mut().listeners.insert((topic, Rc::new(f)));
            let weak = Rc::downgrade(&bus);
            on_unmount(move || {
                if let Some(bus) = weak.upgrade() {
                    bus.borrow_mut().listeners.remove(id);
                }
            })
        })
    }

    /// Mount a paged/drag scroller on `scroller`, the node whose horizontal
    /// offset the carousel owns. Affordances are computed once right away,
    /// so call this after the first layout.
    pub fn mount_carousel(
        &self,
        scroller: NodeId,
        config: CarouselConfig,
    ) -> Result<CarouselHandle> {
        if !self.tree.contains_node(scroller) {
            return Err(Error::UnknownNode(scroller));
        }
        let carousel = Rc::new(Carousel::new(
            self.tree.clone(),
            self.clock.clone(),
            scroller,
            config,
        ));
        let scope = Scope::new();

        scope.run(|| {
            let c = carousel.clone();
            self.listen(Topic::Resize, move |_, now| {
                c.on_resize(now);
                Handled::Ignored
            });

            let c = carousel.clone();
            self.listen(Topic::Scroll, move |ev, now| {
                if let HostEvent::Scroll { target } = ev
                    && *target == scroller
                {
                    c.note_scroll(now);
                }
                Handled::Ignored
            });

            let (c, tree) = (carousel.clone(), self.tree.clone());
            self.listen(Topic::Content, move |ev, _| {
                if let HostEvent::ContentChanged { target } = ev
                    && tree.is_ancestor(scroller, *target)
                {
                    c.on_content_changed();
                }
                Handled::Ignored
            });

            let (c, tree) = (carousel.clone(), self.tree.clone());
            self.listen(Topic::Pointer, move |ev, now| {
                let HostEvent::Pointer(p) = ev else {
                    return Handled::Ignored;
                };
                let inside = tree.is_ancestor(scroller, p.target);
                // Crossing between children of the scroller does not leave the
                // draggable region; only a leave from the scroller itself (or
                // from outside it) ends the session.
                if p.event == PointerEventKind::Leave && inside && p.target != scroller {
                    return Handled::Ignored;
                }
                // An open drag keeps the pointer captured outside the scroller.
                let captured = c.controller().is_dragging()
                    && !matches!(p.event, PointerEventKind::Down(_));
                if captured || inside {
                    c.on_pointer(p, now)
                } else {
                    Handled::Ignored
                }
            });

            let (c, bus) = (carousel.clone(), self.bus.clone());
            effect(move || {
                let id = bus.borrow_mut().tickers.insert(c.clone());
                let weak = Rc::downgrade(&bus);
                on_unmount(move || {
                    if let Some(bus) = weak.upgrade() {
                        bus.borrow_mut().tickers.remove(id);
                    }
                    c.shutdown();
                    log::debug!("carousel on {scroller:?} unmounted");
                })
            });
        });

        carousel.controller().recompute_affordances();
        log::debug!(
            "carousel mounted on {scroller:?}: {:?}",
            carousel.affordances()
        );
        Ok(CarouselHandle { carousel, scope })
    }

    /// Mount a focus boundary around `content`. Sentinels go into the tree
    /// before the start sentinel is focused.
    pub fn mount_boundary(
        &self,
        content: NodeId,
        enabled: impl Into<Enabled>,
    ) -> Result<BoundaryHandle> {
        let ring = Rc::new(FocusRing::attach(
            self.tree.clone(),
            content,
            enabled.into(),
        )?);
        let scope = Scope::new();

        scope.run(|| {
            let r = ring.clone();
            self.listen(Topic::Key, move |ev, _| {
                let HostEvent::Key(k) = ev else {
                    return Handled::Ignored;
                };
                if r.handle_key(k).redirected() {
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            });

            let r = ring.clone();
            effect(move || on_unmount(move || r.detach()));
        });

        Ok(BoundaryHandle { ring, scope })
    }

    /// Route one host signal to every interested listener.
    pub fn dispatch(&self, ev: &HostEvent) -> Handled {
        let now = self.clock.now();
        let topic = Topic::of(ev);
        // Snapshot so listeners may mount/unmount while we iterate.
        let targets: SmallVec<[Listener; 8]> = self
            .bus
            .borrow()
            .listeners
            .values()
            .filter(|(t, _)| *t == topic)
            .map(|(_, l)| l.clone())
            .collect();

        let mut handled = Handled::Ignored;
        for l in &targets {
            handled = handled.or(l(ev, now));
        }
        log::trace!("{topic:?} -> {handled:?} ({} listeners)", targets.len());
        handled
    }

    pub fn key_down(&self, ev: KeyEvent) -> Handled {
        self.dispatch(&HostEvent::Key(ev))
    }

    pub fn pointer(&self, ev: PointerEvent) -> Handled {
        self.dispatch(&HostEvent::Pointer(ev))
    }

    pub fn resize(&self, size: Size) -> Handled {
        self.dispatch(&HostEvent::Resize(size))
    }

    pub fn scroll(&self, target: NodeId) -> Handled {
        self.dispatch(&HostEvent::Scroll { target })
    }

    pub fn content_changed(&self, target: NodeId) -> Handled {
        self.dispatch(&HostEvent::ContentChanged { target })
    }

    /// Drive animation frames and due timers. Returns `true` while some
    /// page transition still needs frames.
    pub fn tick(&self) -> bool {
        let now = self.clock.now();
        let carousels: SmallVec<[Rc<Carousel>; 4]> =
            self.bus.borrow().tickers.values().cloned().collect();
        let mut running = false;
        for c in &carousels {
            running |= c.tick(now);
        }
        running
    }

    /// Earliest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.bus
            .borrow()
            .tickers
            .values()
            .filter_map(|c| c.next_deadline())
            .min()
    }
}

/// A mounted carousel. Dropping it unmounts.
#[derive(Debug)]
pub struct CarouselHandle {
    carousel: Rc<Carousel>,
    scope: Scope,
}

impl CarouselHandle {
    /// Unmount: listeners, timers and any drag/transition are released.
    pub fn detach(self) {}
}

impl Deref for CarouselHandle {
    type Target = Carousel;
    fn deref(&self) -> &Carousel {
        &self.carousel
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}

/// A mounted focus boundary. Dropping it unmounts.
#[derive(Debug)]
pub struct BoundaryHandle {
    ring: Rc<FocusRing>,
    scope: Scope,
}

impl BoundaryHandle {
    /// Unmount: the keydown listener goes first, then the sentinels.
    pub fn detach(self) {}
}

impl Deref for BoundaryHandle {
    type Target = FocusRing;
    fn deref(&self) -> &FocusRing {
        &self.ring
    }
}

impl Drop for BoundaryHandle {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}
