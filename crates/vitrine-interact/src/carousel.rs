//! A mounted scrolling carousel: one [`ScrollController`] plus the rate
//! limiters and pointer handling that feed it.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_core::{
    Clock, Dispose, NodeId, PointerButton, PointerEvent, PointerEventKind, VisualTree,
};
use web_time::Instant;

use crate::Handled;
use crate::coalesce::CoalescingTimer;
use crate::config::CarouselConfig;
use crate::scroll::{AffordanceState, Direction, ScrollController};

/// What a carousel renders around its scroller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlsPresentation {
    /// Prev/next controls exist at all.
    pub show_controls: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Scrollable styling and scrollbar track.
    pub show_scrollbar: bool,
}

impl ControlsPresentation {
    pub fn new(a: AffordanceState, disable_scrollbar: bool) -> Self {
        Self {
            show_controls: a.is_scrollable,
            prev_enabled: a.is_scrollable && a.can_retreat,
            next_enabled: a.is_scrollable && a.can_advance,
            show_scrollbar: a.is_scrollable && !disable_scrollbar,
        }
    }
}

pub struct Carousel {
    controller: ScrollController,
    config: CarouselConfig,
    clock: Rc<dyn Clock>,
    resize: RefCell<CoalescingTimer>,
    settle: RefCell<CoalescingTimer>,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("controller", &self.controller)
            .field("config", &self.config)
            .field("resize", &*self.resize.borrow())
            .field("settle", &*self.settle.borrow())
            .finish_non_exhaustive()
    }
}

impl Carousel {
    pub fn new(
        tree: Rc<dyn VisualTree>,
        clock: Rc<dyn Clock>,
        scroller: NodeId,
        config: CarouselConfig,
    ) -> Self {
        Self {
            controller: ScrollController::new(tree, scroller, config.scroll_animation),
            resize: RefCell::new(CoalescingTimer::throttle(config.resize_window)),
            settle: RefCell::new(CoalescingTimer::debounce(config.settle_window)),
            config,
            clock,
        }
    }

    pub fn scroller(&self) -> NodeId {
        self.controller.node()
    }

    pub fn controller(&self) -> &ScrollController {
        &self.controller
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn affordances(&self) -> AffordanceState {
        self.controller.affordances()
    }

    pub fn presentation(&self) -> ControlsPresentation {
        ControlsPresentation::new(self.affordances(), self.config.disable_scrollbar)
    }

    pub fn subscribe(&self, f: impl Fn(&AffordanceState) + 'static) -> Dispose {
        self.controller.subscribe(f)
    }

    /// Prev/next control activation.
    pub fn advance(&self, dir: Direction) -> bool {
        let now = self.clock.now();
        let issued = self.controller.advance(dir, now);
        if issued && self.config.scroll_animation.is_instant() {
            self.note_scroll(now);
        }
        issued
    }

    pub fn on_resize(&self, now: Instant) {
        self.resize.borrow_mut().signal(now);
    }

    /// Any offset change, ours or the host's, restarts the settle window.
    pub fn note_scroll(&self, now: Instant) {
        self.settle.borrow_mut().signal(now);
    }

    pub fn on_content_changed(&self) {
        self.controller.recompute_affordances();
    }

    pub fn on_pointer(&self, ev: &PointerEvent, now: Instant) -> Handled {
        let x = ev.position.x;
        match ev.event {
            PointerEventKind::Down(PointerButton::Primary) => {
                self.controller.begin_drag(x);
                Handled::Consumed
            }
            PointerEventKind::Move => {
                if self.controller.drag_to(x) {
                    self.note_scroll(now);
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            }
            PointerEventKind::Up(_) | PointerEventKind::Leave | PointerEventKind::Cancel => {
                if self.controller.end_drag() {
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            }
            PointerEventKind::Down(_) | PointerEventKind::Enter => Handled::Ignored,
        }
    }

    /// One frame: step the page transition, then fire due timers.
    /// Returns whether the transition still needs frames.
    pub fn tick(&self, now: Instant) -> bool {
        let frame = self.controller.tick(now);
        if frame.wrote_offset() {
            self.note_scroll(now);
        }
        let resize_due = self.resize.borrow_mut().poll(now);
        if resize_due {
            log::trace!("scroller {:?}: resize window elapsed", self.scroller());
            self.controller.recompute_affordances();
        }
        let settle_due = self.settle.borrow_mut().poll(now);
        if settle_due {
            log::trace!("scroller {:?}: scroll settled", self.scroller());
            self.controller.on_scroll_settled();
        }
        self.controller.is_animating()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.resize.borrow().deadline(),
            self.settle.borrow().deadline(),
            self.controller.animation_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn has_pending_timers(&self) -> bool {
        self.resize.borrow().is_pending() || self.settle.borrow().is_pending()
    }

    /// Stop every timer and gesture. Nothing fires after this.
    pub fn shutdown(&self) {
        self.resize.borrow_mut().cancel();
        self.settle.borrow_mut().cancel();
        self.controller.cancel();
    }
}
