//! # Interaction engine
//!
//! Two behaviours shared by Vitrine's storefront components:
//!
//! - **Focus boundaries** ([`FocusRing`]): a region of the visual tree becomes
//!   a closed Tab cycle bracketed by two invisible sentinels.
//! - **Scrolling carousels** ([`Carousel`] over a [`ScrollController`]):
//!   a horizontally overflowing strip with prev/next paging, mouse-drag
//!   scrolling, and prev/next affordances that track the real geometry.
//!
//! Hosts talk to both through an [`EventCoordinator`]: mount components on
//! it, forward keyboard/pointer/resize/scroll/content signals, and call
//! [`EventCoordinator::tick`] from the frame loop (or at
//! [`EventCoordinator::next_deadline`]) so animations and rate-limited
//! reactions run.
//!
//! Resize reactions are throttled and scroll-settle reactions debounced,
//! both through [`CoalescingTimer`] with a 166ms default window. Every
//! reaction re-reads geometry through a [`GeometryProbe`] when it fires.

pub mod carousel;
pub mod coalesce;
pub mod config;
pub mod coordinator;
pub mod focus;
pub mod probe;
pub mod scroll;

pub use carousel::{Carousel, ControlsPresentation};
pub use coalesce::{CoalescePolicy, CoalescingTimer};
pub use config::{CarouselConfig, DEFAULT_REACTION_WINDOW};
pub use coordinator::{BoundaryHandle, CarouselHandle, EventCoordinator, Handled};
pub use focus::{Enabled, FocusRing, TabRoute};
pub use probe::GeometryProbe;
pub use scroll::{AffordanceState, AnimationFrame, Direction, DragSession, ScrollController};
