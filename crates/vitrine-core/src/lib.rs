//! # Host seam, signals and cleanup
//!
//! `vitrine-core` holds everything the interaction engine needs that is not
//! itself interaction logic:
//!
//! - [`VisualTree`]: the host's rendered tree (geometry reads, scroll-offset
//!   writes, focus moves, sentinel insertion). [`headless::HeadlessTree`] is
//!   an in-memory implementation.
//! - [`HostEvent`] and friends: the signals a host forwards (keys, pointers,
//!   resize, scroll, content mutation).
//! - `Signal<T>`: observable value with explicit unsubscribe.
//! - [`Dispose`] / [`Scope`]: scoped cleanup so every listener and timer a
//!   mount registers is released when it unmounts.
//! - [`Clock`] and [`AnimatedValue`]: time for animated scrolling and rate
//!   limiting. Tests drive a [`ManualClock`].
//!
//! ## Signals
//!
//! ```rust
//! use vitrine_core::*;
//!
//! let count = signal(0);
//! assert!(count.set_if_changed(2));
//! assert!(!count.set_if_changed(2));
//! assert_eq!(count.get(), 2);
//! ```
//!
//! `set_if_changed` only notifies observers on a real change, which is how
//! affordance visibility avoids no-op churn.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use vitrine_core::*;
//!
//! let scope = Scope::new();
//! scope.run(|| {
//!     effect(|| {
//!         log::debug!("listener registered");
//!         on_unmount(|| log::debug!("listener released"))
//!     });
//! });
//! scope.dispose();
//! ```

pub mod animation;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod host;
pub mod input;
pub mod scope;
pub mod signal;

pub use animation::*;
pub use effects::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use host::*;
pub use input::*;
pub use scope::*;
pub use signal::*;
