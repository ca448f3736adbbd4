//! Pointer interaction handling.
//!
//! [`DragEvents`] turns raw pointer-down/move/up events into activate, drag,
//! click and double-click callbacks on a [`DragHandler`]. Platform hooks are
//! injected through [`ListenerHost`] and [`Scheduler`].

mod coords;
mod drag;
mod event;
mod handler;
mod host;

pub use coords::{CoordinateData, Point};
pub use drag::{DragConfig, DragEvents, DOUBLE_CLICK_TIMEOUT};
pub use event::{PointerEvent, PointerSample};
pub use handler::DragHandler;
pub use host::{ListenerHost, ManualScheduler, Scheduler, TimerToken};
