//! The slice of a pointer event the gesture tracker reads.

use std::cell::Cell;

/// A pointer event as seen by [`DragEvents`](super::DragEvents).
pub trait PointerEvent {
    /// X in client (viewport) space
    fn client_x(&self) -> f64;
    /// Y in client (viewport) space
    fn client_y(&self) -> f64;
    /// True for the primary (usually left) button
    fn is_primary_button(&self) -> bool;
    fn ctrl_key(&self) -> bool;
    fn meta_key(&self) -> bool;
    /// Suppress the platform's default action for this event
    fn prevent_default(&self);
}

#[cfg(target_arch = "wasm32")]
impl PointerEvent for web_sys::MouseEvent {
    fn client_x(&self) -> f64 {
        f64::from(web_sys::MouseEvent::client_x(self))
    }

    fn client_y(&self) -> f64 {
        f64::from(web_sys::MouseEvent::client_y(self))
    }

    fn is_primary_button(&self) -> bool {
        self.button() == 0
    }

    fn ctrl_key(&self) -> bool {
        web_sys::MouseEvent::ctrl_key(self)
    }

    fn meta_key(&self) -> bool {
        web_sys::MouseEvent::meta_key(self)
    }

    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }
}

/// Plain pointer event for native hosts and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    /// DOM-style button number (0 = primary)
    pub button: i16,
    pub ctrl: bool,
    pub meta: bool,
    default_prevented: Cell<bool>,
}

impl PointerSample {
    /// Primary-button event at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            client_x: x,
            client_y: y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl PointerEvent for PointerSample {
    fn client_x(&self) -> f64 {
        self.client_x
    }

    fn client_y(&self) -> f64 {
        self.client_y
    }

    fn is_primary_button(&self) -> bool {
        self.button == 0
    }

    fn ctrl_key(&self) -> bool {
        self.ctrl
    }

    fn meta_key(&self) -> bool {
        self.meta
    }

    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}
