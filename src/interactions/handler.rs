//! Optional callback set driven by [`DragEvents`](super::DragEvents).

use std::fmt;

use super::CoordinateData;

type ActivateFn<E> = Box<dyn FnMut(&E) -> bool>;
type CoordsFn<E> = Box<dyn FnMut(&E, &CoordinateData)>;
type EventFn<E> = Box<dyn FnMut(&E)>;

/// Callbacks for one attached element. Every callback is optional.
///
/// ```
/// use tablegrid::interactions::{DragHandler, PointerSample};
///
/// let handler: DragHandler<PointerSample> = DragHandler::new()
///     .on_activate(|event: &PointerSample| !event.ctrl)
///     .on_drag_move(|_event, coords| println!("moved by {:?}", coords.delta));
/// assert!(handler.is_valid());
/// ```
pub struct DragHandler<E> {
    activate: Option<ActivateFn<E>>,
    drag_move: Option<CoordsFn<E>>,
    drag_end: Option<CoordsFn<E>>,
    click: Option<EventFn<E>>,
    double_click: Option<EventFn<E>>,
}

impl<E> Default for DragHandler<E> {
    fn default() -> Self {
        Self {
            activate: None,
            drag_move: None,
            drag_end: None,
            click: None,
            double_click: None,
        }
    }
}

impl<E> fmt::Debug for DragHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragHandler")
            .field("on_activate", &self.activate.is_some())
            .field("on_drag_move", &self.drag_move.is_some())
            .field("on_drag_end", &self.drag_end.is_some())
            .field("on_click", &self.click.is_some())
            .field("on_double_click", &self.double_click.is_some())
            .finish()
    }
}

impl<E> DragHandler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on pointer-down. Returning `false` vetoes the gesture.
    #[must_use]
    pub fn on_activate(mut self, f: impl FnMut(&E) -> bool + 'static) -> Self {
        self.activate = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_move(mut self, f: impl FnMut(&E, &CoordinateData) + 'static) -> Self {
        self.drag_move = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_end(mut self, f: impl FnMut(&E, &CoordinateData) + 'static) -> Self {
        self.drag_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.click = Some(Box::new(f));
        self
    }

    /// Registering this delays single clicks until the double-click window closes.
    #[must_use]
    pub fn on_double_click(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.double_click = Some(Box::new(f));
        self
    }

    /// True if at least one callback is registered.
    pub fn is_valid(&self) -> bool {
        self.activate.is_some()
            || self.drag_move.is_some()
            || self.drag_end.is_some()
            || self.click.is_some()
            || self.double_click.is_some()
    }

    pub(crate) fn wants_double_click(&self) -> bool {
        self.double_click.is_some()
    }

    /// Absent `on_activate` always proceeds.
    pub(crate) fn activate(&mut self, event: &E) -> bool {
        self.activate.as_mut().map_or(true, |f| f(event))
    }

    pub(crate) fn drag_move(&mut self, event: &E, coords: &CoordinateData) {
        if let Some(f) = self.drag_move.as_mut() {
            f(event, coords);
        }
    }

    pub(crate) fn drag_end(&mut self, event: &E, coords: &CoordinateData) {
        if let Some(f) = self.drag_end.as_mut() {
            f(event, coords);
        }
    }

    pub(crate) fn click(&mut self, event: &E) {
        if let Some(f) = self.click.as_mut() {
            f(event);
        }
    }

    pub(crate) fn double_click(&mut self, event: &E) {
        if let Some(f) = self.double_click.as_mut() {
            f(event);
        }
    }
}
