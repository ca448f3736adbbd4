//! DOM implementations of the gesture tracker's collaborators.
//!
//! Every closure holds a `Weak` reference to the tracker so listeners left
//! registered by a misbehaving host never keep it alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::error::{Result, TableError};
use crate::interactions::{DragEvents, DragHandler, ListenerHost, Scheduler, TimerToken};

pub(crate) type DomDragEvents = DragEvents<MouseEvent, DomListeners, DomScheduler>;
pub(crate) type SharedDrag = Rc<DragCell>;

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;

/// Attachment change requested through the JS API.
pub(crate) enum Deferred {
    Attach(DomListeners, DragHandler<MouseEvent>),
    Detach,
}

impl Deferred {
    fn apply(self, drag: &mut DomDragEvents) {
        match self {
            Deferred::Attach(listeners, handler) => {
                drag.attach(listeners, handler);
            }
            Deferred::Detach => drag.detach(),
        }
    }
}

/// The tracker plus the attachment change queued while it was dispatching.
///
/// Handler callbacks run with the tracker mutably borrowed. An `attach` or
/// `detach` issued from inside one is parked here and applied as soon as the
/// dispatch returns; the last request wins.
pub(crate) struct DragCell {
    drag: RefCell<DomDragEvents>,
    deferred: RefCell<Option<Deferred>>,
}

impl DragCell {
    pub(crate) fn new(drag: DomDragEvents) -> Self {
        Self {
            drag: RefCell::new(drag),
            deferred: RefCell::new(None),
        }
    }

    /// Run `f` against the tracker, then apply anything its callbacks queued.
    pub(crate) fn dispatch(&self, f: impl FnOnce(&mut DomDragEvents)) {
        {
            // Busy means a callback dispatched a synthetic event back into us
            let Ok(mut drag) = self.drag.try_borrow_mut() else {
                return;
            };
            f(&mut drag);
        }
        self.apply_deferred();
    }

    /// Apply `op` now, or after the running dispatch if there is one.
    pub(crate) fn request(&self, op: Deferred) {
        match self.drag.try_borrow_mut() {
            Ok(mut drag) => op.apply(&mut drag),
            Err(_) => {
                tracing::debug!("attachment change deferred until dispatch returns");
                *self.deferred.borrow_mut() = Some(op);
            }
        }
    }

    fn apply_deferred(&self) {
        loop {
            let Some(op) = self.deferred.borrow_mut().take() else {
                return;
            };
            let Ok(mut drag) = self.drag.try_borrow_mut() else {
                *self.deferred.borrow_mut() = Some(op);
                return;
            };
            op.apply(&mut drag);
        }
    }
}

fn forward(target: Weak<DragCell>, f: fn(&mut DomDragEvents, &MouseEvent)) -> MouseClosure {
    Closure::wrap(Box::new(move |event: MouseEvent| {
        if let Some(state) = target.upgrade() {
            state.dispatch(|drag| f(drag, &event));
        }
    }) as Box<dyn FnMut(MouseEvent)>)
}

/// Mouse listeners on the attached element and its document.
pub(crate) struct DomListeners {
    element: HtmlElement,
    document: Document,
    on_down: MouseClosure,
    on_move: MouseClosure,
    on_up: MouseClosure,
}

impl DomListeners {
    pub(crate) fn new(element: HtmlElement, target: &Weak<DragCell>) -> Result<Self> {
        let document = element
            .owner_document()
            .or_else(|| web_sys::window().and_then(|w| w.document()))
            .ok_or(TableError::MissingDom("document"))?;
        Ok(Self {
            element,
            document,
            on_down: forward(target.clone(), DomDragEvents::handle_pointer_down),
            on_move: forward(target.clone(), DomDragEvents::handle_pointer_move),
            on_up: forward(target.clone(), DomDragEvents::handle_pointer_up),
        })
    }
}

impl ListenerHost for DomListeners {
    fn listen_element(&mut self) {
        if let Err(e) = self
            .element
            .add_event_listener_with_callback("mousedown", self.on_down.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?e, "could not add mousedown listener");
        }
    }

    fn unlisten_element(&mut self) {
        self.element
            .remove_event_listener_with_callback(
                "mousedown",
                self.on_down.as_ref().unchecked_ref(),
            )
            .ok();
    }

    fn listen_document(&mut self) {
        for (name, closure) in [("mousemove", &self.on_move), ("mouseup", &self.on_up)] {
            if let Err(e) = self
                .document
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                tracing::warn!(event = name, error = ?e, "could not add document listener");
            }
        }
    }

    fn unlisten_document(&mut self) {
        for (name, closure) in [("mousemove", &self.on_move), ("mouseup", &self.on_up)] {
            self.document
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

/// `setTimeout`-backed scheduler. At most one timer is armed at a time.
pub(crate) struct DomScheduler {
    target: Weak<DragCell>,
    armed: Option<(TimerToken, i32)>,
    // Kept alive until the next schedule; the timer may still call it
    callback: Option<Closure<dyn FnMut()>>,
}

impl DomScheduler {
    pub(crate) fn new(target: Weak<DragCell>) -> Self {
        Self {
            target,
            armed: None,
            callback: None,
        }
    }
}

impl Scheduler for DomScheduler {
    fn schedule_once(&mut self, token: TimerToken, delay: Duration) -> Result<()> {
        let window = web_sys::window().ok_or(TableError::MissingDom("window"))?;
        let target = self.target.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(state) = target.upgrade() {
                state.dispatch(|drag| drag.handle_timer(token));
            }
        }) as Box<dyn FnMut()>);
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis,
        )?;
        self.armed = Some((token, handle));
        self.callback = Some(closure);
        Ok(())
    }

    fn cancel(&mut self, token: TimerToken) {
        match self.armed {
            Some((armed, handle)) if armed == token => {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(handle);
                }
                self.armed = None;
            }
            _ => {}
        }
    }
}
