//! Pointer gesture state machine.
//!
//! A gesture runs from pointer-down to pointer-up and is classified as one of:
//! - a drag (at least one move): `on_drag_move`* then `on_drag_move` + `on_drag_end`
//! - a click (no move): `on_click`, delayed while a double click is possible
//! - a double click: two clicks inside the timeout, `on_double_click` only
//!
//! The tracker never touches the platform directly. Listener registration goes
//! through a [`ListenerHost`] and the double-click timer through a
//! [`Scheduler`], so tests feed synthetic events straight into the
//! `handle_*` methods.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    CoordinateData, DragHandler, ListenerHost, ManualScheduler, Point, PointerEvent, Scheduler,
    TimerToken,
};

/// Window in which a second click turns into a double click.
pub const DOUBLE_CLICK_TIMEOUT: Duration = Duration::from_millis(500);

/// Tunables for [`DragEvents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(with = "millis")]
    pub double_click_timeout: Duration,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            double_click_timeout: DOUBLE_CLICK_TIMEOUT,
        }
    }
}

/// A click waiting to learn whether a second one follows.
struct PendingClick<E> {
    token: TimerToken,
    event: E,
}

/// Gesture tracker for one element.
pub struct DragEvents<E, L, S> {
    config: DragConfig,
    scheduler: S,
    handler: Option<DragHandler<E>>,
    listeners: Option<L>,
    element_listening: bool,
    document_listening: bool,
    is_activated: bool,
    is_dragging: bool,
    activation: Point,
    last: Point,
    pending_click: Option<PendingClick<E>>,
    last_token: u64,
}

impl<E, L, S> DragEvents<E, L, S>
where
    E: PointerEvent + Clone,
    L: ListenerHost,
    S: Scheduler,
{
    pub fn new(scheduler: S) -> Self {
        Self::with_config(scheduler, DragConfig::default())
    }

    pub fn with_config(scheduler: S, config: DragConfig) -> Self {
        Self {
            config,
            scheduler,
            handler: None,
            listeners: None,
            element_listening: false,
            document_listening: false,
            is_activated: false,
            is_dragging: false,
            activation: [0.0, 0.0],
            last: [0.0, 0.0],
            pending_click: None,
            last_token: 0,
        }
    }

    /// True if the event carries the ctrl or meta modifier, i.e. the host
    /// should add to the current selection instead of replacing it.
    pub fn is_additive(event: &E) -> bool {
        event.ctrl_key() || event.meta_key()
    }

    /// Attach to a new element, detaching from any previous one first.
    ///
    /// A handler with no callbacks is recorded but installs no listener.
    pub fn attach(&mut self, listeners: L, handler: DragHandler<E>) -> &mut Self {
        self.detach();
        let valid = handler.is_valid();
        self.handler = Some(handler);
        let listeners = self.listeners.insert(listeners);
        if valid {
            listeners.listen_element();
            self.element_listening = true;
        } else {
            tracing::debug!("drag handler has no callbacks, attachment is inert");
        }
        self
    }

    /// Remove every listener and drop any pending click. Safe to repeat.
    pub fn detach(&mut self) {
        if let Some(listeners) = self.listeners.as_mut() {
            if self.element_listening {
                listeners.unlisten_element();
                self.element_listening = false;
            }
        }
        self.detach_document_listeners();
        if let Some(pending) = self.pending_click.take() {
            self.scheduler.cancel(pending.token);
            tracing::trace!(token = pending.token.0, "pending click cancelled by detach");
        }
        self.is_activated = false;
        self.is_dragging = false;
    }

    /// Pointer-down on the attached element.
    pub fn handle_pointer_down(&mut self, event: &E) {
        if !self.element_listening || !event.is_primary_button() {
            return;
        }
        self.init_coordinates(event);
        if let Some(handler) = self.handler.as_mut() {
            if !handler.activate(event) {
                tracing::debug!("gesture vetoed by on_activate");
                return;
            }
        }
        tracing::trace!(x = self.activation[0], y = self.activation[1], "gesture activated");
        self.is_activated = true;
        event.prevent_default();
        self.attach_document_listeners();
    }

    /// Pointer-move anywhere in the document.
    pub fn handle_pointer_move(&mut self, event: &E) {
        if !self.document_listening {
            return;
        }
        event.prevent_default();
        if self.is_activated && !self.is_dragging {
            tracing::trace!("drag started");
            self.is_dragging = true;
        }
        if self.is_dragging {
            let coords = self.update_coordinates(event);
            if let Some(handler) = self.handler.as_mut() {
                handler.drag_move(event, &coords);
            }
        }
    }

    /// Pointer-up anywhere in the document.
    pub fn handle_pointer_up(&mut self, event: &E) {
        if !self.document_listening {
            return;
        }
        event.prevent_default();
        if self.is_dragging {
            let coords = self.update_coordinates(event);
            if let Some(handler) = self.handler.as_mut() {
                handler.drag_move(event, &coords);
                handler.drag_end(event, &coords);
            }
            tracing::trace!(dx = coords.offset[0], dy = coords.offset[1], "drag ended");
        } else if self.is_activated {
            self.handle_click(event);
        }
        self.is_activated = false;
        self.is_dragging = false;
        self.detach_document_listeners();
    }

    /// A timer armed through the [`Scheduler`] expired.
    ///
    /// Fires the deferred single click. Tokens that were cancelled or
    /// superseded are ignored.
    pub fn handle_timer(&mut self, token: TimerToken) {
        match self.pending_click.take() {
            Some(pending) if pending.token == token => {
                tracing::debug!("double-click window closed, firing click");
                if let Some(handler) = self.handler.as_mut() {
                    handler.click(&pending.event);
                }
            }
            other => {
                self.pending_click = other;
                tracing::trace!(token = token.0, "ignoring stale timer");
            }
        }
    }

    pub fn is_activated(&self) -> bool {
        self.is_activated
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// True between a first click and either its timer or a second click.
    pub fn has_pending_click(&self) -> bool {
        self.pending_click.is_some()
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn listeners(&self) -> Option<&L> {
        self.listeners.as_ref()
    }

    pub fn handler(&self) -> Option<&DragHandler<E>> {
        self.handler.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn handle_click(&mut self, event: &E) {
        let Some(handler) = self.handler.as_mut() else {
            return;
        };
        if !handler.wants_double_click() {
            tracing::debug!("click");
            handler.click(event);
            return;
        }
        if let Some(pending) = self.pending_click.take() {
            self.scheduler.cancel(pending.token);
            tracing::debug!("double click");
            handler.double_click(event);
            return;
        }
        self.last_token += 1;
        let token = TimerToken(self.last_token);
        match self
            .scheduler
            .schedule_once(token, self.config.double_click_timeout)
        {
            Ok(()) => {
                self.pending_click = Some(PendingClick {
                    token,
                    event: event.clone(),
                });
            }
            Err(e) => {
                // Without a timer the click can never be disambiguated
                tracing::warn!(error = %e, "could not arm double-click timer");
                handler.click(event);
            }
        }
    }

    fn attach_document_listeners(&mut self) {
        if self.document_listening {
            return;
        }
        if let Some(listeners) = self.listeners.as_mut() {
            listeners.listen_document();
            self.document_listening = true;
        }
    }

    fn detach_document_listeners(&mut self) {
        if !self.document_listening {
            return;
        }
        if let Some(listeners) = self.listeners.as_mut() {
            listeners.unlisten_document();
        }
        self.document_listening = false;
    }

    fn init_coordinates(&mut self, event: &E) {
        self.activation = [event.client_x(), event.client_y()];
        self.last = self.activation;
    }

    fn update_coordinates(&mut self, event: &E) -> CoordinateData {
        let current = [event.client_x(), event.client_y()];
        let data = CoordinateData::new(self.activation, self.last, current);
        self.last = current;
        data
    }
}

impl<E, L> DragEvents<E, L, ManualScheduler>
where
    E: PointerEvent + Clone,
    L: ListenerHost,
{
    /// Advance the manual clock and deliver every expired timer.
    pub fn advance_clock(&mut self, by: Duration) {
        for token in self.scheduler.advance(by) {
            self.handle_timer(token);
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::interactions::PointerSample;

    type Tracker = DragEvents<PointerSample, (), ManualScheduler>;

    #[test]
    fn test_default_timeout_is_500ms() {
        let tracker = Tracker::new(ManualScheduler::new());
        assert_eq!(tracker.config().double_click_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_events_ignored_before_attach() {
        let mut tracker = Tracker::new(ManualScheduler::new());
        let down = PointerSample::at(1.0, 1.0);
        tracker.handle_pointer_down(&down);
        assert!(!tracker.is_activated());
        assert!(!down.default_prevented());
    }

    #[test]
    fn test_secondary_button_does_not_activate() {
        let mut tracker = Tracker::new(ManualScheduler::new());
        tracker.attach((), DragHandler::new().on_click(|_| {}));
        tracker.handle_pointer_down(&PointerSample::at(1.0, 1.0).with_button(2));
        assert!(!tracker.is_activated());
    }

    #[test]
    fn test_is_additive() {
        assert!(Tracker::is_additive(&PointerSample::at(0.0, 0.0).with_ctrl()));
        assert!(Tracker::is_additive(&PointerSample::at(0.0, 0.0).with_meta()));
        assert!(!Tracker::is_additive(&PointerSample::at(0.0, 0.0)));
    }

    #[test]
    fn test_stale_timer_keeps_pending_click() {
        let mut tracker = Tracker::new(ManualScheduler::new());
        tracker.attach((), DragHandler::new().on_double_click(|_| {}));
        tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0));
        tracker.handle_pointer_up(&PointerSample::at(0.0, 0.0));
        assert!(tracker.has_pending_click());

        tracker.handle_timer(TimerToken(999));
        assert!(tracker.has_pending_click());
    }

    #[test]
    fn test_config_round_trips_as_millis() {
        let config: DragConfig = serde_json::from_str(r#"{"double_click_timeout":250}"#).unwrap();
        assert_eq!(config.double_click_timeout, Duration::from_millis(250));
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"double_click_timeout":250}"#
        );
    }
}
