//! JavaScript-facing classes (wasm32 only).
//!
//! `Locator` and `DragEvents` mirror the Rust API with camelCase names.
//! Lookups that miss return `-1` instead of `undefined` so callers can keep
//! integer-only code paths.
//!
//! ```javascript
//! import init, { DragEvents, Locator } from 'tablegrid';
//! await init();
//! const locator = new Locator(tableEl, bodyEl, colWidths, rowHeights);
//! const drag = new DragEvents();
//! drag.attach(headerEl, {
//!   onDragMove: (event, coords) => resize(locator.convertPointToColumn(event.clientX), coords.delta[0]),
//!   onDoubleClick: (event) => autofit(locator.convertPointToColumn(event.clientX)),
//! });
//! ```

mod dom_surface;
mod listeners;

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use crate::interactions::{CoordinateData, DragConfig, DragEvents, DragHandler};
use crate::layout::Grid;
use crate::locator::Locator;

pub use dom_surface::{DomSelectors, DomSurface};
use listeners::{Deferred, DomListeners, DomScheduler, DragCell, SharedDrag};

fn index_or_sentinel(index: Option<u32>) -> i32 {
    index.map_or(-1, |i| i32::try_from(i).unwrap_or(i32::MAX))
}

/// Coordinate lookups for a rendered table
#[wasm_bindgen(js_name = Locator)]
pub struct JsLocator {
    inner: Locator<DomSurface>,
}

#[wasm_bindgen(js_class = Locator)]
impl JsLocator {
    /// Bind to a table root and its scrollable body.
    ///
    /// # Errors
    /// Returns an error if no canvas context is available for text measurement.
    #[wasm_bindgen(constructor)]
    pub fn new(
        table: HtmlElement,
        body: HtmlElement,
        col_widths: Vec<f64>,
        row_heights: Vec<f64>,
    ) -> Result<JsLocator, JsValue> {
        console_error_panic_hook::set_once();
        let surface = DomSurface::new(table, body, DomSelectors::default())?;
        Ok(JsLocator {
            inner: Locator::new(surface, Grid::new(row_heights, col_widths)),
        })
    }

    /// Override the class names used to find rendered cells.
    ///
    /// # Errors
    /// Returns an error if `selectors` does not deserialize.
    #[wasm_bindgen(js_name = setSelectors)]
    pub fn set_selectors(&mut self, selectors: JsValue) -> Result<(), JsValue> {
        let selectors: DomSelectors = serde_wasm_bindgen::from_value(selectors)?;
        self.inner.surface_mut().set_selectors(selectors);
        Ok(())
    }

    #[wasm_bindgen(js_name = setGrid)]
    pub fn set_grid(&mut self, col_widths: Vec<f64>, row_heights: Vec<f64>) {
        self.inner.set_grid(Grid::new(row_heights, col_widths));
    }

    /// # Errors
    /// Returns an error if the rect cannot be converted to a JS object.
    #[wasm_bindgen(js_name = getViewportRect)]
    pub fn viewport_rect(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.viewport_rect())?)
    }

    #[wasm_bindgen(js_name = getWidestVisibleCellInColumn)]
    pub fn widest_visible_cell_in_column(&self, column_index: u32) -> u32 {
        self.inner.widest_visible_cell_in_column(column_index)
    }

    #[wasm_bindgen(js_name = convertPointToColumn)]
    pub fn convert_point_to_column(&self, client_x: f64) -> i32 {
        index_or_sentinel(self.inner.convert_point_to_column(client_x))
    }

    #[wasm_bindgen(js_name = convertPointToRow)]
    pub fn convert_point_to_row(&self, client_y: f64) -> i32 {
        index_or_sentinel(self.inner.convert_point_to_row(client_y))
    }

    /// # Errors
    /// Returns an error if the cell cannot be converted to a JS object.
    #[wasm_bindgen(js_name = convertPointToCell)]
    pub fn convert_point_to_cell(
        &self,
        client_x: f64,
        client_y: f64,
    ) -> Result<JsValue, JsValue> {
        let cell = self.inner.convert_point_to_cell(client_x, client_y);
        Ok(serde_wasm_bindgen::to_value(&cell)?)
    }
}

/// Pointer gesture tracker for one element at a time
#[wasm_bindgen(js_name = DragEvents)]
pub struct JsDragEvents {
    state: SharedDrag,
}

impl Default for JsDragEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = DragEvents)]
impl JsDragEvents {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsDragEvents {
        console_error_panic_hook::set_once();
        Self::with_config(DragConfig::default())
    }

    /// Create a tracker with a custom double-click timeout.
    #[wasm_bindgen(js_name = withDoubleClickTimeout)]
    pub fn with_double_click_timeout(millis: u32) -> JsDragEvents {
        Self::with_config(DragConfig {
            double_click_timeout: std::time::Duration::from_millis(u64::from(millis)),
        })
    }

    fn with_config(config: DragConfig) -> JsDragEvents {
        let state = Rc::new_cyclic(|weak| {
            DragCell::new(DragEvents::with_config(DomScheduler::new(weak.clone()), config))
        });
        JsDragEvents { state }
    }

    /// True if the event has the ctrl or meta key held.
    #[wasm_bindgen(js_name = isAdditive)]
    pub fn is_additive(event: &MouseEvent) -> bool {
        listeners::DomDragEvents::is_additive(event)
    }

    /// Attach to `element`, replacing any previous attachment.
    ///
    /// `handler` may define any of `onActivate`, `onDragMove`, `onDragEnd`,
    /// `onClick` and `onDoubleClick`. Called from inside one of those
    /// callbacks, the switch happens once the callback returns.
    ///
    /// # Errors
    /// Returns an error when the element has no document.
    pub fn attach(&self, element: HtmlElement, handler: JsValue) -> Result<(), JsValue> {
        let listeners = DomListeners::new(element, &Rc::downgrade(&self.state))?;
        self.state.request(Deferred::Attach(listeners, handler_from_js(&handler)));
        Ok(())
    }

    /// Remove all listeners and drop any pending click. Safe to call from
    /// inside a handler callback.
    pub fn detach(&self) {
        self.state.request(Deferred::Detach);
    }
}

impl Drop for JsDragEvents {
    fn drop(&mut self) {
        // Listener closures die with the tracker; unregister them first
        self.state.request(Deferred::Detach);
    }
}

fn js_callback(handler: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(handler, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn report(name: &str, result: Result<JsValue, JsValue>) -> Option<JsValue> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(callback = name, error = ?e, "drag handler threw");
            None
        }
    }
}

fn coords_to_js(name: &str, coords: &CoordinateData) -> Option<JsValue> {
    report(name, serde_wasm_bindgen::to_value(coords).map_err(JsValue::from))
}

/// Wrap the functions found on a JS handler object.
///
/// `onActivate` vetoes the gesture by returning exactly `false` or by
/// throwing; any other return value, `undefined` included, proceeds.
fn handler_from_js(handler: &JsValue) -> DragHandler<MouseEvent> {
    let mut out = DragHandler::new();
    if let Some(f) = js_callback(handler, "onActivate") {
        let this = handler.clone();
        out = out.on_activate(move |event| match report("onActivate", f.call1(&this, event)) {
            Some(result) => result.as_bool() != Some(false),
            None => false,
        });
    }
    if let Some(f) = js_callback(handler, "onDragMove") {
        let this = handler.clone();
        out = out.on_drag_move(move |event, coords| {
            if let Some(coords) = coords_to_js("onDragMove", coords) {
                report("onDragMove", f.call2(&this, event, &coords));
            }
        });
    }
    if let Some(f) = js_callback(handler, "onDragEnd") {
        let this = handler.clone();
        out = out.on_drag_end(move |event, coords| {
            if let Some(coords) = coords_to_js("onDragEnd", coords) {
                report("onDragEnd", f.call2(&this, event, &coords));
            }
        });
    }
    if let Some(f) = js_callback(handler, "onClick") {
        let this = handler.clone();
        out = out.on_click(move |event| {
            report("onClick", f.call1(&this, event));
        });
    }
    if let Some(f) = js_callback(handler, "onDoubleClick") {
        let this = handler.clone();
        out = out.on_double_click(move |event| {
            report("onDoubleClick", f.call1(&this, event));
        });
    }
    out
}
