//! [`TableSurface`] backed by live DOM elements.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement};

use crate::error::{Result, TableError};
use crate::layout::Rect;
use crate::locator::{ScrollState, TableSurface};

/// Class names that tag rendered cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomSelectors {
    /// Body cells of column `n` carry class `{prefix}{n}`
    pub column_cell_class_prefix: String,
    /// Every column header cell carries this class
    pub column_header_class: String,
}

impl Default for DomSelectors {
    fn default() -> Self {
        Self {
            column_cell_class_prefix: "tbl-cell-col-".to_string(),
            column_header_class: "tbl-column-name".to_string(),
        }
    }
}

impl DomSelectors {
    fn column_query(&self, column: u32) -> String {
        format!(
            ".{}{column}, .{}",
            self.column_cell_class_prefix, self.column_header_class
        )
    }
}

/// Table root plus scrollable body, with an offscreen canvas for text metrics.
pub struct DomSurface {
    table: HtmlElement,
    body: HtmlElement,
    selectors: DomSelectors,
    measure: CanvasRenderingContext2d,
}

impl DomSurface {
    /// # Errors
    /// Returns an error if there is no document or no 2D canvas context.
    pub fn new(table: HtmlElement, body: HtmlElement, selectors: DomSelectors) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(TableError::MissingDom("document"))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| TableError::Dom("canvas element has unexpected type".to_string()))?;
        let measure: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(TableError::MissingDom("2d canvas context"))?
            .dyn_into()
            .map_err(|_| TableError::Dom("2d context has unexpected type".to_string()))?;
        Ok(Self {
            table,
            body,
            selectors,
            measure,
        })
    }

    pub fn set_selectors(&mut self, selectors: DomSelectors) {
        self.selectors = selectors;
    }

    /// Width of the element's text content rendered in its computed font.
    fn measure_text(&self, element: &Element) -> Option<f64> {
        let text = element.text_content().unwrap_or_default();
        let font = web_sys::window()
            .and_then(|w| w.get_computed_style(element).ok().flatten())
            .and_then(|style| style.get_property_value("font").ok());
        if let Some(font) = font.filter(|f| !f.is_empty()) {
            self.measure.set_font(&font);
        }
        self.measure.measure_text(&text).ok().map(|m| m.width())
    }
}

impl TableSurface for DomSurface {
    fn table_bounds(&self) -> Rect {
        Rect::wrap(&self.table.get_bounding_client_rect())
    }

    fn body_bounds(&self) -> Rect {
        Rect::wrap(&self.body.get_bounding_client_rect())
    }

    fn body_scroll(&self) -> ScrollState {
        ScrollState {
            scroll_left: f64::from(self.body.scroll_left()),
            scroll_top: f64::from(self.body.scroll_top()),
            client_width: f64::from(self.body.client_width()),
            client_height: f64::from(self.body.client_height()),
        }
    }

    fn measure_cells(&self, column: u32) -> Vec<f64> {
        let query = self.selectors.column_query(column);
        let nodes = match self.table.query_selector_all(&query) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!(query = %query, error = ?e, "cell query failed");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|element| self.measure_text(&element))
            .collect()
    }
}
