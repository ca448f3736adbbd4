//! Table fixture tests
//!
//! Tests for loading saved table geometry, rejecting impossible values,
//! and replaying point probes off-browser.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::path::{Path, PathBuf};

use tablegrid::fixture::{probe, TableFixture};
use tablegrid::locator::{CellCoord, CELL_HORIZONTAL_PADDING};
use tablegrid::TableError;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn minimal_json(col_widths: &str) -> String {
    format!(
        r#"{{
            "col_widths": {col_widths},
            "row_heights": [20.0],
            "surface": {{
                "table": {{ "left": 0.0, "top": 0.0, "width": 100.0, "height": 20.0 }},
                "body": {{ "left": 0.0, "top": 0.0, "width": 100.0, "height": 20.0 }}
            }}
        }}"#
    )
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn test_load_scrolled_fixture() {
    let fixture = TableFixture::load(&fixture_path("scrolled_table.json")).unwrap();
    assert_eq!(fixture.col_widths, vec![10.0, 20.0, 30.0]);
    assert_eq!(fixture.surface.scroll.scroll_left, 15.0);
    assert_eq!(fixture.surface.cell_text_widths[&1].len(), 3);

    let grid = fixture.grid();
    assert_eq!(grid.width(), 60.0);
    assert_eq!(grid.height(), 30.0);
}

#[test]
fn test_optional_sections_default() {
    let fixture = TableFixture::from_json(&minimal_json("[50.0, 50.0]")).unwrap();
    assert_eq!(fixture.locator.cell_horizontal_padding, CELL_HORIZONTAL_PADDING);
    assert_eq!(fixture.surface.scroll.scroll_left, 0.0);
    assert!(fixture.surface.header_text_widths.is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = TableFixture::load(&fixture_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
}

#[test]
fn test_malformed_json_is_json_error() {
    let err = TableFixture::from_json("{ \"col_widths\": [1.0,").unwrap_err();
    assert!(matches!(err, TableError::Json(_)));
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_negative_width_is_rejected() {
    let err = TableFixture::from_json(&minimal_json("[50.0, -5.0]")).unwrap_err();
    match err {
        TableError::InvalidGeometry(msg) => assert_eq!(msg, "col_widths[1] is -5"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_negative_padding_is_rejected() {
    let mut fixture = TableFixture::from_json(&minimal_json("[50.0]")).unwrap();
    fixture.locator.cell_horizontal_padding = -1.0;
    assert!(matches!(
        fixture.validate(),
        Err(TableError::InvalidGeometry(_))
    ));
}

#[test]
fn test_non_finite_origin_is_rejected() {
    let mut fixture = TableFixture::from_json(&minimal_json("[50.0]")).unwrap();
    fixture.surface.body.left = f64::INFINITY;
    let err = fixture.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        TableError::InvalidGeometry("body origin is not finite".to_string()).to_string()
    );
}

// =============================================================================
// PROBES
// =============================================================================

#[test]
fn test_probe_inside_scrolled_table() {
    let locator = TableFixture::load(&fixture_path("scrolled_table.json"))
        .unwrap()
        .into_locator();
    let hit = probe(&locator, 100.0, 60.0);
    assert_eq!(hit.column, Some(1));
    assert_eq!(hit.row, Some(1));
    assert_eq!(hit.cell, CellCoord { col: 1, row: 1 });
}

#[test]
fn test_probe_outside_table_still_reports_clamped_cell() {
    let locator = TableFixture::load(&fixture_path("scrolled_table.json"))
        .unwrap()
        .into_locator();
    let miss = probe(&locator, 99.0, 95.0);
    assert_eq!(miss.column, None);
    assert_eq!(miss.row, None);
    assert_eq!(miss.cell, CellCoord { col: 1, row: 2 });

    let json = serde_json::to_value(miss).unwrap();
    assert!(json["column"].is_null());
    assert_eq!(json["cell"]["col"], 1);
}

#[test]
fn test_widest_cell_from_fixture() {
    let locator = TableFixture::load(&fixture_path("scrolled_table.json"))
        .unwrap()
        .into_locator();
    // Header text (40px) is wider than any body cell in column 1
    assert_eq!(locator.widest_visible_cell_in_column(1), 60);
}
