//! CLI tool for tablegrid - resolves points against a saved table geometry
//!
//! Usage:
//!   tablegrid_cli <fixture.json> <x,y>...             # Probe points, JSON to stdout
//!   tablegrid_cli <fixture.json> --widest <column>    # Auto-fit width of a column
//!
//! Set `RUST_LOG=tablegrid=trace` to see lookup decisions on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::io::{self, Write};
use std::path::Path;

use tablegrid::fixture::{probe, PointProbe, TableFixture};

fn parse_point(arg: &str) -> Option<(f64, f64)> {
    let (x, y) = arg.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: tablegrid_cli <fixture.json> <x,y>... | --widest <column>");
        std::process::exit(1);
    }

    let fixture_path = &args[1];
    let fixture = match TableFixture::load(Path::new(fixture_path)) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading {}: {}", fixture_path, e);
            std::process::exit(1);
        }
    };
    let locator = fixture.into_locator();

    let json = if args[2] == "--widest" {
        let Some(column) = args.get(3).and_then(|c| c.parse::<u32>().ok()) else {
            eprintln!("--widest needs a column index");
            std::process::exit(1);
        };
        serde_json::json!({
            "column": column,
            "width": locator.widest_visible_cell_in_column(column),
        })
        .to_string()
    } else {
        let mut probes: Vec<PointProbe> = Vec::new();
        for arg in &args[2..] {
            match parse_point(arg) {
                Some((x, y)) => probes.push(probe(&locator, x, y)),
                None => {
                    eprintln!("Invalid point '{}', expected x,y", arg);
                    std::process::exit(1);
                }
            }
        }
        match serde_json::to_string_pretty(&probes) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing JSON: {}", e);
                std::process::exit(1);
            }
        }
    };

    io::stdout().write_all(json.as_bytes()).unwrap();
    println!();
}
