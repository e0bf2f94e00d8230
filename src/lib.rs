//! Mapsight - Render dungeon map saves as interactive HTML pages
//!
//! Mapsight reads a game save (JSON), works out a color and label for every
//! kind of tile in it, and writes one standalone HTML page showing the map as
//! a grid with a clickable, searchable legend.
//!
//! # Overview
//!
//! A save lists its tiles under a `"Map"` key:
//!
//! ```json
//! {"Map": [{"X": 0, "Y": 0, "DescriptorID": "stone"},
//!          {"X": 1, "Y": 0, "DescriptorID": "hornetHive"}]}
//! ```
//!
//! Each distinct `DescriptorID` becomes one legend entry. Unless an override
//! says otherwise, its label is derived from the id (`hornetHive` →
//! `Hornet Hive`) and its color comes from a fixed 20-color palette by
//! first-seen position, so the same save always renders the same page.
//!
//! # Quick Start
//!
//! ```no_run
//! use mapsight::{MapRenderer, Overrides};
//!
//! let renderer = MapRenderer::new().with_overrides(Overrides::builtin());
//! match renderer.render("slot1.json", "slot1.html") {
//!     Ok(summary) => println!("{}x{} map written", summary.width, summary.height),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Load | [`loader`] | validated `Vec<Tile>` |
//! | Classify | [`classify`] | one [`DescriptorStyle`] per descriptor |
//! | Lay out | [`grid`] | dense [`Grid`] over the bounding box |
//! | Compose | [`report`] | HTML (or JSON) file on disk |
//!
//! # Modules
//!
//! - [`loader`]: save parsing and validation
//! - [`classify`]: descriptor labels and palette colors
//! - [`config`]: built-in and file-based override tables
//! - [`grid`]: bounding box and dense cell layout
//! - [`report`]: HTML page and JSON export
//! - [`saves`]: finding save files for the interactive picker
//! - [`render`]: the whole pipeline for one save

pub mod classify;
pub mod config;
pub mod error;
pub mod grid;
pub mod loader;
pub mod render;
pub mod report;
pub mod saves;

pub use classify::{classify, format_descriptor_id, DescriptorStyle};
pub use config::Overrides;
pub use error::{MapError, Result};
pub use grid::{Bounds, Cell, Grid};
pub use loader::{load_map, Tile};
pub use render::{MapRenderer, RenderSummary};
