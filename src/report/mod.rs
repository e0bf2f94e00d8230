//! Page output for a rendered map
//!
//! - **HTML**: standalone page with the map grid, a clickable legend and a
//!   label search box. No external assets.
//! - **JSON**: machine-readable export of the bounds, legend and tiles
//!
//! # Usage
//!
//! ```ignore
//! use mapsight::report;
//!
//! // Picks the format from the extension
//! report::generate("slot1.html", &page)?;  // HTML
//! report::generate("slot1.json", &page)?;  // JSON
//! ```

pub mod html;
pub mod json;

use crate::classify::DescriptorStyle;
use crate::grid::Grid;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Everything needed to write one map page.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    /// Where the map came from, shown under the title.
    pub source: String,
    pub styles: Vec<DescriptorStyle>,
    pub grid: Grid,
    /// Show raw X/Y coordinates along the top and left edges.
    pub axis_labels: bool,
}

impl Page {
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        styles: Vec<DescriptorStyle>,
        grid: Grid,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            styles,
            grid,
            axis_labels: false,
        }
    }

    pub fn with_axis_labels(mut self, axis_labels: bool) -> Self {
        self.axis_labels = axis_labels;
        self
    }
}

/// Write `page` to `path`, replacing any existing file. `.json` gets the JSON
/// export, anything else gets HTML.
pub fn generate<P: AsRef<Path>>(path: P, page: &Page) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = BufWriter::new(std::fs::File::create(path)?);

    match ext.as_str() {
        "json" => json::write(&mut file, page)?,
        _ => html::write(&mut file, page)?,
    }
    file.flush()
}

/// Cell and descriptor counts for a page
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total_cells: usize,
    pub occupied: usize,
    pub empty: usize,
    pub descriptors: usize,
}

impl Summary {
    pub fn from_page(page: &Page) -> Self {
        let occupied = page.grid.occupied_count();
        Self {
            total_cells: page.grid.cells().len(),
            occupied,
            empty: page.grid.cells().len() - occupied,
            descriptors: page.styles.len(),
        }
    }
}

/// Number of drawn cells per descriptor id.
pub fn descriptor_counts(grid: &Grid) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for occupant in grid.cells().iter().filter_map(|c| c.occupant.as_ref()) {
        *counts.entry(occupant.descriptor_id.as_str()).or_insert(0) += 1;
    }
    counts
}
