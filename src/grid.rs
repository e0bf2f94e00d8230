//! Dense grid layout of a sparse tile list
//!
//! Saves only list the tiles that exist, and coordinates can start anywhere
//! (including negative values). The grid fills the whole bounding box so the
//! page always shows a solid rectangle, with `Empty` cells where the save has
//! no tile.
//!
//! Cells are stored in display order: the first row is the highest Y, each
//! row runs from the lowest X to the highest, so the page reads like a
//! top-down view of the map. Cells keep their raw game coordinates.

use crate::classify::DescriptorStyle;
use crate::loader::Tile;
use serde::Serialize;
use std::collections::HashMap;

/// Color for a tile whose descriptor has no style.
const UNSTYLED_COLOR: &str = "#000000";

/// Largest bounding box we will lay out.
pub const MAX_CELLS: u64 = 4_000_000;

/// Inclusive bounding box of a tile list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

impl Bounds {
    /// `None` for an empty tile list.
    pub fn from_tiles(tiles: &[Tile]) -> Option<Self> {
        let first = tiles.first()?;
        let init = Bounds { x_min: first.x, x_max: first.x, y_min: first.y, y_max: first.y };
        Some(tiles.iter().fold(init, |b, t| Bounds {
            x_min: b.x_min.min(t.x),
            x_max: b.x_max.max(t.x),
            y_min: b.y_min.min(t.y),
            y_max: b.y_max.max(t.y),
        }))
    }

    pub fn width(&self) -> u64 {
        self.x_max.abs_diff(self.x_min).saturating_add(1)
    }

    pub fn height(&self) -> u64 {
        self.y_max.abs_diff(self.y_min).saturating_add(1)
    }

    /// Number of cells in the box, saturating instead of overflowing.
    pub fn area(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    /// Whether a grid over this box stays within [`MAX_CELLS`].
    pub fn fits(&self) -> bool {
        self.area() <= MAX_CELLS
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// The tile drawn in an occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupant {
    pub descriptor_id: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    pub occupant: Option<Occupant>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Row-major cells covering the bounding box, top row first.
#[derive(Debug, Clone)]
pub struct Grid {
    bounds: Bounds,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Lay out `tiles` using the colors in `styles`.
    ///
    /// When two tiles share a coordinate the later one is drawn. Returns `None`
    /// for an empty tile list or a box over [`MAX_CELLS`].
    pub fn build(tiles: &[Tile], styles: &[DescriptorStyle]) -> Option<Self> {
        let bounds = Bounds::from_tiles(tiles)?;
        Self::from_parts(bounds, tiles, styles)
    }

    /// Lay out `tiles` inside a box the caller already computed. Tiles outside
    /// `bounds` are left out. `None` when the box is over [`MAX_CELLS`].
    pub fn from_parts(bounds: Bounds, tiles: &[Tile], styles: &[DescriptorStyle]) -> Option<Self> {
        if !bounds.fits() {
            return None;
        }

        let colors: HashMap<&str, &str> = styles
            .iter()
            .map(|s| (s.descriptor_id.as_str(), s.color.as_str()))
            .collect();
        let by_coord: HashMap<(i64, i64), &Tile> = tiles.iter().map(|t| ((t.x, t.y), t)).collect();

        let width = bounds.width() as usize;
        let height = bounds.height() as usize;
        let mut cells = Vec::with_capacity(width * height);

        for y in (bounds.y_min..=bounds.y_max).rev() {
            for x in bounds.x_min..=bounds.x_max {
                let occupant = by_coord.get(&(x, y)).map(|tile| Occupant {
                    descriptor_id: tile.descriptor_id.clone(),
                    color: colors
                        .get(tile.descriptor_id.as_str())
                        .copied()
                        .unwrap_or(UNSTYLED_COLOR)
                        .to_string(),
                });
                cells.push(Cell { x, y, occupant });
            }
        }

        Some(Self { bounds, width, height, cells })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows from top (highest Y) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.occupied_count()
    }
}
