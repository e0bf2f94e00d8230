//! Load → classify → lay out → write, for one save file

use crate::classify::classify;
use crate::config::Overrides;
use crate::error::{MapError, Result};
use crate::grid::{Bounds, Grid};
use crate::loader::{load_map, Tile};
use crate::report::{self, Page};
use std::fs;
use std::path::{Path, PathBuf};

/// What a finished render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub tiles: usize,
    pub descriptors: usize,
    pub width: usize,
    pub height: usize,
    pub empty_cells: usize,
}

/// Renders save files to map pages.
///
/// ```no_run
/// use mapsight::{MapRenderer, Overrides};
///
/// let renderer = MapRenderer::new()
///     .with_overrides(Overrides::builtin())
///     .with_axis_labels(true);
/// let summary = renderer.render("slot1.json", "slot1.html")?;
/// println!("{} tiles, {} descriptors", summary.tiles, summary.descriptors);
/// # Ok::<(), mapsight::MapError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    pub overrides: Overrides,
    pub axis_labels: bool,
    /// Page heading; defaults to the save's file stem.
    pub title: Option<String>,
}

impl MapRenderer {
    /// A renderer with no overrides and no axis labels.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_axis_labels(mut self, axis_labels: bool) -> Self {
        self.axis_labels = axis_labels;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Render `save` into `output`, replacing whatever is there.
    ///
    /// The save is fully loaded and validated before `output` is opened, so a
    /// bad save leaves `output` untouched. An `output` that names the save
    /// itself is refused.
    pub fn render<S: AsRef<Path>, O: AsRef<Path>>(&self, save: S, output: O) -> Result<RenderSummary> {
        let save = save.as_ref();
        let output = output.as_ref();

        let tiles = load_map(save)?;
        if same_file(save, output) {
            return Err(MapError::OutputIsSave {
                path: output.to_path_buf(),
            });
        }
        let page = self.compose(save, &tiles)?;

        log::info!("Generating map page...");
        report::generate(output, &page).map_err(|e| MapError::Write {
            path: output.to_path_buf(),
            source: e,
        })?;
        log::info!("Map visualization saved as '{}'", output.display());

        Ok(RenderSummary {
            output: output.to_path_buf(),
            tiles: tiles.len(),
            descriptors: page.styles.len(),
            width: page.grid.width(),
            height: page.grid.height(),
            empty_cells: page.grid.empty_count(),
        })
    }

    /// Build the page for already-loaded tiles without writing anything.
    pub fn compose(&self, save: &Path, tiles: &[Tile]) -> Result<Page> {
        let bounds = Bounds::from_tiles(tiles).ok_or_else(|| MapError::EmptyMapData {
            path: save.to_path_buf(),
        })?;
        log::debug!(
            "Bounds x {}..={} y {}..={}",
            bounds.x_min,
            bounds.x_max,
            bounds.y_min,
            bounds.y_max
        );

        let styles = classify(tiles, &self.overrides);
        let grid = Grid::from_parts(bounds, tiles, &styles).ok_or_else(|| MapError::GridTooLarge {
            path: save.to_path_buf(),
            width: bounds.width(),
            height: bounds.height(),
        })?;
        let title = self.title.clone().unwrap_or_else(|| {
            save.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Map".to_string())
        });

        Ok(Page::new(title, save.display().to_string(), styles, grid).with_axis_labels(self.axis_labels))
    }
}

/// Both paths resolve to one existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TILES: &str =
        r#"{"Map":[{"X":0,"Y":0,"DescriptorID":"stone"},{"X":1,"Y":0,"DescriptorID":"gold"}]}"#;

    fn write_save(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    // ==========================================================================
    // END-TO-END RENDERING
    // ==========================================================================

    #[test]
    fn test_two_tile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let save = write_save(dir.path(), "slot1.json", TWO_TILES);
        let output = dir.path().join("slot1.html");

        let summary = MapRenderer::new().render(&save, &output).unwrap();

        assert_eq!(summary.tiles, 2);
        assert_eq!(summary.descriptors, 2);
        assert_eq!((summary.width, summary.height), (2, 1));
        assert_eq!(summary.empty_cells, 0);

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains(">Stone<"));
        assert!(html.contains(">Gold<"));
        assert!(html.contains("<title>slot1</title>"));
    }

    #[test]
    fn test_two_descriptors_get_distinct_colors() {
        let page = MapRenderer::new()
            .compose(Path::new("slot1.json"), &[Tile::new(0, 0, "stone"), Tile::new(1, 0, "gold")])
            .unwrap();
        assert_ne!(page.styles[0].color, page.styles[1].color);
    }

    #[test]
    fn test_sparse_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let save = write_save(
            dir.path(),
            "sparse.json",
            r#"{"Map":[{"X":0,"Y":0,"DescriptorID":"stone"},{"X":5,"Y":5,"DescriptorID":"heart"}]}"#,
        );

        let summary = MapRenderer::new().render(&save, dir.path().join("sparse.html")).unwrap();

        assert_eq!((summary.width, summary.height), (6, 6));
        assert_eq!(summary.empty_cells, 34);
    }

    #[test]
    fn test_custom_title() {
        let page = MapRenderer::new()
            .with_title(Some("Deep Level".into()))
            .compose(Path::new("slot1.json"), &[Tile::new(0, 0, "stone")])
            .unwrap();
        assert_eq!(page.title, "Deep Level");
    }

    // ==========================================================================
    // FAILURES LEAVE OUTPUT ALONE
    // ==========================================================================
    //
    // Nothing is created or overwritten when the save is rejected.
    // ==========================================================================

    #[test]
    fn test_empty_map_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let save = write_save(dir.path(), "empty.json", r#"{"Map":[]}"#);
        let output = dir.path().join("empty.html");

        let err = MapRenderer::new().render(&save, &output).unwrap_err();

        assert!(matches!(err, MapError::EmptyMapData { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_bad_save_keeps_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let save = write_save(dir.path(), "broken.json", "{not json");
        let output = dir.path().join("broken.html");
        fs::write(&output, "previous render").unwrap();

        let err = MapRenderer::new().render(&save, &output).unwrap_err();

        assert!(matches!(err, MapError::InvalidJson { .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous render");
    }

    #[test]
    fn test_missing_save() {
        let dir = tempfile::tempdir().unwrap();
        let err = MapRenderer::new()
            .render(dir.path().join("gone.json"), dir.path().join("gone.html"))
            .unwrap_err();
        assert!(matches!(err, MapError::FileNotFound { .. }));
    }

    #[test]
    fn test_oversized_bounds_rejected() {
        let tiles = [Tile::new(0, 0, "stone"), Tile::new(100_000, 100_000, "stone")];
        let err = MapRenderer::new().compose(Path::new("huge.json"), &tiles).unwrap_err();
        assert!(matches!(err, MapError::GridTooLarge { width: 100_001, .. }));
    }

    #[test]
    fn test_output_over_save_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let save = write_save(dir.path(), "slot1.json", TWO_TILES);

        let err = MapRenderer::new().render(&save, &save).unwrap_err();
        assert!(matches!(err, MapError::OutputIsSave { .. }));
        assert_eq!(fs::read_to_string(&save).unwrap(), TWO_TILES);

        // Same file through a different spelling of the path
        let indirect = dir.path().join(".").join("slot1.json");
        let err = MapRenderer::new().render(&save, &indirect).unwrap_err();
        assert!(matches!(err, MapError::OutputIsSave { .. }));
        assert_eq!(fs::read_to_string(&save).unwrap(), TWO_TILES);
    }

    #[test]
    fn test_json_export_next_to_save() {
        let dir = tempfile::tempdir().unwrap();
        let save = write_save(dir.path(), "slot1.json", TWO_TILES);
        let output = dir.path().join("slot1-export.json");

        MapRenderer::new().render(&save, &output).unwrap();
        assert_eq!(fs::read_to_string(&save).unwrap(), TWO_TILES);
        assert!(output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let save = write_save(dir.path(), "slot1.json", TWO_TILES);
        let output = dir.path().join("missing-dir").join("slot1.html");

        let err = MapRenderer::new().render(&save, &output).unwrap_err();
        assert!(matches!(err, MapError::Write { .. }));
    }
}
