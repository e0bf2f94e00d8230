//! JSON export of a rendered map

use crate::classify::DescriptorStyle;
use crate::grid::Bounds;
use crate::report::{Page, Summary};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct Export<'a> {
    title: &'a str,
    source: &'a str,
    bounds: Bounds,
    width: usize,
    height: usize,
    summary: Summary,
    legend: &'a [DescriptorStyle],
    tiles: Vec<ExportTile<'a>>,
}

#[derive(Serialize)]
struct ExportTile<'a> {
    x: i64,
    y: i64,
    descriptor_id: &'a str,
}

/// Only occupied cells are listed, in display order.
pub fn write<W: Write>(writer: &mut W, page: &Page) -> io::Result<()> {
    let export = Export {
        title: &page.title,
        source: &page.source,
        bounds: page.grid.bounds(),
        width: page.grid.width(),
        height: page.grid.height(),
        summary: Summary::from_page(page),
        legend: &page.styles,
        tiles: page
            .grid
            .cells()
            .iter()
            .filter_map(|c| {
                c.occupant.as_ref().map(|o| ExportTile {
                    x: c.x,
                    y: c.y,
                    descriptor_id: &o.descriptor_id,
                })
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Tile;
    use crate::report::tests::page_for;
    use serde_json::Value;

    fn export(tiles: &[Tile]) -> Value {
        let mut out = Vec::new();
        write(&mut out, &page_for(tiles)).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_export_shape() {
        let v = export(&[Tile::new(0, 0, "stone"), Tile::new(5, 5, "hornetHive")]);

        assert_eq!(v["width"], 6);
        assert_eq!(v["height"], 6);
        assert_eq!(v["bounds"]["y_max"], 5);
        assert_eq!(v["summary"]["empty"], 34);
        assert_eq!(v["legend"][1]["label"], "Hornet Hive");
        assert_eq!(v["tiles"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_tiles_in_display_order() {
        let v = export(&[Tile::new(0, 0, "low"), Tile::new(0, 3, "high")]);
        assert_eq!(v["tiles"][0]["descriptor_id"], "high");
        assert_eq!(v["tiles"][1]["descriptor_id"], "low");
    }
}
