//! Standalone HTML map page with an interactive legend

use crate::grid::Cell;
use crate::report::{descriptor_counts, Page, Summary};
use std::io::{self, Write};

/// Cell edge in pixels.
const CELL_SIZE: u32 = 20;

/// Legend click-to-highlight, color pickers and label search.
const SCRIPT: &str = r#"
        const legendItems = document.querySelectorAll('.legend-item');
        const mapCells = document.querySelectorAll('.map-cell');
        const searchForm = document.getElementById('legend-search');
        const searchInput = document.getElementById('legend-search-input');
        let activeDescriptor = null;

        function clearHighlight() {
            mapCells.forEach(cell => cell.classList.remove('dimmed', 'highlight'));
            legendItems.forEach(item => item.classList.remove('active'));
            activeDescriptor = null;
        }

        function highlight(descriptor) {
            mapCells.forEach(cell => {
                if (cell.dataset.descriptor === descriptor) {
                    cell.classList.add('highlight');
                    cell.classList.remove('dimmed');
                } else {
                    cell.classList.add('dimmed');
                    cell.classList.remove('highlight');
                }
            });
            legendItems.forEach(item => {
                item.classList.toggle('active', item.dataset.descriptor === descriptor);
            });
            activeDescriptor = descriptor;
        }

        legendItems.forEach(item => {
            item.addEventListener('click', event => {
                if (event.target.classList.contains('color-picker')) {
                    return;
                }
                const descriptor = item.dataset.descriptor;
                if (activeDescriptor === descriptor) {
                    clearHighlight();
                } else {
                    highlight(descriptor);
                }
            });
        });

        // Recolor is page-local; nothing is saved
        document.querySelectorAll('.color-picker').forEach(picker => {
            picker.addEventListener('input', () => {
                const descriptor = picker.dataset.descriptor;
                picker.parentElement.querySelector('.legend-color').style.backgroundColor = picker.value;
                mapCells.forEach(cell => {
                    if (cell.dataset.descriptor === descriptor) {
                        cell.style.backgroundColor = picker.value;
                    }
                });
            });
        });

        searchForm.addEventListener('submit', event => {
            event.preventDefault();
            const query = searchInput.value.trim().toLowerCase();
            if (query === '') {
                clearHighlight();
                return;
            }
            const match = Array.from(legendItems).find(item =>
                item.querySelector('.legend-label').textContent.trim().toLowerCase() === query
            );
            if (match) {
                highlight(match.dataset.descriptor);
                match.scrollIntoView({ block: 'nearest' });
            } else {
                alert('No legend entry named "' + searchInput.value.trim() + '"');
            }
        });
"#;

/// Render the whole page into a string.
pub fn render(page: &Page) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write(&mut out, page);
    String::from_utf8_lossy(&out).into_owned()
}

pub fn write<W: Write>(writer: &mut W, page: &Page) -> io::Result<()> {
    let summary = Summary::from_page(page);
    let axis = usize::from(page.axis_labels);
    let columns = page.grid.width() + axis;
    let rows = page.grid.height() + axis;

    let map_html = build_map_html(page);
    let legend_html = build_legend_html(page);

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
            margin: 0;
            padding: 0;
            display: flex;
            flex-direction: column;
            align-items: center;
            background-color: #f0f0f0;
        }}
        h1 {{ margin: 20px 0 4px; }}
        .subtitle {{ color: #666; font-size: 0.9rem; margin-bottom: 4px; }}
        .stats {{ color: #444; font-size: 0.85rem; margin-bottom: 20px; }}
        .container {{
            display: flex;
            flex-direction: row;
            align-items: flex-start;
            margin-bottom: 20px;
        }}
        .map-grid {{
            display: grid;
            grid-template-rows: repeat({rows}, {cell}px);
            grid-template-columns: repeat({columns}, {cell}px);
            gap: 1px;
            background-color: #333;
            border: 2px solid #333;
        }}
        .map-cell {{
            width: {cell}px;
            height: {cell}px;
            box-sizing: border-box;
            transition: opacity 0.3s;
            border: 1px solid #ccc;
        }}
        .map-cell.empty {{ background-color: #fff; }}
        .axis-label {{
            width: {cell}px;
            height: {cell}px;
            font-size: 8px;
            line-height: {cell}px;
            text-align: center;
            color: #eee;
            overflow: hidden;
        }}
        .legend {{
            margin-left: 20px;
            display: flex;
            flex-direction: column;
        }}
        .legend h2 {{ margin-bottom: 10px; }}
        #legend-search {{ display: flex; gap: 6px; margin-bottom: 14px; }}
        #legend-search-input {{ flex: 1; padding: 4px 6px; }}
        .legend-item {{
            display: flex;
            align-items: center;
            gap: 10px;
            margin-bottom: 10px;
            cursor: pointer;
            transition: transform 0.2s;
        }}
        .legend-item:hover {{ transform: scale(1.05); }}
        .legend-item.active .legend-label {{ font-weight: bold; }}
        .legend-color {{
            width: {cell}px;
            height: {cell}px;
            border: 1px solid #000;
        }}
        .legend-count {{ color: #777; font-size: 0.8rem; }}
        .color-picker {{ width: 28px; height: 22px; padding: 0; border: none; background: none; }}
        .highlight {{ opacity: 1 !important; }}
        .dimmed {{ opacity: 0.2; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <div class="subtitle">{source}</div>
    <div class="stats">{width} &times; {height} cells &middot; {occupied} tiles &middot; {empty} empty &middot; {descriptors} descriptors</div>
    <div class="container">
{map_html}
        <div class="legend">
            <h2>Legend</h2>
            <form id="legend-search">
                <input type="text" id="legend-search-input" placeholder="Search labels">
                <button type="submit">Find</button>
            </form>
{legend_html}
        </div>
    </div>
    <script>{script}    </script>
</body>
</html>
"#,
        title = html_escape(&page.title),
        source = html_escape(&page.source),
        rows = rows,
        columns = columns,
        cell = CELL_SIZE,
        width = page.grid.width(),
        height = page.grid.height(),
        occupied = summary.occupied,
        empty = summary.empty,
        descriptors = summary.descriptors,
        map_html = map_html,
        legend_html = legend_html,
        script = SCRIPT,
    )?;
    Ok(())
}

fn build_map_html(page: &Page) -> String {
    let grid = &page.grid;
    let mut lines = Vec::with_capacity(grid.cells().len() + grid.height() + grid.width() + 2);
    lines.push(r#"        <div class="map-grid">"#.to_string());

    if page.axis_labels {
        lines.push(r#"<div class="axis-label"></div>"#.to_string());
        let bounds = grid.bounds();
        for x in bounds.x_min..=bounds.x_max {
            lines.push(format!(r#"<div class="axis-label">{}</div>"#, x));
        }
    }

    for row in grid.rows() {
        if page.axis_labels {
            if let Some(first) = row.first() {
                lines.push(format!(r#"<div class="axis-label">{}</div>"#, first.y));
            }
        }
        lines.extend(row.iter().map(cell_html));
    }

    lines.push("        </div>".to_string());
    lines.join("\n")
}

fn cell_html(cell: &Cell) -> String {
    match &cell.occupant {
        Some(o) => format!(
            r#"<div class="map-cell" data-descriptor="{id}" data-x="{x}" data-y="{y}" title="({x}, {y})" style="background-color: {color};"></div>"#,
            id = html_escape(&o.descriptor_id),
            x = cell.x,
            y = cell.y,
            color = html_escape(&o.color),
        ),
        None => format!(
            r#"<div class="map-cell empty" data-x="{x}" data-y="{y}" title="({x}, {y})"></div>"#,
            x = cell.x,
            y = cell.y,
        ),
    }
}

fn build_legend_html(page: &Page) -> String {
    let counts = descriptor_counts(&page.grid);
    page.styles
        .iter()
        .map(|s| {
            let id = html_escape(&s.descriptor_id);
            format!(
                r#"            <div class="legend-item" data-descriptor="{id}">
                <span class="legend-color" style="background-color: {color};"></span>
                <span class="legend-label">{label}</span>
                <span class="legend-count">{count}</span>
                <input type="color" class="color-picker" data-descriptor="{id}" value="{picker}">
            </div>"#,
                id = id,
                color = html_escape(&s.color),
                label = html_escape(&s.label),
                count = counts.get(s.descriptor_id.as_str()).copied().unwrap_or(0),
                picker = picker_value(&s.color),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `<input type="color">` only accepts lowercase `#rrggbb`.
fn picker_value(color: &str) -> String {
    let hex = color.trim_start_matches('#').to_ascii_lowercase();
    match hex.len() {
        3 if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("#{}", expanded)
        }
        6 if hex.chars().all(|c| c.is_ascii_hexdigit()) => format!("#{}", hex),
        _ => "#000000".to_string(),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
