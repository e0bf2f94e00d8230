//! Descriptor classification
//!
//! Every distinct `DescriptorID` in a save gets a [`DescriptorStyle`]: a color
//! for the map and legend, and a label for the legend.
//!
//! # Assignment rules
//!
//! Descriptors are taken in the order they are first seen in the tile list.
//! For each one:
//!
//! - **Label**: the override label if the override table has one, otherwise
//!   [`format_descriptor_id`] (`hornetHive` → `Hornet Hive`).
//! - **Color**: the override color if present, otherwise swatch
//!   `position % 20` of the [`palette::TAB20`] palette.
//!
//! The result depends only on the ordered descriptor list and the override
//! table, so rendering the same save twice gives the same page.

pub mod label;
pub mod palette;

pub use label::format_descriptor_id;
pub use palette::palette_color;

use crate::config::Overrides;
use crate::loader::Tile;
use serde::Serialize;
use std::collections::HashSet;

/// Color and label for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorStyle {
    pub descriptor_id: String,
    pub color: String,
    pub label: String,
}

/// Distinct descriptor ids in first-seen order.
pub fn unique_descriptors(tiles: &[Tile]) -> Vec<&str> {
    let mut seen = HashSet::new();
    tiles
        .iter()
        .map(|t| t.descriptor_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Build the style of every descriptor in `tiles`.
pub fn classify(tiles: &[Tile], overrides: &Overrides) -> Vec<DescriptorStyle> {
    unique_descriptors(tiles)
        .into_iter()
        .enumerate()
        .map(|(position, id)| DescriptorStyle {
            descriptor_id: id.to_string(),
            color: overrides
                .color(id)
                .map(str::to_string)
                .unwrap_or_else(|| palette_color(position).to_string()),
            label: overrides
                .label(id)
                .map(str::to_string)
                .unwrap_or_else(|| format_descriptor_id(id)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(ids: &[&str]) -> Vec<Tile> {
        ids.iter().enumerate().map(|(i, id)| Tile::new(i as i64, 0, *id)).collect()
    }

    // ==========================================================================
    // ORDERING & UNIQUENESS
    // ==========================================================================

    #[test]
    fn test_unique_in_first_seen_order() {
        let t = tiles(&["stone", "gold", "stone", "heart", "gold"]);
        assert_eq!(unique_descriptors(&t), vec!["stone", "gold", "heart"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(classify(&[], &Overrides::default()).is_empty());
    }

    // ==========================================================================
    // AUTO-GENERATED STYLES
    // ==========================================================================

    #[test]
    fn test_auto_colors_follow_position() {
        let styles = classify(&tiles(&["stone", "gold", "hornetHive"]), &Overrides::default());

        assert_eq!(styles[0].color, palette::TAB20[0]);
        assert_eq!(styles[1].color, palette::TAB20[1]);
        assert_eq!(styles[2].color, palette::TAB20[2]);
        assert_eq!(styles[2].label, "Hornet Hive");
    }

    #[test]
    fn test_colors_cycle_past_palette() {
        let ids: Vec<String> = (0..25).map(|i| format!("kind{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let styles = classify(&tiles(&refs), &Overrides::default());

        assert_eq!(styles.len(), 25);
        assert_eq!(styles[21].color, styles[1].color);
    }

    #[test]
    fn test_deterministic() {
        let t = tiles(&["claimed", "stone", "enemyPath", "stairs", "claimed"]);
        let overrides = Overrides::builtin();
        assert_eq!(classify(&t, &overrides), classify(&t, &overrides));
    }

    // ==========================================================================
    // OVERRIDES
    // ==========================================================================
    //
    // Override values are used verbatim and never replaced by generated ones.
    // ==========================================================================

    #[test]
    fn test_override_color_and_label() {
        let mut overrides = Overrides::default();
        overrides.custom_colors.insert("gold".into(), "#FFD700".into());
        overrides.custom_labels.insert("factorybubble".into(), "Bubble Factory".into());

        let styles = classify(&tiles(&["stone", "gold", "factorybubble"]), &overrides);

        assert_eq!(styles[1].color, "#FFD700");
        assert_eq!(styles[1].label, "Gold");
        assert_eq!(styles[2].label, "Bubble Factory");
        assert_eq!(styles[2].color, palette::TAB20[2]);
    }

    #[test]
    fn test_override_keeps_palette_positions() {
        // An overridden descriptor still occupies its palette slot
        let mut overrides = Overrides::default();
        overrides.custom_colors.insert("stone".into(), "#3b3a3a".into());

        let styles = classify(&tiles(&["stone", "gold"]), &overrides);
        assert_eq!(styles[0].color, "#3b3a3a");
        assert_eq!(styles[1].color, palette::TAB20[1]);
    }

    #[test]
    fn test_override_lookup_is_exact() {
        let mut overrides = Overrides::default();
        overrides.custom_labels.insert("enemypath".into(), "Enemy Path".into());

        let styles = classify(&tiles(&["enemyPath"]), &overrides);
        // Not an override hit, but the generated label happens to agree
        assert_eq!(styles[0].label, "Enemy Path");
        assert_eq!(styles[0].color, palette::TAB20[0]);
    }
}
