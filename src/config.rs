//! Override tables for descriptor colors and labels
//!
//! Overrides come from two places: the built-in table for the game's own
//! descriptors, and an optional JSON file:
//!
//! ```json
//! {
//!   "custom_colors": {"stone": "#3b3a3a"},
//!   "custom_labels": {"factorybubble": "Bubble Factory"}
//! }
//! ```
//!
//! Both keys are optional. File entries replace built-in ones.

use crate::classify::palette::is_hex_color;
use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_COLORS: &[(&str, &str)] = &[
    ("obsidian", "#120014"),
    ("stone", "#3b3a3a"),
    ("heart", "#FF0000"),
    ("claimed", "#0d9753"),
    ("enemyPath", "#f0f0f0"),
    ("stairs", "#FFFFFF"),
    ("gold", "#FFD700"),
    ("secretstonecarved", "#FFFF00"),
    ("secretbasement", "#A9A9A9"),
    ("infinitemine", "#D8BFD8"),
];

const BUILTIN_LABELS: &[(&str, &str)] = &[
    ("enemypath", "Enemy Path"),
    ("hornethive", "Hornet Hive"),
    ("secretbasement", "Secret Basement"),
    ("waterbridge", "Water Bridge"),
    ("beetlenest", "Beetle Nest"),
    ("factorybubble", "Bubble Factory"),
    ("stonemine", "Stone Mine"),
    ("enemypathmonastery", "Enemy Path Monastery"),
    ("enemypathdesert", "Enemy Path Desert"),
    ("heartcenter", "Heart Center"),
    ("heartcenternofloor", "Heart Center No Floor"),
    ("infinitemine", "Infinite Gold Mine"),
    ("portalcenter", "Portal Center"),
    ("portalbonefairy", "Portal Bone Fairy"),
    ("portalbonefairycenter", "Portal Bone Fairy Center"),
    ("sapperpath", "Sapper Path"),
    ("guardpost", "Guard Post"),
    ("secretobsidiancarved", "Secret Obsidian Carved"),
    ("secretstonecarved", "Secret Stone Carved"),
    ("secretstonesewer", "Secret Stone Sewer"),
];

/// Descriptor → color and descriptor → label tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub custom_colors: BTreeMap<String, String>,
    pub custom_labels: BTreeMap<String, String>,
}

impl Overrides {
    /// The game's own descriptors.
    pub fn builtin() -> Self {
        Self {
            custom_colors: table(BUILTIN_COLORS),
            custom_labels: table(BUILTIN_LABELS),
        }
    }

    /// Read an override file. Colors must be `#rgb` or `#rrggbb`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading overrides from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| match MapError::from_read(path, e) {
            MapError::FileNotFound { path } => MapError::ConfigNotFound { path },
            other => other,
        })?;

        let overrides: Overrides = serde_json::from_str(&text).map_err(|e| MapError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if let Some((id, color)) = overrides.custom_colors.iter().find(|(_, c)| !is_hex_color(c)) {
            return Err(MapError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("color for '{}' is not a hex color: {:?}", id, color),
            });
        }

        log::debug!(
            "Loaded {} color and {} label override(s)",
            overrides.custom_colors.len(),
            overrides.custom_labels.len()
        );
        Ok(overrides)
    }

    /// Layer `other` on top of `self`; its entries win.
    pub fn merge(mut self, other: Overrides) -> Self {
        self.custom_colors.extend(other.custom_colors);
        self.custom_labels.extend(other.custom_labels);
        self
    }

    pub fn color(&self, descriptor_id: &str) -> Option<&str> {
        self.custom_colors.get(descriptor_id).map(String::as_str)
    }

    pub fn label(&self, descriptor_id: &str) -> Option<&str> {
        self.custom_labels.get(descriptor_id).map(String::as_str)
    }
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
