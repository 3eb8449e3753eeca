//! Built-in biome palette covering `[0, 1)`.

use tracing::error;

use super::{BiomeData, BiomeTable};

/// `(lower, upper, group, label, color)` for the standard palette.
const STANDARD_BIOMES: [(f64, f64, &str, &str, &str); 13] = [
    (0.00, 0.08, "Liquid", "Ocean", "#4292c4"),
    (0.08, 0.11, "Liquid", "Sea Water", "#4c9ccd"),
    (0.11, 0.14, "Liquid", "Shallows", "#51a5d8"),
    (0.14, 0.17, "Liquid", "Lagoon", "#56aade"),
    (0.17, 0.22, "Coast", "Coast", "#c5ac6d"),
    (0.22, 0.25, "Coast", "Sandy Beach", "#ccb475"),
    (0.25, 0.28, "Coast", "Coral Reef", "#d2ba7d"),
    (0.28, 0.34, "Fields", "Green Fields", "#67c72b"),
    (0.34, 0.46, "Fields", "Meadows", "#5dbc21"),
    (0.46, 0.65, "Fields", "Wide Fields", "#56ae1e"),
    (0.65, 0.72, "Mounts", "Mountains", "#333333"),
    (0.72, 0.79, "Mounts", "High Mountains", "#444444"),
    (0.79, 1.00, "Mounts", "Snowy Peaks", "#555555"),
];

impl BiomeTable {
    /// Thirteen biomes from deep ocean to snowy peaks.
    pub fn standard() -> Self {
        let mut table = BiomeTable::new();
        for (lower, upper, group, label, color) in STANDARD_BIOMES {
            let data = BiomeData::new(group, color).with_display_name(label);
            // Static bounds are all valid, non-empty sub-ranges of [0, 1].
            if let Err(err) = table.push(lower, upper, data) {
                error!(%err, "invalid standard biome range");
            }
        }
        table
    }
}
