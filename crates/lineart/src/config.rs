use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Edge-detection parameters supplied by the GUI collaborator.
///
/// Every field has a defined default so callers never need to probe for
/// missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LineartConfig {
    /// Lower hysteresis threshold for the edge detector.
    #[schemars(range(min = 0.0, max = 255.0))]
    pub threshold_low: f32,

    /// Upper hysteresis threshold for the edge detector.
    #[schemars(range(min = 0.0, max = 255.0))]
    pub threshold_high: f32,

    /// Render dark strokes on a bright background instead of the detector's
    /// native bright-on-dark output.
    pub invert: bool,
}

impl Default for LineartConfig {
    fn default() -> Self {
        Self {
            threshold_low: 50.0,
            threshold_high: 150.0,
            invert: false,
        }
    }
}
