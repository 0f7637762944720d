use serde::{Deserialize, Serialize};

/// Fractional price change of a fund over a window, `0.05` meaning +5%.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeResult {
    pub code: String,
    pub change: f64,
}
