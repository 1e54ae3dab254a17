use thiserror::Error;

/// Failures raised while turning a zoom level and scene settings into a scale.
///
/// Missing settings are never an error (they resolve to defaults) and neither
/// is an overlay that has not been mounted yet.
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("invalid canvas zoom {0}: zoom must be finite and greater than zero")]
    InvalidZoom(f64),

    #[error("invalid zoom range [{floor}, {ceil}]: floor must be strictly below ceiling")]
    Configuration { floor: f64, ceil: f64 },

    #[error("setting `{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("malformed scene flags: {0}")]
    Flags(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScaleError>;
