// CSS helpers for HUD overlay transforms. Kept free of web-sys so the
// host-side tests can include this file directly.

pub const TRANSFORM_PROPERTY: &str = "transform";

/// CSS `transform` value for a uniform 2D scale, e.g. `scale(0.25)`.
///
/// The factor is written with `Display`, the shortest decimal that reads back
/// as the same `f64`, so small factors never collapse to `scale(0)`.
#[inline]
pub fn scale_transform(factor: f64) -> String {
    format!("scale({factor})")
}

/// Read the factor back out of a value produced by [`scale_transform`].
#[inline]
pub fn parse_scale_transform(value: &str) -> Option<f64> {
    value
        .trim()
        .strip_prefix("scale(")?
        .strip_suffix(')')?
        .trim()
        .parse()
        .ok()
}
