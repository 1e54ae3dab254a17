//! Zoom-to-scale math for pins and HUD overlays.
//!
//! The canvas already scales everything drawn on it by `zoom`. Pins undo that
//! with a reciprocal and then follow the user's min/max curve; HUDs undo it
//! and apply a flat multiplier. The two paths are intentionally different.

use crate::config::SceneScaleConfig;
use crate::error::{Result, ScaleError};
use crate::range::map_range;

#[inline]
fn check_zoom(zoom: f64) -> Result<f64> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(zoom)
    } else {
        Err(ScaleError::InvalidZoom(zoom))
    }
}

/// Position of `zoom` on the configured pin curve, before reciprocal compensation.
pub fn note_scale_factor(zoom: f64, config: &SceneScaleConfig) -> Result<f64> {
    let zoom = check_zoom(zoom)?;
    let zoom_range = config.zoom_range()?;
    let clamped = zoom_range.clamp(zoom);
    Ok(map_range(zoom_range, config.scale_range(), clamped))
}

/// Scale written to a pin's transform at the given canvas zoom.
pub fn note_scale_configured(zoom: f64, config: &SceneScaleConfig) -> Result<f64> {
    let factor = note_scale_factor(zoom, config)?;
    Ok(factor / zoom)
}

/// Scale written to a HUD overlay at the given canvas zoom.
pub fn hud_scale_factor(zoom: f64, config: &SceneScaleConfig) -> Result<f64> {
    let zoom = check_zoom(zoom)?;
    Ok(config.hud_scale / zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasLimits;

    fn curve() -> SceneScaleConfig {
        SceneScaleConfig {
            enable: true,
            zoom_floor: 0.1,
            zoom_ceil: 2.0,
            min_scale: 1.0,
            max_scale: 0.5,
            hud_scale: 1.0,
        }
    }

    #[test]
    fn ceiling_zoom_hits_max_scale() {
        let cfg = curve();
        assert!((note_scale_factor(2.0, &cfg).unwrap() - 0.5).abs() < 1e-12);
        assert!((note_scale_configured(2.0, &cfg).unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn below_floor_clamps_before_reciprocal() {
        let cfg = curve();
        assert!((note_scale_factor(0.05, &cfg).unwrap() - 1.0).abs() < 1e-12);
        assert!((note_scale_configured(0.05, &cfg).unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn default_config_at_unit_zoom_is_identity() {
        let cfg = SceneScaleConfig::defaults(CanvasLimits::default());
        assert!((note_scale_configured(1.0, &cfg).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_and_negative_zoom_fail_fast() {
        let cfg = curve();
        for zoom in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                note_scale_configured(zoom, &cfg),
                Err(ScaleError::InvalidZoom(_))
            ));
            assert!(matches!(
                hud_scale_factor(zoom, &cfg),
                Err(ScaleError::InvalidZoom(_))
            ));
        }
    }

    #[test]
    fn hand_built_degenerate_range_is_caught() {
        let mut cfg = curve();
        cfg.zoom_ceil = cfg.zoom_floor;
        assert!(matches!(
            note_scale_factor(1.0, &cfg),
            Err(ScaleError::Configuration { .. })
        ));
    }
}
