//! Per-scene settings read from the host's flag bag.
//!
//! The host stores our record at `flags.<MODULE_ID>` on each scene and owns
//! its persistence. Everything here is a pure read: callers re-read on every
//! event so edits made through the settings form apply immediately.

use crate::constants::*;
use crate::error::{Result, ScaleError};
use crate::range::Range;
use serde::Deserialize;
use serde_json::Value;

/// Zoom limits reported by the host canvas. Only used to fill in defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CanvasLimits {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Typed view of a scene's pin-scaling settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneScaleConfig {
    pub enable: bool,
    pub zoom_floor: f64,
    pub zoom_ceil: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub hud_scale: f64,
}

// Shape of the stored record. Every field is optional; `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    #[serde(default)]
    enable: Option<Value>,
    #[serde(default)]
    zoom_floor: Option<f64>,
    #[serde(default)]
    zoom_ceil: Option<f64>,
    #[serde(default)]
    min_scale: Option<f64>,
    #[serde(default)]
    max_scale: Option<f64>,
    #[serde(default)]
    hud_scale: Option<f64>,
}

impl SceneScaleConfig {
    /// The record a scene implicitly has before anyone opens the settings form.
    pub fn defaults(limits: CanvasLimits) -> Self {
        Self {
            enable: false,
            zoom_floor: limits.min_zoom,
            zoom_ceil: limits.max_zoom,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            hud_scale: DEFAULT_HUD_SCALE,
        }
    }

    /// Read the record and fill absent fields, without validating the values.
    ///
    /// Fails only when a stored field has the wrong JSON type.
    pub fn read(flags: &Value, limits: CanvasLimits) -> Result<Self> {
        let stored = match namespace(flags) {
            Some(record) => StoredSettings::deserialize(record)?,
            None => StoredSettings::default(),
        };
        let base = Self::defaults(limits);
        Ok(Self {
            enable: stored.enable.as_ref().is_some_and(is_truthy),
            zoom_floor: stored.zoom_floor.unwrap_or(base.zoom_floor),
            zoom_ceil: stored.zoom_ceil.unwrap_or(base.zoom_ceil),
            min_scale: stored.min_scale.unwrap_or(base.min_scale),
            max_scale: stored.max_scale.unwrap_or(base.max_scale),
            hud_scale: stored.hud_scale.unwrap_or(base.hud_scale),
        })
    }

    /// Read the record, apply defaults field by field, then validate once.
    pub fn parse(flags: &Value, limits: CanvasLimits) -> Result<Self> {
        let config = Self::read(flags, limits)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("zoomFloor", self.zoom_floor),
            ("zoomCeil", self.zoom_ceil),
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
            ("hudScale", self.hud_scale),
        ] {
            if !value.is_finite() {
                return Err(ScaleError::NonFinite { field, value });
            }
        }
        self.zoom_range().map(|_| ())
    }

    /// Checks only what HUD compensation reads. The pin curve's zoom bounds
    /// play no part in it, so a bad pin curve does not block HUD rendering.
    pub fn validate_hud(&self) -> Result<()> {
        if self.hud_scale.is_finite() {
            Ok(())
        } else {
            Err(ScaleError::NonFinite {
                field: "hudScale",
                value: self.hud_scale,
            })
        }
    }

    /// The zoom interval the pin curve is defined over.
    ///
    /// Equal or inverted bounds are rejected here rather than left to produce
    /// infinite or mirrored scales downstream.
    pub fn zoom_range(&self) -> Result<Range> {
        if self.zoom_floor < self.zoom_ceil {
            Ok(Range::new(self.zoom_floor, self.zoom_ceil))
        } else {
            Err(ScaleError::Configuration {
                floor: self.zoom_floor,
                ceil: self.zoom_ceil,
            })
        }
    }

    #[inline]
    pub fn scale_range(&self) -> Range {
        Range::new(self.min_scale, self.max_scale)
    }
}

/// Whether scaling is switched on for the scene owning `flags`.
///
/// Follows JS truthiness of the stored `enable` field and never fails: a
/// missing or malformed record simply reads as disabled.
pub fn enabled(flags: &Value) -> bool {
    namespace(flags)
        .and_then(|record| record.get("enable"))
        .is_some_and(is_truthy)
}

fn namespace(flags: &Value) -> Option<&Value> {
    flags.get(MODULE_ID).filter(|v| !v.is_null())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_record_reads_as_defaults() {
        let limits = CanvasLimits {
            min_zoom: 0.2,
            max_zoom: 4.0,
        };
        let cfg = SceneScaleConfig::parse(&json!({}), limits).unwrap();
        assert_eq!(cfg, SceneScaleConfig::defaults(limits));
        assert!(!cfg.enable);
        assert_eq!(cfg.zoom_floor, 0.2);
        assert_eq!(cfg.zoom_ceil, 4.0);
    }

    #[test]
    fn fields_default_independently() {
        let flags = json!({ MODULE_ID: { "enable": true, "maxScale": 0.5, "zoomCeil": null } });
        let cfg = SceneScaleConfig::parse(&flags, CanvasLimits::default()).unwrap();
        assert!(cfg.enable);
        assert_eq!(cfg.max_scale, 0.5);
        assert_eq!(cfg.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(cfg.zoom_ceil, DEFAULT_MAX_ZOOM);
        assert_eq!(cfg.hud_scale, DEFAULT_HUD_SCALE);
    }

    #[test]
    fn other_namespaces_are_ignored() {
        let flags = json!({ "core": { "enable": true }, MODULE_ID: null });
        assert!(!enabled(&flags));
        let cfg = SceneScaleConfig::parse(&flags, CanvasLimits::default()).unwrap();
        assert!(!cfg.enable);
    }

    #[test]
    fn enable_follows_truthiness() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!(1), true),
            (json!(0), false),
            (json!("on"), true),
            (json!(""), false),
            (json!(null), false),
        ] {
            let flags = json!({ MODULE_ID: { "enable": raw.clone() } });
            assert_eq!(enabled(&flags), expected, "enable = {raw}");
            let cfg = SceneScaleConfig::read(&flags, CanvasLimits::default()).unwrap();
            assert_eq!(cfg.enable, expected, "enable = {raw}");
        }
    }

    #[test]
    fn degenerate_and_inverted_ranges_are_rejected() {
        for (floor, ceil) in [(1.0, 1.0), (2.0, 0.5)] {
            let flags = json!({ MODULE_ID: { "zoomFloor": floor, "zoomCeil": ceil } });
            let err = SceneScaleConfig::parse(&flags, CanvasLimits::default()).unwrap_err();
            assert!(matches!(err, ScaleError::Configuration { .. }), "{err}");
            // Reading without validation still succeeds so the form can show it.
            assert!(SceneScaleConfig::read(&flags, CanvasLimits::default()).is_ok());
        }
    }

    #[test]
    fn wrong_field_type_is_a_flags_error() {
        let flags = json!({ MODULE_ID: { "minScale": "big" } });
        let err = SceneScaleConfig::parse(&flags, CanvasLimits::default()).unwrap_err();
        assert!(matches!(err, ScaleError::Flags(_)));
        assert!(!enabled(&flags));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut cfg = SceneScaleConfig::defaults(CanvasLimits::default());
        cfg.hud_scale = f64::INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ScaleError::NonFinite { field: "hudScale", .. })
        ));
        assert!(cfg.validate_hud().is_err());
    }

    #[test]
    fn hud_check_ignores_zoom_bounds() {
        let mut cfg = SceneScaleConfig::defaults(CanvasLimits::default());
        cfg.zoom_floor = 1.0;
        cfg.zoom_ceil = 1.0;
        assert!(cfg.validate().is_err());
        assert!(cfg.validate_hud().is_ok());
    }
}
