//! Adapters from the host's JS objects to the core traits.

use glam::DVec2;
use js_sys::{Array, Function, Reflect};
use pin_scale_core::{Canvas, CanvasLimits, Localizer, PinSprite};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};

/// Convert a plain host object (scene flags, update diff) into JSON.
///
/// `undefined` and `null` both read as JSON null.
pub fn to_json(value: &JsValue) -> anyhow::Result<Value> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text: String = js_sys::JSON::stringify(value)
        .map_err(|e| anyhow::anyhow!("flags are not serializable: {:?}", e))?
        .into();
    Ok(serde_json::from_str(&text)?)
}

#[inline]
pub fn limits_from(min_zoom: Option<f64>, max_zoom: Option<f64>) -> CanvasLimits {
    let fallback = CanvasLimits::default();
    CanvasLimits {
        min_zoom: min_zoom.filter(|z| z.is_finite()).unwrap_or(fallback.min_zoom),
        max_zoom: max_zoom.filter(|z| z.is_finite()).unwrap_or(fallback.max_zoom),
    }
}

/// A canvas display object exposing a PIXI-style `scale` point.
pub struct JsPin {
    sprite: JsValue,
}

impl JsPin {
    pub fn new(sprite: JsValue) -> Self {
        Self { sprite }
    }

    fn scale_point(&self) -> Option<JsValue> {
        Reflect::get(&self.sprite, &JsValue::from_str("scale"))
            .ok()
            .filter(|point| point.is_object())
    }
}

impl PinSprite for JsPin {
    fn scale(&self) -> DVec2 {
        let Some(point) = self.scale_point() else {
            return DVec2::ONE;
        };
        let axis = |name: &str| {
            Reflect::get(&point, &JsValue::from_str(name))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1.0)
        };
        DVec2::new(axis("x"), axis("y"))
    }

    fn set_scale(&mut self, scale: DVec2) {
        let Some(point) = self.scale_point() else {
            log::warn!("[pan] pin without a scale point; skipping");
            return;
        };
        let setter = Reflect::get(&point, &JsValue::from_str("set"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        match setter {
            Some(set) => {
                if let Err(e) = set.call2(&point, &scale.x.into(), &scale.y.into()) {
                    log::warn!("[pan] scale.set failed: {:?}", e);
                }
            }
            None => {
                for (axis, value) in [("x", scale.x), ("y", scale.y)] {
                    if let Err(e) = Reflect::set(&point, &JsValue::from_str(axis), &value.into()) {
                        log::warn!("[pan] setting scale.{} failed: {:?}", axis, e);
                    }
                }
            }
        }
    }
}

/// Snapshot of the host canvas for one event.
pub struct JsCanvas {
    zoom: f64,
    limits: CanvasLimits,
    pins: Vec<JsPin>,
}

impl JsCanvas {
    pub fn new(zoom: f64, limits: CanvasLimits, pins: &Array) -> Self {
        Self {
            zoom,
            limits,
            pins: pins.iter().map(JsPin::new).collect(),
        }
    }
}

impl Canvas for JsCanvas {
    type Pin = JsPin;

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn limits(&self) -> CanvasLimits {
        self.limits
    }

    fn pins_mut(&mut self) -> &mut [JsPin] {
        &mut self.pins
    }
}

/// Wraps the host's `localize(key)` function.
pub struct JsLocalizer {
    func: Function,
}

impl JsLocalizer {
    pub fn new(func: Function) -> Self {
        Self { func }
    }
}

impl Localizer for JsLocalizer {
    fn localize(&self, key: &str) -> String {
        self.func
            .call1(&JsValue::NULL, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| key.to_owned())
    }
}
