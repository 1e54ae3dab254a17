#![cfg(target_arch = "wasm32")]
use pin_scale_core::{EnglishLabels, Localizer, Outcome, PinScaler};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

mod dom;
mod host;
mod overlay;

use dom::DomOverlays;
use host::{limits_from, to_json, JsCanvas, JsLocalizer};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pin-scale starting");
    Ok(())
}

// Log and hand the error back to JS as a thrown Error.
fn throw(tag: &str, err: impl Display) -> JsValue {
    log::error!("[{}] {}", tag, err);
    js_sys::Error::new(&err.to_string()).into()
}

fn log_outcome(tag: &str, outcome: Outcome) {
    match outcome {
        Outcome::Skipped => log::trace!("[{}] skipped", tag),
        Outcome::Applied { pins, huds } => {
            log::debug!("[{}] scaled {} pins, {} huds", tag, pins, huds)
        }
        Outcome::Reset { pins, huds } => log::debug!("[{}] reset {} pins, {} huds", tag, pins, huds),
    }
}

/// Hook handlers registered by the module's JS entry script.
#[wasm_bindgen]
pub struct PinScaleHooks {
    scaler: PinScaler,
}

#[wasm_bindgen]
impl PinScaleHooks {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            scaler: PinScaler::new(),
        }
    }

    /// `canvasPan`: rescale every pin and every known HUD.
    #[wasm_bindgen(js_name = onCanvasPan)]
    pub fn on_canvas_pan(
        &self,
        flags: JsValue,
        zoom: f64,
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
        pins: js_sys::Array,
    ) -> Result<(), JsValue> {
        self.canvas_pan(&flags, zoom, min_zoom, max_zoom, &pins)
            .map(|outcome| log_outcome("pan", outcome))
            .map_err(|e| throw("pan", e))
    }

    /// `render<Kind>HUD`: rescale the overlay that just rendered.
    #[wasm_bindgen(js_name = onHudRender)]
    pub fn on_hud_render(
        &self,
        flags: JsValue,
        hook: &str,
        zoom: f64,
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
    ) -> Result<(), JsValue> {
        self.hud_render(&flags, hook, zoom, min_zoom, max_zoom)
            .map(|outcome| log_outcome("hud", outcome))
            .map_err(|e| throw("hud", e))
    }

    /// `updateScene`: reset when scaling was switched off, otherwise re-apply.
    #[wasm_bindgen(js_name = onSceneUpdate)]
    pub fn on_scene_update(
        &self,
        flags: JsValue,
        changes: JsValue,
        zoom: f64,
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
        pins: js_sys::Array,
    ) -> Result<(), JsValue> {
        self.scene_update(&flags, &changes, zoom, min_zoom, max_zoom, &pins)
            .map(|outcome| log_outcome("scene", outcome))
            .map_err(|e| throw("scene", e))
    }

    /// Host hook names the entry script should forward to `onHudRender`.
    #[wasm_bindgen(js_name = hudHooks)]
    pub fn hud_hooks(&self) -> js_sys::Array {
        self.scaler
            .huds()
            .iter()
            .map(|hud| JsValue::from_str(hud.hook))
            .collect()
    }

    /// `renderSceneConfig`: settings fieldset to append to the sheet.
    #[wasm_bindgen(js_name = onSceneConfigRender)]
    pub fn on_scene_config_render(
        &self,
        flags: JsValue,
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
        localize: Option<js_sys::Function>,
    ) -> Result<String, JsValue> {
        let flags = to_json(&flags).map_err(|e| throw("config", e))?;
        let limits = limits_from(min_zoom, max_zoom);
        let i18n: Box<dyn Localizer> = match localize {
            Some(func) => Box::new(JsLocalizer::new(func)),
            None => Box::new(EnglishLabels),
        };
        Ok(self
            .scaler
            .on_scene_config_render(&flags, limits, &*i18n))
    }
}

impl PinScaleHooks {
    fn canvas_pan(
        &self,
        flags: &JsValue,
        zoom: f64,
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
        pins: &js_sys::Array,
    ) -> anyhow::Result<Outcome> {
        let flags = to_json(flags)?;
        let mut canvas = JsCanvas::new(zoom, limits_from(min_zoom, max_zoom), pins);
        let mut overlays = DomOverlays::from_window()?;
        Ok(self.scaler.on_canvas_pan(&flags, &mut canvas, &mut overlays)?)
    }

    fn hud_render(
        &self,
        flags: &JsValue,
        hook: &str,
        zoom: f64,
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
    ) -> anyhow::Result<Outcome> {
        let flags = to_json(flags)?;
        let mut overlays = DomOverlays::from_window()?;
        Ok(self.scaler.on_hud_render(
            &flags,
            hook,
            zoom,
            limits_from(min_zoom, max_zoom),
            &mut overlays,
        )?)
    }

    fn scene_update(
        &self,
        flags: &JsValue,
        changes: &JsValue,
        zoom: f64,
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
        pins: &js_sys::Array,
    ) -> anyhow::Result<Outcome> {
        let flags = to_json(flags)?;
        let changes = to_json(changes)?;
        let mut canvas = JsCanvas::new(zoom, limits_from(min_zoom, max_zoom), pins);
        let mut overlays = DomOverlays::from_window()?;
        Ok(self
            .scaler
            .on_scene_update(&flags, &changes, &mut canvas, &mut overlays)?)
    }
}

impl Default for PinScaleHooks {
    fn default() -> Self {
        Self::new()
    }
}
