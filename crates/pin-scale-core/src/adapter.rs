//! Host-facing entry points.
//!
//! `PinScaler` holds no per-scene state. The host hands it the current scene
//! flags, the canvas and the overlay surface on every call, and each call
//! re-derives everything from those inputs, so repeating a call is harmless.

use crate::applier::{apply_hud_scale, apply_pin_scale, reset_all, MemoryPin, OverlaySurface, PinSprite};
use crate::config::{enabled, CanvasLimits, SceneScaleConfig};
use crate::constants::MODULE_ID;
use crate::error::Result;
use crate::form::{render_settings_form, Localizer};
use crate::hud::{find_hud, HudDescriptor, KNOWN_HUDS};
use crate::scale::{hud_scale_factor, note_scale_configured};
use serde_json::Value;

/// Current canvas state as seen by the scaler.
pub trait Canvas {
    type Pin: PinSprite;

    fn zoom(&self) -> f64;
    fn limits(&self) -> CanvasLimits;
    /// Pins currently rendered on the canvas.
    fn pins_mut(&mut self) -> &mut [Self::Pin];
}

/// What an entry point did, for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Scaling is off for the scene; nothing was touched.
    Skipped,
    Applied { pins: usize, huds: usize },
    Reset { pins: usize, huds: usize },
}

#[derive(Clone, Copy, Debug)]
pub struct PinScaler {
    huds: &'static [HudDescriptor],
}

impl Default for PinScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl PinScaler {
    pub fn new() -> Self {
        Self { huds: KNOWN_HUDS }
    }

    pub fn with_huds(huds: &'static [HudDescriptor]) -> Self {
        Self { huds }
    }

    pub fn huds(&self) -> &'static [HudDescriptor] {
        self.huds
    }

    /// Canvas pan or zoom: rescale every pin and every known HUD.
    pub fn on_canvas_pan<C, S>(&self, flags: &Value, canvas: &mut C, surface: &mut S) -> Result<Outcome>
    where
        C: Canvas + ?Sized,
        S: OverlaySurface + ?Sized,
    {
        if !enabled(flags) {
            log::trace!("[pan] scaling disabled for scene");
            return Ok(Outcome::Skipped);
        }
        let config = SceneScaleConfig::parse(flags, canvas.limits())?;
        self.apply(&config, canvas, surface)
    }

    /// One overlay finished rendering: rescale just that overlay.
    ///
    /// Hooks that do not belong to a known HUD are ignored. Only `hudScale` is
    /// validated here; the pin curve's zoom bounds are not read.
    pub fn on_hud_render<S>(
        &self,
        flags: &Value,
        hook: &str,
        zoom: f64,
        limits: CanvasLimits,
        surface: &mut S,
    ) -> Result<Outcome>
    where
        S: OverlaySurface + ?Sized,
    {
        if !enabled(flags) {
            return Ok(Outcome::Skipped);
        }
        let Some(hud) = find_hud(self.huds, hook) else {
            log::debug!("[hud] no overlay registered for hook {}", hook);
            return Ok(Outcome::Skipped);
        };
        let config = SceneScaleConfig::read(flags, limits)?;
        config.validate_hud()?;
        let scale = hud_scale_factor(zoom, &config)?;
        let found = apply_hud_scale(surface, hud.element_id, scale);
        log::debug!("[hud] #{} scale={:.3} mounted={}", hud.element_id, scale, found);
        Ok(Outcome::Applied {
            pins: 0,
            huds: usize::from(found),
        })
    }

    /// Scene document changed. `changes` is the update diff the host reports.
    ///
    /// When the diff touches our settings and scaling is now off, every pin
    /// and HUD is put back to its natural size. While scaling is on the
    /// current zoom is simply re-applied.
    pub fn on_scene_update<C, S>(
        &self,
        flags: &Value,
        changes: &Value,
        canvas: &mut C,
        surface: &mut S,
    ) -> Result<Outcome>
    where
        C: Canvas + ?Sized,
        S: OverlaySurface + ?Sized,
    {
        if enabled(flags) {
            let config = SceneScaleConfig::parse(flags, canvas.limits())?;
            return self.apply(&config, canvas, surface);
        }
        if !touches_settings(changes) {
            return Ok(Outcome::Skipped);
        }
        let (pins, huds) = reset_all(canvas.pins_mut().iter_mut(), surface, self.huds);
        log::info!("[scene] scaling switched off; reset {} pins and {} huds", pins, huds);
        Ok(Outcome::Reset { pins, huds })
    }

    /// Settings fieldset for the scene-configuration sheet.
    ///
    /// Always renders: a record the host cannot read back falls back to the
    /// defaults so the user can overwrite it.
    pub fn on_scene_config_render(&self, flags: &Value, limits: CanvasLimits, i18n: &dyn Localizer) -> String {
        let config = SceneScaleConfig::read(flags, limits).unwrap_or_else(|e| {
            log::warn!("[config] {}; showing defaults", e);
            SceneScaleConfig::defaults(limits)
        });
        render_settings_form(&config, i18n)
    }

    fn apply<C, S>(&self, config: &SceneScaleConfig, canvas: &mut C, surface: &mut S) -> Result<Outcome>
    where
        C: Canvas + ?Sized,
        S: OverlaySurface + ?Sized,
    {
        let zoom = canvas.zoom();
        let pin_scale = note_scale_configured(zoom, config)?;
        let hud_scale = hud_scale_factor(zoom, config)?;

        let pins = canvas.pins_mut();
        for pin in pins.iter_mut() {
            apply_pin_scale(pin, pin_scale);
        }
        let huds = self
            .huds
            .iter()
            .filter(|hud| apply_hud_scale(&mut *surface, hud.element_id, hud_scale))
            .count();

        log::debug!(
            "[pan] zoom={:.3} pin_scale={:.3} hud_scale={:.3} pins={} huds={}",
            zoom,
            pin_scale,
            hud_scale,
            pins.len(),
            huds
        );
        Ok(Outcome::Applied {
            pins: pins.len(),
            huds,
        })
    }
}

// The host reports updates either as nested objects or with dotted keys, and
// deletes a whole record with a `-=` key.
fn touches_settings(changes: &Value) -> bool {
    let deleted = format!("-={MODULE_ID}");
    if changes.get("flags").is_some_and(|flags| {
        flags.get(MODULE_ID).is_some() || flags.get(&deleted).is_some()
    }) {
        return true;
    }
    let prefixes = [format!("flags.{MODULE_ID}"), format!("flags.{deleted}")];
    changes.as_object().is_some_and(|obj| {
        obj.keys().any(|key| {
            prefixes.iter().any(|prefix| {
                key.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
            })
        })
    })
}

/// Canvas stand-in holding plain in-memory pins.
#[derive(Clone, Debug)]
pub struct MemoryCanvas {
    pub zoom: f64,
    pub limits: CanvasLimits,
    pub pins: Vec<MemoryPin>,
}

impl MemoryCanvas {
    pub fn new(zoom: f64, pin_count: usize) -> Self {
        Self {
            zoom,
            limits: CanvasLimits::default(),
            pins: vec![MemoryPin::default(); pin_count],
        }
    }
}

impl Canvas for MemoryCanvas {
    type Pin = MemoryPin;

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn limits(&self) -> CanvasLimits {
        self.limits
    }

    fn pins_mut(&mut self) -> &mut [MemoryPin] {
        &mut self.pins
    }
}
