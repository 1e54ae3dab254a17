//! Writes computed scales to pins and HUD overlays.
//!
//! The host objects are reached through two small capability traits so the
//! math never touches the DOM or the canvas scene graph directly.

use crate::constants::IDENTITY_SCALE;
use crate::hud::HudDescriptor;
use fnv::FnvHashMap;
use glam::DVec2;

/// A pin display object with a mutable 2D scale.
pub trait PinSprite {
    fn scale(&self) -> DVec2;
    fn set_scale(&mut self, scale: DVec2);
}

/// Lookup and style access for overlay elements addressed by id.
pub trait OverlaySurface {
    type Handle;

    /// `None` while the overlay is not mounted.
    fn locate(&self, element_id: &str) -> Option<Self::Handle>;
    fn set_scale(&mut self, handle: &Self::Handle, factor: f64);
    /// Drop any transform override so the element falls back to its CSS size.
    fn clear_scale(&mut self, handle: &Self::Handle);
}

#[inline]
pub fn apply_pin_scale<P: PinSprite + ?Sized>(pin: &mut P, scale: f64) {
    pin.set_scale(DVec2::splat(scale));
}

/// Returns whether the overlay was found.
pub fn apply_hud_scale<S: OverlaySurface + ?Sized>(
    surface: &mut S,
    element_id: &str,
    scale: f64,
) -> bool {
    match surface.locate(element_id) {
        Some(handle) => {
            surface.set_scale(&handle, scale);
            true
        }
        None => {
            log::trace!("[hud] #{} not mounted; skipping", element_id);
            false
        }
    }
}

/// Returns whether the overlay was found.
pub fn reset_hud<S: OverlaySurface + ?Sized>(surface: &mut S, element_id: &str) -> bool {
    match surface.locate(element_id) {
        Some(handle) => {
            surface.clear_scale(&handle);
            true
        }
        None => false,
    }
}

/// Put every pin back to scale 1 and clear the override on every listed HUD.
///
/// Returns `(pins reset, overlays reset)`.
pub fn reset_all<'a, P, S>(
    pins: impl IntoIterator<Item = &'a mut P>,
    surface: &mut S,
    huds: &[HudDescriptor],
) -> (usize, usize)
where
    P: PinSprite + ?Sized + 'a,
    S: OverlaySurface + ?Sized,
{
    let mut pin_count = 0;
    for pin in pins {
        apply_pin_scale(pin, IDENTITY_SCALE);
        pin_count += 1;
    }
    let hud_count = huds
        .iter()
        .filter(|hud| reset_hud(&mut *surface, hud.element_id))
        .count();
    (pin_count, hud_count)
}

/// In-memory pin used by tests and headless callers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryPin {
    pub scale: DVec2,
}

impl Default for MemoryPin {
    fn default() -> Self {
        Self { scale: DVec2::ONE }
    }
}

impl PinSprite for MemoryPin {
    fn scale(&self) -> DVec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: DVec2) {
        self.scale = scale;
    }
}

/// In-memory overlay surface: mounted element ids and their scale override.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    elements: FnvHashMap<String, Option<f64>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mounted<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut surface = Self::new();
        for id in ids {
            surface.mount(id);
        }
        surface
    }

    pub fn mount(&mut self, element_id: &str) {
        self.elements.entry(element_id.to_owned()).or_insert(None);
    }

    pub fn unmount(&mut self, element_id: &str) {
        self.elements.remove(element_id);
    }

    pub fn is_mounted(&self, element_id: &str) -> bool {
        self.elements.contains_key(element_id)
    }

    /// Current override, `None` if the element is unscaled or not mounted.
    pub fn scale_of(&self, element_id: &str) -> Option<f64> {
        self.elements.get(element_id).copied().flatten()
    }
}

impl OverlaySurface for MemorySurface {
    type Handle = String;

    fn locate(&self, element_id: &str) -> Option<String> {
        self.is_mounted(element_id).then(|| element_id.to_owned())
    }

    fn set_scale(&mut self, handle: &String, factor: f64) {
        if let Some(slot) = self.elements.get_mut(handle) {
            *slot = Some(factor);
        }
    }

    fn clear_scale(&mut self, handle: &String) {
        if let Some(slot) = self.elements.get_mut(handle) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::{hud_element_ids, KNOWN_HUDS};

    #[test]
    fn pin_scale_is_uniform() {
        let mut pin = MemoryPin::default();
        apply_pin_scale(&mut pin, 0.4);
        assert_eq!(pin.scale(), DVec2::new(0.4, 0.4));
    }

    #[test]
    fn missing_overlay_is_a_silent_no_op() {
        let mut surface = MemorySurface::new();
        assert!(!apply_hud_scale(&mut surface, "token-hud", 2.0));
        assert!(!surface.is_mounted("token-hud"));
        assert!(!reset_hud(&mut surface, "token-hud"));
    }

    #[test]
    fn reset_clears_override() {
        let mut surface = MemorySurface::with_mounted(["tile-hud"]);
        assert!(apply_hud_scale(&mut surface, "tile-hud", 0.5));
        assert_eq!(surface.scale_of("tile-hud"), Some(0.5));
        assert!(reset_hud(&mut surface, "tile-hud"));
        assert_eq!(surface.scale_of("tile-hud"), None);
        assert!(surface.is_mounted("tile-hud"));
    }

    #[test]
    fn reset_all_restores_everything() {
        let mut pins = vec![MemoryPin::default(); 3];
        for (i, pin) in pins.iter_mut().enumerate() {
            apply_pin_scale(pin, 0.1 * (i + 1) as f64);
        }
        let mut surface = MemorySurface::with_mounted(hud_element_ids());
        for id in hud_element_ids() {
            apply_hud_scale(&mut surface, id, 3.0);
        }

        let (pin_count, hud_count) = reset_all(pins.iter_mut(), &mut surface, KNOWN_HUDS);

        assert_eq!(pin_count, 3);
        assert_eq!(hud_count, KNOWN_HUDS.len());
        assert!(pins.iter().all(|p| p.scale == DVec2::ONE));
        assert!(hud_element_ids().all(|id| surface.scale_of(id).is_none()));
    }
}
