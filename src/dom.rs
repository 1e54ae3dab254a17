use crate::overlay::{parse_scale_transform, scale_transform, TRANSFORM_PROPERTY};
use pin_scale_core::OverlaySurface;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> anyhow::Result<web::Document> {
    web::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow::anyhow!("no document"))
}

/// HUD overlays living in the page, addressed by element id.
pub struct DomOverlays {
    document: web::Document,
}

impl DomOverlays {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> anyhow::Result<Self> {
        Ok(Self::new(window_document()?))
    }
}

impl OverlaySurface for DomOverlays {
    type Handle = web::HtmlElement;

    fn locate(&self, element_id: &str) -> Option<web::HtmlElement> {
        self.document
            .get_element_by_id(element_id)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    }

    fn set_scale(&mut self, handle: &web::HtmlElement, factor: f64) {
        let style = handle.style();
        let value = scale_transform(factor);
        let current = style.get_property_value(TRANSFORM_PROPERTY).ok();
        if current.as_deref().and_then(parse_scale_transform) == parse_scale_transform(&value) {
            return;
        }
        if let Err(e) = style.set_property(TRANSFORM_PROPERTY, &value) {
            log::warn!("[hud] #{} transform write failed: {:?}", handle.id(), e);
        }
    }

    fn clear_scale(&mut self, handle: &web::HtmlElement) {
        if let Err(e) = handle.style().remove_property(TRANSFORM_PROPERTY) {
            log::warn!("[hud] #{} transform reset failed: {:?}", handle.id(), e);
        }
    }
}
