//! HTML fragment appended to the host's scene-configuration form.
//!
//! Field names follow the host's `flags.<namespace>.<field>` binding, so the
//! host persists the submitted values without any help from us.

use crate::config::SceneScaleConfig;
use crate::constants::*;
use std::fmt::Write;

/// Translation lookup. Implementations return the key itself when missing.
pub trait Localizer {
    fn localize(&self, key: &str) -> String;
}

impl<F: Fn(&str) -> String> Localizer for F {
    fn localize(&self, key: &str) -> String {
        self(key)
    }
}

/// Built-in English strings, used when the host offers no translation.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishLabels;

impl Localizer for EnglishLabels {
    fn localize(&self, key: &str) -> String {
        let text = match key {
            "PINSCALE.Title" => "Map Pin Scaling",
            "PINSCALE.Enable" => "Scale Map Pins",
            "PINSCALE.EnableHint" => "Keep map pins and HUDs at a steady size while zooming.",
            "PINSCALE.ZoomFloor" => "Zoom Floor",
            "PINSCALE.ZoomFloorHint" => "Zoom level at which pins use the minimum scale.",
            "PINSCALE.ZoomCeil" => "Zoom Ceiling",
            "PINSCALE.ZoomCeilHint" => "Zoom level at which pins use the maximum scale.",
            "PINSCALE.MinScale" => "Minimum Scale",
            "PINSCALE.MinScaleHint" => "Pin scale at the zoom floor.",
            "PINSCALE.MaxScale" => "Maximum Scale",
            "PINSCALE.MaxScaleHint" => "Pin scale at the zoom ceiling.",
            "PINSCALE.HudScale" => "HUD Scale",
            "PINSCALE.HudScaleHint" => "Extra multiplier for token, tile and drawing HUDs.",
            other => other,
        };
        text.to_owned()
    }
}

struct NumberField {
    name: &'static str,
    label_key: &'static str,
    hint_key: &'static str,
    step: f64,
}

const NUMBER_FIELDS: [NumberField; 5] = [
    NumberField {
        name: "zoomFloor",
        label_key: "PINSCALE.ZoomFloor",
        hint_key: "PINSCALE.ZoomFloorHint",
        step: ZOOM_INPUT_STEP,
    },
    NumberField {
        name: "zoomCeil",
        label_key: "PINSCALE.ZoomCeil",
        hint_key: "PINSCALE.ZoomCeilHint",
        step: ZOOM_INPUT_STEP,
    },
    NumberField {
        name: "minScale",
        label_key: "PINSCALE.MinScale",
        hint_key: "PINSCALE.MinScaleHint",
        step: SCALE_INPUT_STEP,
    },
    NumberField {
        name: "maxScale",
        label_key: "PINSCALE.MaxScale",
        hint_key: "PINSCALE.MaxScaleHint",
        step: SCALE_INPUT_STEP,
    },
    NumberField {
        name: "hudScale",
        label_key: "PINSCALE.HudScale",
        hint_key: "PINSCALE.HudScaleHint",
        step: SCALE_INPUT_STEP,
    },
];

fn field_value(config: &SceneScaleConfig, name: &str) -> f64 {
    match name {
        "zoomFloor" => config.zoom_floor,
        "zoomCeil" => config.zoom_ceil,
        "minScale" => config.min_scale,
        "maxScale" => config.max_scale,
        _ => config.hud_scale,
    }
}

/// Form binding name for one of our fields, e.g. `flags.pin-scale.minScale`.
#[inline]
pub fn flag_field_name(field: &str) -> String {
    format!("flags.{MODULE_ID}.{field}")
}

/// Render the settings fieldset pre-filled from `config`.
pub fn render_settings_form(config: &SceneScaleConfig, i18n: &dyn Localizer) -> String {
    let mut html = String::new();
    _ = writeln!(html, r#"<fieldset class="{MODULE_ID}">"#);
    _ = writeln!(html, "<legend>{}</legend>", escape_html(&i18n.localize("PINSCALE.Title")));

    _ = writeln!(html, r#"<div class="form-group">"#);
    _ = writeln!(html, "<label>{}</label>", escape_html(&i18n.localize("PINSCALE.Enable")));
    _ = writeln!(
        html,
        r#"<input type="checkbox" name="{}" data-dtype="Boolean"{}>"#,
        flag_field_name("enable"),
        if config.enable { " checked" } else { "" }
    );
    _ = writeln!(
        html,
        r#"<p class="notes">{}</p>"#,
        escape_html(&i18n.localize("PINSCALE.EnableHint"))
    );
    _ = writeln!(html, "</div>");

    for field in &NUMBER_FIELDS {
        _ = writeln!(html, r#"<div class="form-group">"#);
        _ = writeln!(html, "<label>{}</label>", escape_html(&i18n.localize(field.label_key)));
        _ = writeln!(
            html,
            r#"<input type="number" name="{}" value="{}" step="{}" data-dtype="Number">"#,
            flag_field_name(field.name),
            field_value(config, field.name),
            field.step
        );
        _ = writeln!(
            html,
            r#"<p class="notes">{}</p>"#,
            escape_html(&i18n.localize(field.hint_key))
        );
        _ = writeln!(html, "</div>");
    }

    html.push_str("</fieldset>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
