/// A HUD overlay this module knows how to rescale: the host render hook that
/// announces it and the DOM id of its root element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudDescriptor {
    pub hook: &'static str,
    pub element_id: &'static str,
}

pub const KNOWN_HUDS: &[HudDescriptor] = &[
    HudDescriptor {
        hook: "renderTokenHUD",
        element_id: "token-hud",
    },
    HudDescriptor {
        hook: "renderTileHUD",
        element_id: "tile-hud",
    },
    HudDescriptor {
        hook: "renderDrawingHUD",
        element_id: "drawing-hud",
    },
];

#[inline]
pub fn find_hud<'a>(huds: &'a [HudDescriptor], hook: &str) -> Option<&'a HudDescriptor> {
    huds.iter().find(|hud| hud.hook == hook)
}

#[inline]
pub fn hud_element_ids() -> impl Iterator<Item = &'static str> {
    KNOWN_HUDS.iter().map(|hud| hud.element_id)
}
