use crate::constants::{HUD_ID, SNOW_OVERLAY_ID};
use crate::core::params::Snowflake;
use crate::core::scene::HudText;
use crate::dom;
use web_sys as web;

/// Inline style for one snowflake; the fall itself is a CSS animation.
pub fn snowflake_style(f: &Snowflake) -> String {
    format!(
        "left:{:.2}%;width:{:.2}px;height:{:.2}px;animation-duration:{:.2}s;animation-delay:{:.2}s;opacity:{:.2}",
        f.left_percent, f.size_px, f.size_px, f.duration_sec, f.delay_sec, f.opacity
    )
}

/// Fill `#snow-overlay` with one `.snowflake` div per flake.
pub fn build_snow(document: &web::Document, flakes: &[Snowflake]) -> anyhow::Result<()> {
    let Some(root) = document.get_element_by_id(SNOW_OVERLAY_ID) else {
        log::warn!("[overlay] missing #{}; snow disabled", SNOW_OVERLAY_ID);
        return Ok(());
    };
    root.set_inner_html("");
    for f in flakes {
        let el = document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        el.set_class_name("snowflake");
        _ = el.set_attribute("style", &snowflake_style(f));
        _ = el.set_attribute("data-id", &f.id.to_string());
        root.append_child(&el)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    log::info!("[overlay] {} snowflakes", flakes.len());
    Ok(())
}

pub fn fill_hud(document: &web::Document, hud: &HudText) {
    dom::set_text(document, ".hud-brand", hud.brand);
    dom::set_text(document, ".hud-title", hud.title);
    dom::set_text(document, ".hud-subtitle", hud.subtitle);
}

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HUD_ID) {
        _ = el.class_list().remove_1("hidden");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HUD_ID) {
        _ = el.class_list().add_1("hidden");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(HUD_ID)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}
