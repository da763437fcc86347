use crate::constants::{
    ATTR_ADAPTIVE_QUALITY, ATTR_GLOBE_ORDER, ATTR_ILLUMINATION, ATTR_LAYERS, ATTR_QUALITY,
    GLOBE_CANVAS_CLASS,
};
use crate::dom;
use skyglow_core::config::{page_quality, parse_flag, parse_quality};
use skyglow_core::{ConfigError, EngineConfig, GlobeOrder, LayerSet};
use std::str::FromStr;
use web_sys as web;

/// Everything read from the page once at startup.
pub struct PageConfig {
    pub engine: EngineConfig,
    pub page_quality: f32,
    pub illumination_url: Option<String>,
}

/// Parse one attribute; malformed values keep the default with a warning.
fn attribute<T>(
    el: &web::Element,
    name: &str,
    parse: impl Fn(&str) -> Result<T, ConfigError>,
) -> Option<T> {
    let raw = el.get_attribute(name)?;
    match parse(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[config] ignoring {}: {}", name, e);
            None
        }
    }
}

pub fn read(window: &web::Window, document: &web::Document, canvas: &web::Element) -> PageConfig {
    let mut engine = EngineConfig::default();
    if canvas.class_list().contains(GLOBE_CANVAS_CLASS) {
        engine.layers = LayerSet {
            stars: false,
            clouds: false,
            globe: true,
        };
    }
    if let Some(layers) = attribute(canvas, ATTR_LAYERS, LayerSet::from_str) {
        engine.layers = layers;
    }
    if let Some(order) = attribute(canvas, ATTR_GLOBE_ORDER, GlobeOrder::from_str) {
        engine.globe_order = order;
    }
    if let Some(adaptive) = attribute(canvas, ATTR_ADAPTIVE_QUALITY, parse_flag) {
        engine.adaptive_quality = adaptive;
    }
    let quality = attribute(canvas, ATTR_QUALITY, parse_quality).unwrap_or_else(|| {
        page_quality(dom::is_gallery_page(document), dom::hardware_cores(window))
    });
    let illumination_url = canvas
        .get_attribute(ATTR_ILLUMINATION)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    PageConfig {
        engine,
        page_quality: quality,
        illumination_url,
    }
}
