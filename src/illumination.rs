use anyhow::anyhow;
use skyglow_core::IlluminationMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch and decode an equirectangular night-lights image, then read its
/// pixels through an offscreen canvas.
pub async fn load(document: &web::Document, url: &str) -> anyhow::Result<IlluminationMap> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow!("{:?}", e))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow!("decode {}: {:?}", url, e))?;

    let (width, height) = (img.natural_width(), img.natural_height());
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("no 2d context for illumination canvas"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("{:?}", e))?;
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(|e| anyhow!("{:?}", e))?;
    // Throws for a cross-origin image without CORS headers.
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow!("read pixels: {:?}", e))?;
    let map = IlluminationMap::from_rgba(width, height, &data.data())?;
    log::info!("[illumination] loaded {}x{} from {}", width, height, url);
    Ok(map)
}
