use crate::constants::LAYER_POINTER_EVENTS;
use crate::core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current layout viewport in CSS pixels.
pub fn viewport() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width as f32, height as f32))
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Size the canvas backing store to `viewport * scale` device pixels.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, viewport: Viewport, scale: f64) {
    let w_px = (viewport.width as f64 * scale) as u32;
    let h_px = (viewport.height as f64 * scale) as u32;
    if canvas.width() != w_px.max(1) {
        canvas.set_width(w_px.max(1));
    }
    if canvas.height() != h_px.max(1) {
        canvas.set_height(h_px.max(1));
    }
}

/// Find the layer canvas by id, or create it as a fixed full-viewport layer.
pub fn ensure_layer_canvas(
    document: &web::Document,
    id: &str,
    z_index: i32,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = match document.get_element_by_id(id) {
        Some(el) => el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))?,
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?
                .dyn_into::<web::HtmlCanvasElement>()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_id(id);
            let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
            body.append_child(&el).map_err(|e| anyhow::anyhow!("{:?}", e))?;
            log::info!("[dom] created #{}", id);
            el
        }
    };

    let style = canvas.style();
    _ = style.set_property("position", "fixed");
    _ = style.set_property("inset", "0");
    _ = style.set_property("width", "100vw");
    _ = style.set_property("height", "100vh");
    _ = style.set_property("z-index", &z_index.to_string());
    _ = style.set_property("pointer-events", LAYER_POINTER_EVENTS);
    Ok(canvas)
}

/// Page element by id, if the composition layer provided one.
pub fn find_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}
