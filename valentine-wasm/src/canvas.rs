use valentine_core::Surface;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

// Non-deprecated helper to set the fill style via property assignment.
pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

/// Look up the confetti canvas and its 2D context.
pub fn init_canvas(
    document: &Document,
    id: &str,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("canvas #{id} not found")))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// Inner size of the browser window in CSS pixels.
pub fn viewport_size(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

const MAX_SURFACE_PX: f64 = 10000.0;

/// Backing store size for a viewport, in whole pixels.
fn surface_size(w: f64, h: f64) -> (u32, u32) {
    let clamp = |v: f64| {
        if v.is_finite() {
            v.round().clamp(0.0, MAX_SURFACE_PX) as u32
        } else {
            0
        }
    };
    (clamp(w), clamp(h))
}

/// Resize the canvas backing store to cover the whole viewport. Returns the
/// size actually applied so clears and culling match the canvas.
pub fn fit_to_viewport(window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let (w, h) = viewport_size(window);
    let (target_w, target_h) = surface_size(w, h);
    if canvas.width() != target_w {
        canvas.set_width(target_w);
    }
    if canvas.height() != target_h {
        canvas.set_height(target_h);
    }
    (target_w as f64, target_h as f64)
}

pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        CanvasSurface { ctx }
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_square(&mut self, x: f64, y: f64, size: f64, rotation_deg: f64, color: &str) {
        let ctx = self.ctx;
        ctx.save();
        let _ = ctx.translate(x, y);
        let _ = ctx.rotate(rotation_deg.to_radians());
        set_fill_style(ctx, color);
        ctx.fill_rect(-size / 2.0, -size / 2.0, size, size);
        ctx.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_is_rounded_and_capped() {
        assert_eq!(surface_size(1280.4, 719.6), (1280, 720));
        assert_eq!(surface_size(25_000.0, 12_000.0), (10_000, 10_000));
        assert_eq!(surface_size(-5.0, f64::NAN), (0, 0));
    }
}
