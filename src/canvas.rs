use glam::Vec2;
use skyglow_core::{Blend, Rgb, RadialGradient, SpriteSpec, Surface, ViewportGeometry};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()
}

fn gradient(
    ctx: &web::CanvasRenderingContext2d,
    g: &RadialGradient,
) -> Option<web::CanvasGradient> {
    let grad = ctx
        .create_radial_gradient(
            g.inner.x as f64,
            g.inner.y as f64,
            g.inner_radius.max(0.0) as f64,
            g.outer.x as f64,
            g.outer.y as f64,
            g.outer_radius.max(0.0) as f64,
        )
        .ok()?;
    for stop in &g.stops {
        _ = grad.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.css(stop.alpha));
    }
    Some(grad)
}

/// [`Surface`] over a page canvas's 2D context. Sprites are offscreen canvases.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    document: web::Document,
}

impl CanvasSurface {
    /// `None` when the canvas has no 2D context.
    pub fn new(canvas: web::HtmlCanvasElement, document: web::Document) -> Option<Self> {
        let ctx = context_2d(&canvas)?;
        Some(Self {
            canvas,
            ctx,
            document,
        })
    }
}

impl Surface for CanvasSurface {
    type Sprite = web::HtmlCanvasElement;

    fn resize(&mut self, geometry: &ViewportGeometry) {
        self.canvas.set_width(geometry.backing_width());
        self.canvas.set_height(geometry.backing_height());
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", geometry.width));
        _ = style.set_property("height", &format!("{}px", geometry.height));
        let dpr = geometry.dpr as f64;
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn set_blend(&mut self, blend: Blend) {
        _ = self.ctx.set_global_composite_operation(blend.as_str());
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn fill_radial(&mut self, g: &RadialGradient) {
        let Some(grad) = gradient(&self.ctx, g) else {
            return;
        };
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(g.outer.x as f64, g.outer.y as f64, g.outer_radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.css(alpha));
        self.ctx.set_line_width(line_width as f64);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.stroke();
        }
    }

    fn create_sprite(&mut self, spec: &SpriteSpec) -> Option<Self::Sprite> {
        let sprite = self
            .document
            .create_element("canvas")
            .ok()?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        let size = spec.size_px.max(1);
        sprite.set_width(size);
        sprite.set_height(size);
        let ctx = context_2d(&sprite)?;
        let half = size as f32 / 2.0;
        let center = Vec2::splat(half);
        let g = RadialGradient::centered(center, half)
            .stop(0.0, spec.inner, spec.inner_alpha)
            .stop(spec.mid_stop, spec.outer, spec.outer_alpha)
            .stop(1.0, spec.outer, 0.0);
        let grad = gradient(&ctx, &g)?;
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, 0.0, size as f64, size as f64);
        Some(sprite)
    }

    fn draw_sprite(&mut self, sprite: &Self::Sprite, center: Vec2, size: f32) {
        let half = size / 2.0;
        _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            sprite,
            (center.x - half) as f64,
            (center.y - half) as f64,
            size as f64,
            size as f64,
        );
    }
}
