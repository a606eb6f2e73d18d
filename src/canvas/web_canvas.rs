use topoplot_core::surface::{DrawContext, LinearGradient, TextAlign, TextBaseline};
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// A browser canvas and its 2D context as a plot drawing surface.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()?
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())?;
        Some(Self { canvas, ctx })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Sync the canvas internal resolution with its display size.
    /// Returns false when the canvas is not laid out yet.
    pub fn fit_to_display(&self) -> bool {
        let rect = self.canvas.get_bounding_client_rect();
        let display_w = rect.width() as u32;
        let display_h = rect.height() as u32;
        if display_w == 0 || display_h == 0 {
            return false;
        }
        if self.canvas.width() != display_w || self.canvas.height() != display_h {
            self.canvas.set_width(display_w);
            self.canvas.set_height(display_h);
        }
        true
    }
}

impl DrawContext for WebCanvas {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn put_pixels(&mut self, rgba: &[u8], left: f64, top: f64, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        let image_data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba), width as u32, height as u32);
        match image_data {
            Ok(img) => {
                if let Err(e) = self.ctx.put_image_data(&img, left, top) {
                    log::error!("putImageData failed: {e:?}");
                }
            }
            Err(e) => {
                log::error!("Failed to create ImageData: {e:?}");
            }
        }
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_css());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_css());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        let _ = self.ctx.arc(x, y, radius, start, end);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn fill_gradient_rect(&mut self, gradient: &LinearGradient, x: f64, y: f64, width: f64, height: f64) {
        let fill = self.ctx.create_linear_gradient(gradient.x0, gradient.y0, gradient.x1, gradient.y1);
        for (offset, color) in &gradient.stops {
            if let Err(e) = fill.add_color_stop(*offset as f32, color) {
                log::warn!("bad gradient stop {color} at {offset}: {e:?}");
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&fill);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(text, x, y);
    }
}
