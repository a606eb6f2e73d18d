//! The 2D drawing surface the processes render into.
//!
//! `DrawContext` mirrors the slice of the canvas 2D API the plot needs, so the
//! same processes drive a browser canvas or the in-memory `RecordingSurface`.

/// Linear gradient description, resolved by the surface when filling.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<(f64, String)>,
}

impl LinearGradient {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1, stops: Vec::new() }
    }

    pub fn add_color_stop(&mut self, offset: f64, color: &str) {
        self.stops.push((offset, color.to_string()));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

impl TextBaseline {
    pub fn as_css(self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

pub trait DrawContext {
    /// Surface size in pixels.
    fn size(&self) -> (f64, f64);
    /// Clear the whole surface to transparent.
    fn clear(&mut self);
    /// Copy RGBA bytes (`width * height * 4`) to the surface at `(left, top)`.
    fn put_pixels(&mut self, rgba: &[u8], left: f64, top: f64, width: usize, height: usize);

    fn set_stroke_style(&mut self, style: &str);
    fn set_fill_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn stroke(&mut self);

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_gradient_rect(&mut self, gradient: &LinearGradient, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    PutPixels { left: f64, top: f64, width: usize, height: usize, rgba: Vec<u8> },
    StrokeStyle(String),
    FillStyle(String),
    LineWidth(f64),
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Stroke,
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    FillGradientRect { gradient: LinearGradient, x: f64, y: f64, width: f64, height: f64 },
    FillText { text: String, x: f64, y: f64 },
}

/// Headless surface that records every call in order.
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Texts drawn with `fill_text`, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Pixel payloads of every `put_pixels` call, in order.
    pub fn blits(&self) -> Vec<&[u8]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::PutPixels { rgba, .. } => Some(rgba.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn put_pixels(&mut self, rgba: &[u8], left: f64, top: f64, width: usize, height: usize) {
        self.commands.push(DrawCommand::PutPixels { left, top, width, height, rgba: rgba.to_vec() });
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::StrokeStyle(style.to_string()));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::FillStyle(style.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(DrawCommand::TextBaseline(baseline));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.commands.push(DrawCommand::Arc { x, y, radius, start, end });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::StrokeRect { x, y, width, height });
    }

    fn fill_gradient_rect(&mut self, gradient: &LinearGradient, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillGradientRect { gradient: gradient.clone(), x, y, width, height });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText { text: text.to_string(), x, y });
    }
}
