//! The drawing surface the layout engine writes to.
//!
//! All geometry is in millimetres measured from the top-left corner of the
//! page, y growing downwards. Font sizes are in points. Backends convert to
//! their own coordinate system when serializing.

use crate::error::Error;

pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const NAVY: Color = Color([30, 58, 95]);
    pub const SLATE: Color = Color([71, 85, 105]);
    pub const MUTED: Color = Color([100, 116, 139]);
    pub const RULE: Color = Color([203, 213, 225]);
    pub const PANEL: Color = Color([241, 245, 249]);
    pub const GREEN: Color = Color([22, 163, 74]);
    pub const AMBER: Color = Color([217, 119, 6]);
    pub const RED: Color = Color([220, 38, 38]);

    pub(crate) fn unit_rgb(self) -> (f32, f32, f32) {
        let [r, g, b] = self.0;
        (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            bold: false,
            color: Color::BLACK,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Baseline-to-baseline distance in millimetres.
    pub fn line_height(&self) -> f32 {
        pt_to_mm(self.size) * 1.2
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32, // mm
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn stroke(stroke: Stroke) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// Drawing and measurement capability consumed by the layout engine.
pub trait Canvas {
    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;
    fn page_count(&self) -> usize;
    fn current_page(&self) -> usize;

    /// Advance width of `text` in millimetres.
    fn measure_text(&self, text: &str, size: f32, bold: bool) -> f32;

    /// Greedy word wrap. `\n` forces a break; a word wider than the line is
    /// broken between characters. Always returns at least one line.
    fn wrap_text(&self, text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
        let space_w = self.measure_text(" ", size, bold);
        let mut lines = Vec::new();
        for raw in text.split('\n') {
            let mut current = String::new();
            let mut current_w = 0.0f32;
            for word in raw.split_whitespace() {
                let ww = self.measure_text(word, size, bold);
                if ww > max_width {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    current_w = 0.0;
                    let mut buf = [0u8; 4];
                    for ch in word.chars() {
                        let cw = self.measure_text(ch.encode_utf8(&mut buf), size, bold);
                        if !current.is_empty() && current_w + cw > max_width {
                            lines.push(std::mem::take(&mut current));
                            current_w = 0.0;
                        }
                        current.push(ch);
                        current_w += cw;
                    }
                    continue;
                }
                let proposed = if current.is_empty() {
                    ww
                } else {
                    current_w + space_w + ww
                };
                if !current.is_empty() && proposed > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_w = ww;
                } else {
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str(word);
                    current_w = proposed;
                }
            }
            lines.push(current);
        }
        lines
    }

    /// Append a blank page and make it current.
    fn new_page(&mut self);

    /// Make an existing page current; used by the decoration pass.
    fn set_page(&mut self, index: usize);

    /// Draw a single line of text. `y` is the baseline; `x` is interpreted
    /// according to `style.align`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint);

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: &Stroke);

    /// Record the resolved page number on the current page.
    fn label_page(&mut self, _label: PageLabel) {}

    fn serialize(&self) -> Result<Vec<u8>, Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLabel {
    pub number: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Left edge after alignment has been resolved.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub paint: Paint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: Stroke,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Text(TextRun),
    Rect(RectShape),
    Line(LineShape),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
    pub label: Option<PageLabel>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.text == needle)
    }
}

/// Recorded output of a generation run: pages of draw commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Indices of pages carrying a text run equal to `needle`.
    pub fn pages_with_text(&self, needle: &str) -> Vec<usize> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.contains_text(needle))
            .map(|(i, _)| i)
            .collect()
    }
}
