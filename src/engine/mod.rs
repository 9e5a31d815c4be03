mod cursor;
mod decorate;
mod table;

use crate::canvas::{Canvas, Color, Paint, Stroke, TextStyle, pt_to_mm};
use crate::config::LayoutConfig;
use crate::markup::{ContentBlock, NumberedItem, parse_blocks};

pub use cursor::{Cursor, WriteOrigin};
pub use decorate::{Footer, Masthead, decorate};
pub use table::{Cell, Column, DEFAULT_ROW_HEIGHT, Table, column_widths, render_table};

const BODY_SIZE: f32 = 10.0;
const NOTE_SIZE: f32 = 9.0;
const HEADING_SIZE: f32 = 11.5;
const BANNER_SIZE: f32 = 12.0;
const BANNER_HEIGHT: f32 = 10.0;
const HEADING_GAP: f32 = 1.5;
const BLOCK_GAP: f32 = 3.0;
const ITEM_GAP: f32 = 1.2;
const LIST_INDENT: f32 = 6.0;
const FACT_HEIGHT: f32 = 14.0;
const CALLOUT_PADDING: f32 = 4.0;

fn body_style() -> TextStyle {
    TextStyle::new(BODY_SIZE)
}

/// Distance from the top of a line slot to its baseline.
fn ascent(size: f32) -> f32 {
    pt_to_mm(size) * 0.85
}

/// Text drawn at `x` on one line of a list item.
type Run = (f32, String, TextStyle);

/// One labelled figure in a [`Composer::facts`] strip.
#[derive(Clone, Debug, PartialEq)]
pub struct Fact {
    pub label: String,
    pub value: String,
    pub color: Option<Color>,
}

impl Fact {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: None,
        }
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Draws section content onto a canvas, routing every vertical step through
/// the [`Cursor`].
pub struct Composer<'a> {
    canvas: &'a mut dyn Canvas,
    cursor: Cursor,
    layout: LayoutConfig,
}

impl<'a> Composer<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, layout: &LayoutConfig) -> Self {
        Self {
            canvas,
            cursor: Cursor::new(layout),
            layout: layout.clone(),
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    pub fn reserve(&mut self, height: f32) -> WriteOrigin {
        self.cursor.reserve(&mut *self.canvas, height)
    }

    pub fn reserve_keep(&mut self, height: f32, keep: f32) -> WriteOrigin {
        self.cursor.reserve_keep(&mut *self.canvas, height, keep)
    }

    pub fn gap(&mut self, amount: f32) {
        self.cursor.gap(amount);
    }

    /// Start a new page unless the current one is still empty.
    pub fn new_page(&mut self) -> bool {
        self.cursor.force_new_page(&mut *self.canvas)
    }

    fn draw_lines(&mut self, lines: &[String], x: f32, top: f32, style: &TextStyle) {
        let lh = style.line_height();
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            self.canvas
                .draw_text(line, x, top + i as f32 * lh + ascent(style.size), style);
        }
    }

    /// Wrapped text reserved as one unit when it fits on a page, line by
    /// line otherwise.
    fn text_block(&mut self, text: &str, x: f32, width: f32, style: &TextStyle) {
        let lines = self.canvas.wrap_text(text, style.size, style.bold, width);
        let lh = style.line_height();
        let height = lines.len() as f32 * lh;
        if height <= self.cursor.usable_height() {
            let origin = self.reserve(height);
            self.draw_lines(&lines, x, origin.y, style);
        } else {
            for line in &lines {
                let origin = self.reserve(lh);
                self.draw_lines(std::slice::from_ref(line), x, origin.y, style);
            }
        }
    }

    fn draw_row(&mut self, row: &[Run], top: f32) {
        for (x, text, style) in row {
            if !text.is_empty() {
                self.canvas
                    .draw_text(text, *x, top + ascent(style.size), style);
            }
        }
    }

    /// One list item, kept on a page when it fits and reserved row by row
    /// when it is taller than a page.
    fn list_item(&mut self, rows: &[Vec<Run>], lh: f32) {
        let height = rows.len() as f32 * lh;
        if height <= self.cursor.usable_height() {
            let origin = self.reserve(height);
            for (r, row) in rows.iter().enumerate() {
                self.draw_row(row, origin.y + r as f32 * lh);
            }
        } else {
            for row in rows {
                let origin = self.reserve(lh);
                self.draw_row(row, origin.y);
            }
        }
    }

    /// Coloured title bar opening a section.
    pub fn banner(&mut self, title: &str, new_page: bool) {
        if new_page {
            self.new_page();
        }
        let keep = body_style().line_height() * 3.0;
        let origin = self.reserve_keep(BANNER_HEIGHT, keep);
        let x = self.layout.margin_left;
        let w = self.layout.content_width();
        self.canvas
            .draw_rect(x, origin.y, w, BANNER_HEIGHT, &Paint::fill(Color::NAVY));
        let style = TextStyle::new(BANNER_SIZE).bold().color(Color::WHITE);
        let baseline = origin.y + BANNER_HEIGHT / 2.0 + pt_to_mm(BANNER_SIZE) * 0.35;
        self.canvas
            .draw_text(&title.to_uppercase(), x + 4.0, baseline, &style);
        self.gap(4.0);
    }

    /// Section heading kept with two body lines.
    pub fn heading(&mut self, text: &str) {
        self.heading_keep(text, body_style().line_height() * 2.0);
    }

    /// Heading kept on the same page as the header and first row of `table`.
    pub fn table_heading(&mut self, text: &str, table: &Table) {
        self.heading_keep(text, HEADING_GAP + table.lead_height());
    }

    /// Heading that moves to the next page unless `keep` more space
    /// follows it.
    pub fn heading_keep(&mut self, text: &str, keep: f32) {
        let style = TextStyle::new(HEADING_SIZE).bold().color(Color::NAVY);
        let lines = self.canvas.wrap_text(
            text,
            style.size,
            true,
            self.layout.content_width(),
        );
        let height = lines.len() as f32 * style.line_height();
        let origin = self.reserve_keep(height, keep);
        let x = self.layout.margin_left;
        self.draw_lines(&lines, x, origin.y, &style);
        self.gap(HEADING_GAP);
    }

    pub fn paragraph(&mut self, text: &str) {
        let x = self.layout.margin_left;
        let w = self.layout.content_width();
        self.text_block(text, x, w, &body_style());
        self.gap(BLOCK_GAP);
    }

    /// `Label: value` on one line, the label in bold.
    pub fn key_value(&mut self, label: &str, value: &str) {
        let x = self.layout.margin_left;
        let w = self.layout.content_width();
        let style = body_style();
        let label = format!("{label}:");
        let label_w = self.canvas.measure_text(&label, style.size, true)
            + self.canvas.measure_text(" ", style.size, false);
        let lines = self.canvas.wrap_text(value, style.size, false, (w - label_w).max(w * 0.5));
        let origin = self.reserve(lines.len() as f32 * style.line_height());
        self.canvas
            .draw_text(&label, x, origin.y + ascent(style.size), &style.bold());
        self.draw_lines(&lines, x + label_w, origin.y, &style);
        self.gap(ITEM_GAP);
    }

    /// Muted single-paragraph remark, e.g. for missing data.
    pub fn note(&mut self, text: &str) {
        let x = self.layout.margin_left;
        let w = self.layout.content_width();
        let style = TextStyle::new(NOTE_SIZE).color(Color::MUTED);
        self.text_block(text, x, w, &style);
        self.gap(BLOCK_GAP);
    }

    pub fn bullet_list(&mut self, intro: Option<&str>, items: &[String]) {
        let x = self.layout.margin_left;
        let w = self.layout.content_width();
        let style = body_style();
        let lh = style.line_height();
        if let Some(intro) = intro {
            self.text_block(intro, x, w, &style);
            self.gap(ITEM_GAP);
        }
        for item in items {
            let lines = self.canvas.wrap_text(item, style.size, false, w - LIST_INDENT);
            let mut rows: Vec<Vec<Run>> = lines
                .into_iter()
                .map(|line| vec![(x + LIST_INDENT, line, style)])
                .collect();
            let bullet = (x + 1.5, "\u{2022}".to_string(), style);
            match rows.first_mut() {
                Some(first) => first.insert(0, bullet),
                None => rows.push(vec![bullet]),
            }
            self.list_item(&rows, lh);
            self.gap(ITEM_GAP);
        }
        self.gap(BLOCK_GAP);
    }

    pub fn numbered_list(&mut self, intro: Option<&str>, items: &[NumberedItem]) {
        let x = self.layout.margin_left;
        let w = self.layout.content_width();
        let style = body_style();
        let bold = style.bold();
        let lh = style.line_height();
        let avail = w - LIST_INDENT;
        if let Some(intro) = intro {
            self.text_block(intro, x, w, &style);
            self.gap(ITEM_GAP);
        }
        for (i, item) in items.iter().enumerate() {
            let number = format!("{}.", item.number.unwrap_or(i as u32 + 1));
            let label = item.label.as_ref().map(|l| format!("{l}:"));
            let label_w = label
                .as_ref()
                .map(|l| {
                    self.canvas.measure_text(l, style.size, true)
                        + self.canvas.measure_text(" ", style.size, false)
                })
                .unwrap_or(0.0);

            // Short labels hang the body to their right; long ones get their
            // own lines with the body underneath.
            let hanging = label_w <= avail * 0.5;
            let (label_lines, body_lines, body_x) = match &label {
                Some(l) if !hanging => (
                    self.canvas.wrap_text(l, style.size, true, avail),
                    self.canvas.wrap_text(&item.body, style.size, false, avail),
                    x + LIST_INDENT,
                ),
                Some(l) => (
                    vec![l.clone()],
                    self.canvas
                        .wrap_text(&item.body, style.size, false, avail - label_w),
                    x + LIST_INDENT + label_w,
                ),
                None => (
                    Vec::new(),
                    self.canvas.wrap_text(&item.body, style.size, false, avail),
                    x + LIST_INDENT,
                ),
            };
            let body_lines: Vec<String> = body_lines.into_iter().filter(|l| !l.is_empty()).collect();
            let label_runs = label_lines
                .into_iter()
                .map(|line| (x + LIST_INDENT, line, bold));
            let body_runs = body_lines
                .into_iter()
                .map(|line| (body_x, line, style));
            let mut rows: Vec<Vec<Run>> = if hanging {
                let mut label_runs = label_runs.peekable();
                let mut body_runs = body_runs.peekable();
                let mut rows: Vec<Vec<Run>> = Vec::new();
                while label_runs.peek().is_some() || body_runs.peek().is_some() {
                    rows.push(label_runs.next().into_iter().chain(body_runs.next()).collect());
                }
                rows
            } else {
                label_runs.chain(body_runs).map(|run| vec![run]).collect()
            };
            let number = (x, number, bold);
            match rows.first_mut() {
                Some(first) => first.insert(0, number),
                None => rows.push(vec![number]),
            }
            self.list_item(&rows, lh);
            self.gap(ITEM_GAP);
        }
        self.gap(BLOCK_GAP);
    }

    /// Classify narrative text and draw each resulting block.
    pub fn blocks(&mut self, text: &str) {
        for block in parse_blocks(text) {
            match block {
                ContentBlock::Heading(text) => self.heading(&text),
                ContentBlock::BulletList { intro, items } => {
                    self.bullet_list(intro.as_deref(), &items)
                }
                ContentBlock::NumberedList { intro, items } => {
                    self.numbered_list(intro.as_deref(), &items)
                }
                ContentBlock::Paragraph(text) => self.paragraph(&text),
            }
        }
    }

    /// A strip of labelled figures on a tinted panel.
    pub fn facts(&mut self, facts: &[Fact]) {
        if facts.is_empty() {
            return;
        }
        let origin = self.reserve(FACT_HEIGHT);
        let x0 = self.layout.margin_left;
        let w = self.layout.content_width();
        self.canvas.draw_rect(
            x0,
            origin.y,
            w,
            FACT_HEIGHT,
            &Paint::fill(Color::PANEL).with_stroke(Stroke::new(Color::RULE, 0.2)),
        );
        let col_w = w / facts.len() as f32;
        let label_style = TextStyle::new(8.0).color(Color::MUTED);
        for (i, fact) in facts.iter().enumerate() {
            let x = x0 + i as f32 * col_w + 4.0;
            self.canvas
                .draw_text(&fact.label.to_uppercase(), x, origin.y + 5.0, &label_style);
            let value_style = TextStyle::new(12.0)
                .bold()
                .color(fact.color.unwrap_or(Color::NAVY));
            self.canvas
                .draw_text(&fact.value, x, origin.y + 11.0, &value_style);
        }
        self.gap(BLOCK_GAP + 1.0);
    }

    /// Boxed note with a bold title, kept on one page.
    pub fn callout(&mut self, title: &str, text: &str) {
        let x = self.layout.margin_left;
        let w = self.layout.content_width();
        let title_style = TextStyle::new(BODY_SIZE).bold().color(Color::NAVY);
        let text_style = TextStyle::new(NOTE_SIZE).color(Color::SLATE);
        let lines = self.canvas.wrap_text(
            text,
            text_style.size,
            false,
            w - 2.0 * CALLOUT_PADDING,
        );
        let height = 2.0 * CALLOUT_PADDING
            + title_style.line_height()
            + 1.0
            + lines.len() as f32 * text_style.line_height();
        let origin = self.reserve(height);
        self.canvas.draw_rect(
            x,
            origin.y,
            w,
            height,
            &Paint::fill(Color::PANEL).with_stroke(Stroke::new(Color::RULE, 0.3)),
        );
        let inner_x = x + CALLOUT_PADDING;
        let top = origin.y + CALLOUT_PADDING;
        self.draw_lines(&[title.to_string()], inner_x, top, &title_style);
        self.draw_lines(
            &lines,
            inner_x,
            top + title_style.line_height() + 1.0,
            &text_style,
        );
        self.gap(BLOCK_GAP + 1.0);
    }

    pub fn table(&mut self, table: &Table) {
        render_table(self, table);
        self.gap(BLOCK_GAP + 1.0);
    }
}
