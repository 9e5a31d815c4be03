use crate::canvas::{Align, Canvas, Color, Paint, Stroke, TextStyle, pt_to_mm};

use super::Composer;

pub const DEFAULT_ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 2.0;
const TEXT_SIZE: f32 = 9.0;
const GRID: Stroke = Stroke {
    color: Color::RULE,
    width: 0.2,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub label: String,
    /// Absolute width in mm; `None` shares the remaining width equally.
    pub width: Option<f32>,
}

impl Column {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            width: None,
        }
    }

    pub fn fixed(label: impl Into<String>, width: f32) -> Self {
        Self {
            label: label.into(),
            width: Some(width),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bold: true,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::new(text)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
    /// Constant height of every body row; cell text never grows a row.
    pub row_height: f32,
    pub header_height: f32,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_ROW_HEIGHT,
        }
    }

    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self.header_height = height;
        self
    }

    /// Height of the header plus the first body row, which always share a page.
    pub fn lead_height(&self) -> f32 {
        if self.rows.is_empty() {
            self.header_height
        } else {
            self.header_height + self.row_height
        }
    }

    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }
}

/// Explicit widths are kept; the rest split what is left of `available`.
pub fn column_widths(columns: &[Column], available: f32) -> Vec<f32> {
    let fixed: f32 = columns.iter().filter_map(|c| c.width).sum();
    let flexible = columns.iter().filter(|c| c.width.is_none()).count();
    let share = if flexible > 0 {
        ((available - fixed) / flexible as f32).max(0.0)
    } else {
        0.0
    };
    columns.iter().map(|c| c.width.unwrap_or(share)).collect()
}

/// Shorten `text` with an ellipsis until it fits `max_width`.
pub(crate) fn fit_text(canvas: &dyn Canvas, text: &str, size: f32, bold: bool, max_width: f32) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if canvas.measure_text(&flat, size, bold) <= max_width {
        return flat;
    }
    let ellipsis_w = canvas.measure_text("\u{2026}", size, bold);
    let mut out = String::new();
    let mut width = 0.0f32;
    let mut buf = [0u8; 4];
    for ch in flat.chars() {
        let cw = canvas.measure_text(ch.encode_utf8(&mut buf), size, bold);
        if width + cw + ellipsis_w > max_width {
            break;
        }
        out.push(ch);
        width += cw;
    }
    let mut out = out.trim_end().to_string();
    out.push('\u{2026}');
    out
}

fn baseline(top: f32, height: f32, size: f32) -> f32 {
    // Centre the cap height (≈0.7em) in the row.
    top + height / 2.0 + pt_to_mm(size) * 0.35
}

fn draw_header(canvas: &mut dyn Canvas, table: &Table, widths: &[f32], x0: f32, y: f32) {
    let style = TextStyle::new(TEXT_SIZE).bold().color(Color::WHITE);
    let mut x = x0;
    for (col, &w) in table.columns.iter().zip(widths) {
        canvas.draw_rect(x, y, w, table.header_height, &Paint::fill(Color::NAVY).with_stroke(GRID));
        let label = fit_text(canvas, &col.label, TEXT_SIZE, true, w - 2.0 * CELL_PADDING);
        canvas.draw_text(&label, x + CELL_PADDING, baseline(y, table.header_height, TEXT_SIZE), &style);
        x += w;
    }
}

fn draw_row(canvas: &mut dyn Canvas, table: &Table, cells: &[Cell], widths: &[f32], x0: f32, y: f32) {
    let mut x = x0;
    for (i, &w) in widths.iter().enumerate() {
        canvas.draw_rect(x, y, w, table.row_height, &Paint::stroke(GRID));
        if let Some(cell) = cells.get(i).filter(|c| !c.text.is_empty()) {
            let mut style = TextStyle::new(TEXT_SIZE)
                .color(cell.color.unwrap_or(Color::BLACK))
                .align(Align::Left);
            style.bold = cell.bold;
            let text = fit_text(canvas, &cell.text, TEXT_SIZE, cell.bold, w - 2.0 * CELL_PADDING);
            canvas.draw_text(&text, x + CELL_PADDING, baseline(y, table.row_height, TEXT_SIZE), &style);
        }
        x += w;
    }
}

/// Lay out a table, repeating the header row at the top of every page the
/// table continues onto.
pub fn render_table(composer: &mut Composer<'_>, table: &Table) {
    let layout = composer.layout().clone();
    let widths = column_widths(&table.columns, layout.content_width());
    let x0 = layout.margin_left;
    let ncols = table.columns.len();

    let origin = composer.reserve_keep(table.header_height, table.lead_height() - table.header_height);
    draw_header(composer.canvas(), table, &widths, x0, origin.y);

    for (ri, row) in table.rows.iter().enumerate() {
        if row.len() != ncols {
            log::warn!(
                "Table row {ri} has {} cells for {ncols} columns; padding/truncating",
                row.len()
            );
        }
        let origin = composer.reserve(table.row_height);
        let row_top = if origin.new_page {
            log::debug!(
                "TABLE continues on page {} at row {ri}, repeating header",
                origin.page_index + 1
            );
            draw_header(composer.canvas(), table, &widths, x0, origin.y);
            composer.cursor_mut().grow(table.header_height);
            origin.y + table.header_height
        } else {
            origin.y
        };
        draw_row(composer.canvas(), table, &row[..row.len().min(ncols)], &widths, x0, row_top);
    }
}
