use crate::canvas::{Align, Canvas, Color, PageLabel, Stroke, TextStyle};
use crate::config::{LayoutConfig, MIN_FIRST_PAGE_TOP, MIN_MARGIN_BOTTOM, MIN_MARGIN_TOP};

/// Header content stamped on every page.
#[derive(Clone, Debug, PartialEq)]
pub struct Masthead {
    pub title: String,
    pub subtitle: String,
    pub period: String,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Footer {
    /// Left-aligned notice, e.g. a confidentiality marking.
    pub notice: String,
    /// Right-aligned product attribution.
    pub attribution: String,
}

/// Masthead rule sits this far above the first-page body.
const FULL_RULE_OFFSET: f32 = 10.0;
/// Compact header rule sits this far above the body of pages 2..N.
const COMPACT_RULE_OFFSET: f32 = 9.0;
/// Footer rule sits this far below the lowest body line.
const FOOTER_RULE_OFFSET: f32 = 6.0;

fn full_header(canvas: &mut dyn Canvas, layout: &LayoutConfig, masthead: &Masthead) {
    let left = layout.margin_left;
    let right = layout.page_width - layout.margin_right;
    let rule_y = layout.first_page_top - FULL_RULE_OFFSET;
    canvas.draw_text(
        &masthead.title,
        left,
        rule_y - 18.0,
        &TextStyle::new(18.0).bold().color(Color::NAVY),
    );
    canvas.draw_text(
        &masthead.subtitle,
        left,
        rule_y - 11.0,
        &TextStyle::new(11.0).color(Color::SLATE),
    );
    let meta = TextStyle::new(9.0).color(Color::MUTED);
    canvas.draw_text(&masthead.period, left, rule_y - 4.5, &meta);
    canvas.draw_text(&masthead.date, right, rule_y - 4.5, &meta.align(Align::Right));
    canvas.draw_line(left, rule_y, right, rule_y, &Stroke::new(Color::NAVY, 0.8));
}

fn compact_header(canvas: &mut dyn Canvas, layout: &LayoutConfig, masthead: &Masthead) {
    let left = layout.margin_left;
    let right = layout.page_width - layout.margin_right;
    let rule_y = layout.margin_top - COMPACT_RULE_OFFSET;
    canvas.draw_text(
        &masthead.title,
        left,
        rule_y - 3.0,
        &TextStyle::new(9.0).bold().color(Color::NAVY),
    );
    canvas.draw_text(
        &masthead.period,
        right,
        rule_y - 3.0,
        &TextStyle::new(9.0).color(Color::MUTED).align(Align::Right),
    );
    canvas.draw_line(left, rule_y, right, rule_y, &Stroke::new(Color::RULE, 0.2));
}

fn footer(canvas: &mut dyn Canvas, layout: &LayoutConfig, footer: &Footer, label: PageLabel) {
    let left = layout.margin_left;
    let right = layout.page_width - layout.margin_right;
    let rule_y = layout.content_bottom() + FOOTER_RULE_OFFSET;
    let baseline = rule_y + 5.0;
    let style = TextStyle::new(8.0).color(Color::MUTED);
    canvas.draw_line(left, rule_y, right, rule_y, &Stroke::new(Color::RULE, 0.2));
    canvas.draw_text(&footer.notice, left, baseline, &style);
    canvas.draw_text(
        &format!("Page {} of {}", label.number, label.total),
        layout.page_width / 2.0,
        baseline,
        &style.align(Align::Center),
    );
    canvas.draw_text(&footer.attribution, right, baseline, &style.align(Align::Right));
}

/// Second pass over a fully laid out document: stamps headers and
/// `Page i of N` footers now that the page count is final.
pub fn decorate(canvas: &mut dyn Canvas, layout: &LayoutConfig, masthead: &Masthead, footer_text: &Footer) {
    let total = canvas.page_count();
    if layout.first_page_top < MIN_FIRST_PAGE_TOP
        || layout.margin_top < MIN_MARGIN_TOP
        || layout.margin_bottom < MIN_MARGIN_BOTTOM
    {
        log::warn!("Page margins are too small for the header and footer; they may be clipped");
    }
    for index in 0..total {
        canvas.set_page(index);
        if index == 0 {
            full_header(canvas, layout, masthead);
        } else {
            compact_header(canvas, layout, masthead);
        }
        let label = PageLabel {
            number: index + 1,
            total,
        };
        footer(canvas, layout, footer_text, label);
        canvas.label_page(label);
    }
    log::debug!("Decorated {total} pages");
}
