mod common;

use boardreport_pdf::canvas::Canvas;
use boardreport_pdf::engine::{Cell, Column, Composer, Cursor, Table};
use boardreport_pdf::fonts::FontFamily;
use boardreport_pdf::{LayoutConfig, PdfCanvas};
use proptest::prelude::*;

fn canvas(layout: &LayoutConfig) -> PdfCanvas {
    PdfCanvas::new(layout, FontFamily::default())
}

proptest! {
    #[test]
    fn reserved_blocks_never_cross_the_bottom_margin(
        steps in prop::collection::vec((0.5f32..=1.0, 0.0f32..12.0, 0.0f32..6.0), 1..120)
    ) {
        let layout = LayoutConfig::default();
        let mut canvas = canvas(&layout);
        let mut cursor = Cursor::new(&layout);
        let usable = cursor.usable_height();
        let mut last_page = 0;
        for (fraction, keep, gap) in steps {
            let h = usable * fraction * fraction * fraction;
            let origin = cursor.reserve_keep(&mut canvas, h, keep);
            prop_assert!(origin.y + h <= layout.content_bottom() + 1e-3,
                "block of {h} at y={} on page {}", origin.y, origin.page_index);
            prop_assert!(origin.y >= layout.margin_top);
            prop_assert!(origin.page_index >= last_page);
            prop_assert_eq!(origin.page_index + 1, canvas.page_count());
            last_page = origin.page_index;
            cursor.gap(gap);
        }
    }
}

#[test]
fn table_continuation_repeats_header_once() {
    common::init_logging();
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    let mut table = Table::new(vec![
        Column::new("Indicator"),
        Column::fixed("Value", 30.0),
        Column::fixed("Status", 30.0),
    ]);
    for i in 0..30 {
        table.push_row([Cell::new(format!("Row {i}")), Cell::new("1"), Cell::new("ok")]);
    }
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        composer.table(&table);
    }

    let doc = canvas.document();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages_with_text("Indicator"), vec![0, 1]);
    for page in &doc.pages {
        assert_eq!(page.texts().filter(|t| t.text == "Indicator").count(), 1);
    }

    let second = &doc.pages[1];
    let header_y = second.texts().find(|t| t.text == "Indicator").unwrap().y;
    let first_row = second
        .texts()
        .find(|t| t.text.starts_with("Row "))
        .expect("rows continue on page 2");
    assert!(header_y < first_row.y);
    assert_eq!(first_row.text, "Row 27");
    for page in &doc.pages {
        assert!(page.texts().all(|t| t.y <= layout.content_bottom()));
    }
}

#[test]
fn header_is_not_orphaned_at_page_bottom() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    let mut table = Table::new(vec![Column::new("Name"), Column::new("Value")]);
    table.push_row(["a", "1"]);
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        let room = composer.cursor().remaining();
        composer.reserve(room - 12.0);
        composer.table(&table);
    }
    let doc = canvas.document();
    assert_eq!(doc.pages_with_text("Name"), vec![1]);
    assert_eq!(doc.pages_with_text("a"), vec![1]);
}

#[test]
fn long_paragraph_flows_across_pages_line_by_line() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    let sentence = "Resilience depends on people, process and suppliers working together. ";
    let text = sentence.repeat(300);
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        composer.paragraph(&text);
    }
    let doc = canvas.document();
    assert!(doc.page_count() >= 3);
    for page in &doc.pages {
        for run in page.texts() {
            assert!(run.y <= layout.content_bottom());
            assert!(run.x + run.width <= layout.page_width - layout.margin_right + 0.01);
        }
    }
}

#[test]
fn overlong_cell_text_is_truncated_with_ellipsis() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    let mut table = Table::new(vec![Column::fixed("Risk", 30.0), Column::new("Mitigation")]);
    table.push_row([
        "A supplier concentration risk that cannot possibly fit in thirty millimetres",
        "Dual source",
    ]);
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        composer.table(&table);
    }
    let page = &canvas.document().pages[0];
    let cell = page
        .texts()
        .find(|t| t.text.starts_with("A supplier"))
        .expect("truncated cell");
    assert!(cell.text.ends_with('\u{2026}'));
    assert!(cell.width <= 30.0);
}

#[test]
fn wrap_breaks_words_wider_than_the_line() {
    let layout = LayoutConfig::default();
    let canvas = canvas(&layout);
    let lines = canvas.wrap_text("Supercalifragilisticexpialidocious", 10.0, false, 20.0);
    assert!(lines.len() > 1);
    assert_eq!(lines.concat(), "Supercalifragilisticexpialidocious");
    for line in &lines {
        assert!(canvas.measure_text(line, 10.0, false) <= 20.0);
    }
    assert_eq!(canvas.wrap_text("", 10.0, false, 20.0), vec![String::new()]);
    assert_eq!(canvas.wrap_text("a\nb", 10.0, false, 100.0), vec!["a", "b"]);
}

fn assert_within_margins(doc: &boardreport_pdf::Document, layout: &LayoutConfig) {
    for (i, page) in doc.pages.iter().enumerate() {
        for run in page.texts() {
            assert!(
                run.y <= layout.content_bottom(),
                "{:?} at y={} on page {} crosses the bottom margin",
                run.text,
                run.y,
                i + 1
            );
        }
    }
}

fn runs_equal(doc: &boardreport_pdf::Document, text: &str) -> Vec<usize> {
    doc.pages
        .iter()
        .enumerate()
        .flat_map(|(i, p)| p.texts().filter(|t| t.text == text).map(move |_| i))
        .collect()
}

#[test]
fn bullet_taller_than_a_page_flows_line_by_line() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    let text = format!(
        "- {}",
        "Suppliers must confirm continuity arrangements in writing. ".repeat(120)
    );
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        composer.blocks(&text);
    }
    let doc = canvas.document();
    assert!(doc.page_count() >= 2);
    assert_within_margins(doc, &layout);
    assert_eq!(runs_equal(doc, "\u{2022}"), vec![0]);
    let bullet = doc.pages[0].texts().find(|t| t.text == "\u{2022}").unwrap();
    let first_line = doc.pages[0]
        .texts()
        .find(|t| t.text.starts_with("Suppliers"))
        .unwrap();
    assert_eq!(bullet.y, first_line.y);
}

#[test]
fn numbered_item_taller_than_a_page_flows_line_by_line() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    let text = format!(
        "1. Suppliers: {}",
        "Confirm continuity arrangements and escalation contacts. ".repeat(120)
    );
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        composer.blocks(&text);
    }
    let doc = canvas.document();
    assert!(doc.page_count() >= 2);
    assert_within_margins(doc, &layout);
    assert_eq!(runs_equal(doc, "1."), vec![0]);
    assert_eq!(runs_equal(doc, "Suppliers:"), vec![0]);
    let number = doc.pages[0].texts().find(|t| t.text == "1.").unwrap();
    let label = doc.pages[0].texts().find(|t| t.text == "Suppliers:").unwrap();
    assert_eq!(number.y, label.y);
}

#[test]
fn short_list_item_stays_in_one_piece() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        let room = composer.cursor().remaining();
        composer.reserve(room - 6.0);
        composer.bullet_list(None, &["Line one of a two line item. ".repeat(8)]);
    }
    let doc = canvas.document();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(runs_equal(doc, "\u{2022}"), vec![1]);
    assert!(doc.pages[0].texts().next().is_none());
}

#[test]
fn numbers_written_in_the_text_are_kept() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        composer.blocks(
            "1. Isolate: close the inlet valves\n\n2. Notify: call the regulator\n\n3. Sample: test the outflow",
        );
        composer.blocks("4. Resume: restore normal supply\n5. Review: hold a debrief");
    }
    let page = &canvas.document().pages[0];
    let numbers: Vec<&str> = page
        .texts()
        .filter(|t| t.style.bold && t.text.ends_with('.') && t.text.len() <= 3)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(numbers, vec!["1.", "2.", "3.", "4.", "5."]);
}

#[test]
fn heading_before_a_table_moves_with_its_first_row() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    let mut table = Table::new(vec![Column::new("Name"), Column::new("Value")]);
    table.push_row(["a", "1"]);
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        let room = composer.cursor().remaining();
        // Enough for a heading and two body lines, not for the header and a row.
        composer.reserve(room - 18.0);
        composer.table_heading("Key Risks", &table);
        composer.table(&table);
    }
    let doc = canvas.document();
    assert_eq!(doc.pages_with_text("Key Risks"), vec![1]);
    assert_eq!(doc.pages_with_text("Name"), vec![1]);
    let heading = doc.pages[1].texts().find(|t| t.text == "Key Risks").unwrap();
    let header = doc.pages[1].texts().find(|t| t.text == "Name").unwrap();
    assert!(heading.y < header.y);
}

#[test]
fn plain_heading_keeps_two_body_lines() {
    let layout = LayoutConfig::default();
    let mut canvas = canvas(&layout);
    {
        let mut composer = Composer::new(&mut canvas, &layout);
        let room = composer.cursor().remaining();
        composer.reserve(room - 18.0);
        composer.heading("Recent Changes");
    }
    assert_eq!(canvas.document().pages_with_text("Recent Changes"), vec![0]);
}
