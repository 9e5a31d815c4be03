mod common;

use boardreport_pdf::canvas::{Canvas, PageLabel, Paint, Stroke, TextStyle};
use boardreport_pdf::fonts::FontFamily;
use boardreport_pdf::progress::{GenerateOptions, ProgressEvent};
use boardreport_pdf::{BoardReport, Error, PdfCanvas, RenderConfig, assemble};

/// Lays out like [`PdfCanvas`] but refuses to serialize.
struct FullDisk(PdfCanvas);

impl Canvas for FullDisk {
    fn page_width(&self) -> f32 {
        self.0.page_width()
    }
    fn page_height(&self) -> f32 {
        self.0.page_height()
    }
    fn page_count(&self) -> usize {
        self.0.page_count()
    }
    fn current_page(&self) -> usize {
        self.0.current_page()
    }
    fn measure_text(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.0.measure_text(text, size, bold)
    }
    fn new_page(&mut self) {
        self.0.new_page()
    }
    fn set_page(&mut self, index: usize) {
        self.0.set_page(index)
    }
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.0.draw_text(text, x, y, style)
    }
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        self.0.draw_rect(x, y, w, h, paint)
    }
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: &Stroke) {
        self.0.draw_line(x1, y1, x2, y2, stroke)
    }
    fn label_page(&mut self, label: PageLabel) {
        self.0.label_page(label)
    }
    fn serialize(&self) -> Result<Vec<u8>, Error> {
        Err(Error::Pdf("no space left on device".into()))
    }
}

#[test]
fn serialization_failure_propagates_without_completion() {
    let data = common::q1_report();
    let config = RenderConfig::default();
    let mut canvas = FullDisk(PdfCanvas::new(&config.layout, FontFamily::default()));
    let mut percents = Vec::new();
    let mut sink = |e: ProgressEvent| percents.push(e.percent);
    let result = assemble(
        &BoardReport::new(&data, &config),
        &mut canvas,
        &config,
        &mut GenerateOptions::with_progress(&mut sink),
    );

    match result {
        Err(Error::Pdf(msg)) => assert_eq!(msg, "no space left on device"),
        other => panic!("expected PDF error, got {other:?}"),
    }
    assert_eq!(percents.last(), Some(&98));
    assert!(!percents.contains(&100));
}

#[test]
fn decoration_completes_before_serialization_fails() {
    let data = common::q1_report();
    let config = RenderConfig::default();
    let mut canvas = FullDisk(PdfCanvas::new(&config.layout, FontFamily::default()));
    let _ = assemble(
        &BoardReport::new(&data, &config),
        &mut canvas,
        &config,
        &mut GenerateOptions::default(),
    );
    let doc = canvas.0.document();
    assert_eq!(doc.page_count(), 6);
    assert!(doc.pages.iter().all(|p| p.label.is_some()));
}
