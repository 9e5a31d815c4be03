mod content;

use std::collections::HashSet;

use pdf_writer::{Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::canvas::{
    Align, Canvas, Document, DrawCommand, LineShape, PT_PER_MM, Page, PageLabel, Paint,
    RectShape, Stroke, TextRun, TextStyle,
};
use crate::config::LayoutConfig;
use crate::error::Error;
use crate::fonts::{FontFamily, register_font};

use content::render_page;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

/// Canvas that records draw commands and serializes them as a PDF.
pub struct PdfCanvas {
    page_width: f32,
    page_height: f32,
    fonts: FontFamily,
    document: Document,
    current: usize,
    title: Option<String>,
}

impl PdfCanvas {
    /// A canvas with one blank page.
    pub fn new(layout: &LayoutConfig, fonts: FontFamily) -> Self {
        Self {
            page_width: layout.page_width,
            page_height: layout.page_height,
            fonts,
            document: Document {
                pages: vec![Page::default()],
            },
            current: 0,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn push(&mut self, command: DrawCommand) {
        self.document.pages[self.current].commands.push(command);
    }

    fn used_chars(&self, bold: bool) -> HashSet<char> {
        let mut chars: HashSet<char> = self
            .document
            .pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| t.style.bold == bold)
            .flat_map(|t| t.text.chars())
            .collect();
        chars.insert(' ');
        chars
    }
}

impl Canvas for PdfCanvas {
    fn page_width(&self) -> f32 {
        self.page_width
    }

    fn page_height(&self) -> f32 {
        self.page_height
    }

    fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn measure_text(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.fonts.face(bold).text_width_pt(text, size) / PT_PER_MM
    }

    fn new_page(&mut self) {
        self.document.pages.push(Page::default());
        self.current = self.document.pages.len() - 1;
    }

    fn set_page(&mut self, index: usize) {
        debug_assert!(index < self.document.pages.len());
        self.current = index.min(self.document.pages.len() - 1);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let width = self.measure_text(text, style.size, style.bold);
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.push(DrawCommand::Text(TextRun {
            text: text.to_string(),
            x: left,
            y,
            width,
            style: *style,
        }));
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        self.push(DrawCommand::Rect(RectShape {
            x,
            y,
            w,
            h,
            paint: *paint,
        }));
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: &Stroke) {
        self.push(DrawCommand::Line(LineShape {
            x1,
            y1,
            x2,
            y2,
            stroke: *stroke,
        }));
    }

    fn label_page(&mut self, label: PageLabel) {
        self.document.pages[self.current].label = Some(label);
    }

    fn serialize(&self) -> Result<Vec<u8>, Error> {
        let t0 = std::time::Instant::now();
        if self.document.pages.is_empty() {
            return Err(Error::Pdf("document has no pages".into()));
        }

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();

        let regular = register_font(
            &mut pdf,
            &self.fonts.regular,
            REGULAR.to_string(),
            &mut alloc,
            &self.used_chars(false),
        )?;
        let bold = register_font(
            &mut pdf,
            &self.fonts.bold,
            BOLD.to_string(),
            &mut alloc,
            &self.used_chars(true),
        )?;
        let t_fonts = t0.elapsed();

        let n = self.document.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        let to_pt = |mm: f32| mm * PT_PER_MM;
        let page_w = to_pt(self.page_width);
        let page_h = to_pt(self.page_height);

        for (i, page) in self.document.pages.iter().enumerate() {
            let raw = render_page(page, page_h, &regular, &bold);
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, page_w, page_h))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(regular.pdf_name.as_bytes()), regular.font_ref);
            fonts.pair(Name(bold.pdf_name.as_bytes()), bold.font_ref);
        }

        {
            let mut info = pdf.document_info(info_id);
            if let Some(title) = &self.title {
                info.title(TextStr(title));
            }
            info.producer(TextStr(concat!("boardreport-pdf ", env!("CARGO_PKG_VERSION"))));
        }

        let bytes = pdf.finish();
        log::debug!(
            "Serialized {n} pages: fonts={:.1}ms, total={:.1}ms, {} bytes",
            t_fonts.as_secs_f64() * 1000.0,
            t0.elapsed().as_secs_f64() * 1000.0,
            bytes.len(),
        );
        Ok(bytes)
    }
}
