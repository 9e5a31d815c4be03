use pdf_writer::{Content, Name, Str};

use crate::canvas::{Color, DrawCommand, PT_PER_MM, Page};
use crate::fonts::FontEntry;

fn set_fill(content: &mut Content, color: Color) {
    let (r, g, b) = color.unit_rgb();
    content.set_fill_rgb(r, g, b);
}

fn set_stroke(content: &mut Content, color: Color) {
    let (r, g, b) = color.unit_rgb();
    content.set_stroke_rgb(r, g, b);
}

/// Build the content stream for one recorded page. Page geometry is
/// top-down millimetres; PDF user space is bottom-up points.
pub(super) fn render_page(page: &Page, page_h: f32, regular: &FontEntry, bold: &FontEntry) -> Vec<u8> {
    let to_pt = |mm: f32| mm * PT_PER_MM;
    let flip = |mm: f32| page_h - mm * PT_PER_MM;
    let mut content = Content::new();

    for command in &page.commands {
        match command {
            DrawCommand::Rect(r) => {
                content.save_state();
                if let Some(fill) = r.paint.fill {
                    set_fill(&mut content, fill);
                }
                if let Some(stroke) = r.paint.stroke {
                    set_stroke(&mut content, stroke.color);
                    content.set_line_width(to_pt(stroke.width));
                }
                content.rect(to_pt(r.x), flip(r.y + r.h), to_pt(r.w), to_pt(r.h));
                match (r.paint.fill.is_some(), r.paint.stroke.is_some()) {
                    (true, true) => content.fill_nonzero_and_stroke(),
                    (true, false) => content.fill_nonzero(),
                    (false, true) => content.stroke(),
                    (false, false) => content.end_path(),
                };
                content.restore_state();
            }
            DrawCommand::Line(l) => {
                content.save_state();
                set_stroke(&mut content, l.stroke.color);
                content.set_line_width(to_pt(l.stroke.width));
                content.move_to(to_pt(l.x1), flip(l.y1));
                content.line_to(to_pt(l.x2), flip(l.y2));
                content.stroke();
                content.restore_state();
            }
            DrawCommand::Text(t) => {
                let font = if t.style.bold { bold } else { regular };
                let bytes = font.encode(&t.text);
                content.save_state();
                set_fill(&mut content, t.style.color);
                content
                    .begin_text()
                    .set_font(Name(font.pdf_name.as_bytes()), t.style.size)
                    .next_line(to_pt(t.x), flip(t.y))
                    .show(Str(&bytes))
                    .end_text();
                content.restore_state();
            }
        }
    }

    content.finish().as_slice().to_vec()
}
