use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::config::FontConfig;
use crate::error::Error;

#[derive(Clone, Debug)]
enum FaceSource {
    /// One of the base-14 Helvetica faces, WinAnsi encoded, never embedded.
    Helvetica { bold: bool },
    TrueType { name: String, data: Arc<Vec<u8>> },
}

/// A single font face able to measure text and register itself in a PDF.
#[derive(Clone, Debug)]
pub struct FontFace {
    source: FaceSource,
}

impl FontFace {
    pub fn helvetica(bold: bool) -> Self {
        Self {
            source: FaceSource::Helvetica { bold },
        }
    }

    pub fn from_bytes(name: &str, data: Vec<u8>) -> Result<Self, Error> {
        Face::parse(&data, 0).map_err(|e| Error::Font(format!("{name}: {e}")))?;
        Ok(Self {
            source: FaceSource::TrueType {
                name: name.to_string(),
                data: Arc::new(data),
            },
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, path.display()),
            ))
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("EmbeddedFont");
        Self::from_bytes(name, data)
    }

    pub fn name(&self) -> &str {
        match &self.source {
            FaceSource::Helvetica { bold: false } => "Helvetica",
            FaceSource::Helvetica { bold: true } => "Helvetica-Bold",
            FaceSource::TrueType { name, .. } => name,
        }
    }

    /// Advance width of `text` at `font_size` points, in points.
    pub fn text_width_pt(&self, text: &str, font_size: f32) -> f32 {
        match &self.source {
            FaceSource::Helvetica { bold } => text
                .chars()
                .map(|ch| helvetica_width(char_to_winansi(ch), *bold))
                .sum::<f32>()
                * font_size
                / 1000.0,
            FaceSource::TrueType { data, .. } => {
                let Ok(face) = Face::parse(data, 0) else {
                    return 0.0;
                };
                let units = face.units_per_em() as f32;
                let notdef = face
                    .glyph_hor_advance(ttf_parser::GlyphId(0))
                    .unwrap_or(0) as f32;
                text.chars()
                    .map(|ch| {
                        face.glyph_index(ch)
                            .and_then(|gid| face.glyph_hor_advance(gid))
                            .map(|adv| adv as f32)
                            .unwrap_or(notdef)
                    })
                    .sum::<f32>()
                    / units
                    * font_size
            }
        }
    }
}

/// Regular and bold faces used by a canvas.
#[derive(Clone, Debug)]
pub struct FontFamily {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl Default for FontFamily {
    fn default() -> Self {
        Self {
            regular: FontFace::helvetica(false),
            bold: FontFace::helvetica(true),
        }
    }
}

impl FontFamily {
    pub fn load(config: &FontConfig) -> Result<Self, Error> {
        let regular = match &config.regular {
            Some(path) => FontFace::from_file(path)?,
            None => FontFace::helvetica(false),
        };
        // A custom regular face without a bold companion doubles as bold so
        // glyph coverage stays consistent.
        let bold = match (&config.bold, &config.regular) {
            (Some(path), _) => FontFace::from_file(path)?,
            (None, Some(_)) => regular.clone(),
            (None, None) => FontFace::helvetica(true),
        };
        log::debug!("Fonts: regular={} bold={}", regular.name(), bold.name());
        Ok(Self { regular, bold })
    }

    pub fn face(&self, bold: bool) -> &FontFace {
        if bold { &self.bold } else { &self.regular }
    }
}

/// A font registered in a PDF under a resource name.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    char_to_gid: Option<BTreeMap<char, u16>>,
}

impl FontEntry {
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable characters become `?`, matching how they are measured.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match char_to_winansi(c) {
            0 => b'?',
            b => b,
        })
        .collect()
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &BTreeMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

// Helvetica AFM widths for ASCII 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, //
];

/// Helvetica width at 1000 units/em for a WinAnsi byte (0 = unmappable, drawn as `?`).
fn helvetica_width(byte: u8, bold: bool) -> f32 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let w = match byte {
        0 => table[(b'?' - 32) as usize],
        32..=126 => table[(byte - 32) as usize],
        0x85 | 0x89 | 0x97 => 1000,
        0x95 => 350,
        0x91 | 0x92 if bold => 278,
        0x91 | 0x92 => 222,
        0x93 | 0x94 if bold => 500,
        0x93 | 0x94 => 333,
        _ => 556,
    };
    w as f32
}

/// Embed a TrueType/OpenType font as a CIDFont (Type0 composite) with Identity-H encoding.
/// The font data is subsetted to only include glyphs used in the document.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    font_name: &str,
    font_data: &[u8],
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Option<BTreeMap<char, u16>> {
    let face = Face::parse(font_data, 0).ok()?;
    let descriptor_ref = alloc();
    let data_ref = alloc();

    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = BTreeMap::new();
    let mut chars: Vec<char> = used_chars.iter().copied().collect();
    chars.sort_unstable();
    for ch in chars {
        match face.glyph_index(ch) {
            Some(gid) => {
                char_to_gid.insert(ch, remapper.remap(gid.0));
            }
            None => log::warn!("Font {font_name} has no glyph for {ch:?}"),
        }
    }

    let subset_data = subsetter::subset(font_data, 0, &remapper).unwrap_or_else(|e| {
        log::warn!("Font subsetting failed for {font_name}: {e}, embedding full font");
        font_data.to_vec()
    });

    let data_len = i32::try_from(subset_data.len()).ok()?;
    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = font_name.replace(' ', "");

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let cid_font_ref = alloc();
    let system_info = pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(system_info);
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        let mut gid_widths: Vec<(u16, f32)> = char_to_gid
            .iter()
            .filter_map(|(&ch, &new_gid)| {
                face.glyph_index(ch)
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| (new_gid, adv as f32 / units * 1000.0))
            })
            .collect();
        gid_widths.sort_by_key(|&(gid, _)| gid);
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let tounicode_ref = alloc();
    let cmap_name = format!("{}-UTF16", ps_name);
    let mut cmap = pdf_writer::types::UnicodeCmap::new(
        Name(cmap_name.as_bytes()),
        pdf_writer::types::SystemInfo {
            registry: pdf_writer::Str(b"Adobe"),
            ordering: pdf_writer::Str(b"Identity"),
            supplement: 0,
        },
    );
    let mut pairs: Vec<(u16, char)> = char_to_gid.iter().map(|(&ch, &gid)| (gid, ch)).collect();
    pairs.sort_unstable();
    for (new_gid, ch) in pairs {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    Some(char_to_gid)
}

pub(crate) fn register_font(
    pdf: &mut Pdf,
    face: &FontFace,
    pdf_name: String,
    alloc: &mut impl FnMut() -> Ref,
    used_chars: &HashSet<char>,
) -> Result<FontEntry, Error> {
    let t0 = std::time::Instant::now();
    let font_ref = alloc();

    let char_to_gid = match &face.source {
        FaceSource::Helvetica { bold } => {
            let base: &[u8] = if *bold { b"Helvetica-Bold" } else { b"Helvetica" };
            pdf.type1_font(font_ref)
                .base_font(Name(base))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            None
        }
        FaceSource::TrueType { name, data } => Some(
            embed_truetype(pdf, font_ref, name, data, used_chars, alloc)
                .ok_or_else(|| Error::Font(format!("{name}: could not embed font")))?,
        ),
    };

    log::debug!(
        "register_font: {} as {pdf_name} ({} chars) → {:.1}ms",
        face.name(),
        used_chars.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(FontEntry {
        pdf_name,
        font_ref,
        char_to_gid,
    })
}
