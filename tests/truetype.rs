mod common;

use std::path::PathBuf;

use boardreport_pdf::fonts::{FontFace, FontFamily};
use boardreport_pdf::progress::GenerateOptions;
use boardreport_pdf::{FontConfig, RenderConfig, generate_board_report, generate_contingency_plan};

const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

fn first_existing(candidates: &[&str]) -> Option<PathBuf> {
    candidates.iter().map(PathBuf::from).find(|p| p.is_file())
}

/// A system TrueType face, or `None` (and a note on stderr) when the machine
/// has none of the usual ones.
fn system_font() -> Option<PathBuf> {
    let found = first_existing(REGULAR_CANDIDATES);
    if found.is_none() {
        eprintln!("skipping: no system TrueType font found");
    }
    found
}

fn truetype_config(regular: PathBuf) -> RenderConfig {
    RenderConfig {
        fonts: FontConfig {
            regular: Some(regular),
            bold: first_existing(BOLD_CANDIDATES),
        },
        ..RenderConfig::default()
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn truetype_face_measures_text() {
    let Some(path) = system_font() else { return };
    let face = FontFace::from_file(&path).unwrap();
    let narrow = face.text_width_pt("il", 10.0);
    let wide = face.text_width_pt("WM", 10.0);
    assert!(narrow > 0.0);
    assert!(wide > narrow);
    assert!((face.text_width_pt("WM", 20.0) - 2.0 * wide).abs() < 0.01);
    assert_ne!(face.name(), "Helvetica");
}

#[test]
fn missing_font_file_is_an_io_error() {
    let err = FontFace::from_file(std::path::Path::new("/nonexistent/NoSuchFont.ttf")).unwrap_err();
    assert!(matches!(err, boardreport_pdf::Error::Io(_)));
}

#[test]
fn regular_face_doubles_as_bold_without_a_bold_file() {
    let Some(path) = system_font() else { return };
    let family = FontFamily::load(&FontConfig {
        regular: Some(path),
        bold: None,
    })
    .unwrap();
    assert_eq!(family.regular.name(), family.bold.name());
    assert_eq!(
        family.face(true).text_width_pt("Board", 10.0),
        family.face(false).text_width_pt("Board", 10.0)
    );
}

#[test]
fn board_report_embeds_type0_font_deterministically() {
    common::init_logging();
    let Some(path) = system_font() else { return };
    let data = common::q1_report();
    let config = truetype_config(path);

    let first = generate_board_report(&data, &config, &mut GenerateOptions::default()).unwrap();
    let second = generate_board_report(&data, &config, &mut GenerateOptions::default()).unwrap();

    assert!(first.bytes.starts_with(b"%PDF"));
    assert!(contains(&first.bytes, b"/Type0"));
    assert!(contains(&first.bytes, b"/FontFile2"));
    assert!(contains(&first.bytes, b"/ToUnicode"));
    assert!(!contains(&first.bytes, b"/Helvetica"));
    assert!(first.page_count > 1);
    assert_eq!(first.page_count, second.page_count);
    assert!(first.bytes == second.bytes, "TrueType output differs between runs");
}

#[test]
fn contingency_plan_renders_with_truetype() {
    let Some(path) = system_font() else { return };
    let config = truetype_config(path);
    let plan = common::plan();
    let rendered = generate_contingency_plan(&plan, None, &config, &mut GenerateOptions::default()).unwrap();
    assert_eq!(rendered.page_count, 3);
    assert!(contains(&rendered.bytes, b"/Type0"));
}

#[test]
fn font_paths_come_from_the_environment() {
    let Some(path) = system_font() else { return };
    // Only this test in the binary touches the process environment.
    unsafe {
        std::env::set_var("BOARDREPORT_FONT", &path);
        std::env::set_var("BOARDREPORT_BOLD_FONT", "  ");
    }
    let config = RenderConfig::from_env();
    unsafe {
        std::env::remove_var("BOARDREPORT_FONT");
        std::env::remove_var("BOARDREPORT_BOLD_FONT");
    }
    assert_eq!(config.fonts.regular.as_deref(), Some(path.as_path()));
    assert_eq!(config.fonts.bold, None);

    let rendered =
        generate_board_report(&common::q1_report(), &config, &mut GenerateOptions::default()).unwrap();
    assert!(contains(&rendered.bytes, b"/Type0"));
}
