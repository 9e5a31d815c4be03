use std::path::PathBuf;

/// Smallest `first_page_top` that leaves room for the full masthead.
pub const MIN_FIRST_PAGE_TOP: f32 = 36.0;
/// Smallest `margin_top` that leaves room for the compact header.
pub const MIN_MARGIN_TOP: f32 = 18.0;
/// Smallest `margin_bottom` that leaves room for the footer.
pub const MIN_MARGIN_BOTTOM: f32 = 14.0;

/// Page geometry in millimetres. Headers and footers are placed relative to
/// the margins, so each margin should be at least its `MIN_*` value.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Top of the writable area on pages 2..N (below the compact header).
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Top of the writable area on page 1 (below the full masthead).
    pub first_page_top: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        // A4 portrait
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 15.0,
            margin_right: 15.0,
            margin_top: 24.0,
            margin_bottom: 20.0,
            first_page_top: 46.0,
        }
    }
}

impl LayoutConfig {
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest y a block may reach.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}

/// TrueType files to embed instead of the built-in Helvetica faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub layout: LayoutConfig,
    pub fonts: FontConfig,
    /// Product attribution printed in footers and used in file names.
    pub product: String,
    pub confidentiality: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            fonts: FontConfig::default(),
            product: "Resilience Dashboard".to_string(),
            confidentiality: "CONFIDENTIAL - for board use only".to_string(),
        }
    }
}

impl RenderConfig {
    /// Defaults, with font files taken from `BOARDREPORT_FONT` and
    /// `BOARDREPORT_BOLD_FONT` when set.
    pub fn from_env() -> Self {
        let path_var = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            fonts: FontConfig {
                regular: path_var("BOARDREPORT_FONT"),
                bold: path_var("BOARDREPORT_BOLD_FONT"),
            },
            ..Self::default()
        }
    }
}
