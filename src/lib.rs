pub mod canvas;
pub mod config;
pub mod engine;
mod error;
pub mod fonts;
pub mod markup;
pub mod model;
pub mod pdf;
pub mod progress;
pub mod report;

pub use canvas::{Canvas, Document};
pub use config::{FontConfig, LayoutConfig, RenderConfig};
pub use error::Error;
pub use model::{ContingencyPlan, ReportData};
pub use pdf::PdfCanvas;
pub use progress::{CancelToken, ChannelProgress, GenerateOptions, NoProgress, ProgressEvent, ProgressSink};
pub use report::{BoardReport, ContingencyReport, ReportDefinition, assemble, slugify};

use std::path::{Path, PathBuf};
use std::time::Instant;

use fonts::FontFamily;

/// A finished document, ready to be written or transported.
#[derive(Clone, Debug)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

fn render<R: ReportDefinition>(
    report: &R,
    title: String,
    config: &RenderConfig,
    options: &mut GenerateOptions<'_>,
) -> Result<RenderedReport, Error> {
    let t0 = Instant::now();
    let fonts = FontFamily::load(&config.fonts)?;
    let t_fonts = t0.elapsed();

    let mut canvas = PdfCanvas::new(&config.layout, fonts).with_title(title);
    let bytes = assemble(report, &mut canvas, config, options)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: fonts={:.1}ms, render={:.1}ms, total={:.1}ms (output {} bytes)",
        t_fonts.as_secs_f64() * 1000.0,
        (t_total - t_fonts).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(RenderedReport {
        file_name: report.file_name(),
        page_count: canvas.page_count(),
        bytes,
    })
}

pub fn generate_board_report(
    data: &ReportData,
    config: &RenderConfig,
    options: &mut GenerateOptions<'_>,
) -> Result<RenderedReport, Error> {
    let report = BoardReport::new(data, config);
    let title = format!("Board Resilience Report - {}", data.period);
    render(&report, title, config, options)
}

/// Render one section of `plan` (matched by title or slug), or the whole
/// plan when `section` is `None`.
pub fn generate_contingency_plan(
    plan: &ContingencyPlan,
    section: Option<&str>,
    config: &RenderConfig,
    options: &mut GenerateOptions<'_>,
) -> Result<RenderedReport, Error> {
    let report = ContingencyReport::new(plan, section, config)?;
    let title = format!("Contingency Plan - {}", plan.service_name);
    render(&report, title, config, options)
}

/// Write `report` into `dir` under its own file name.
pub fn write_report(report: &RenderedReport, dir: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&report.file_name);
    std::fs::write(&path, &report.bytes)?;
    log::info!("Wrote {} ({} pages, {} bytes)", path.display(), report.page_count, report.bytes.len());
    Ok(path)
}

/// [`generate_board_report`] on the blocking pool. Progress goes to `progress`
/// when given.
#[cfg(feature = "async")]
pub async fn generate_board_report_async(
    data: ReportData,
    config: RenderConfig,
    progress: Option<std::sync::mpsc::Sender<ProgressEvent>>,
    cancel: Option<CancelToken>,
) -> Result<RenderedReport, Error> {
    tokio::task::spawn_blocking(move || {
        let mut sink = progress.map(ChannelProgress);
        let mut options = GenerateOptions {
            progress: sink.as_mut().map(|s| s as &mut dyn ProgressSink),
            cancel,
        };
        generate_board_report(&data, &config, &mut options)
    })
    .await
    .map_err(|e| Error::Task(e.to_string()))?
}

#[cfg(feature = "async")]
pub async fn generate_contingency_plan_async(
    plan: ContingencyPlan,
    section: Option<String>,
    config: RenderConfig,
    progress: Option<std::sync::mpsc::Sender<ProgressEvent>>,
    cancel: Option<CancelToken>,
) -> Result<RenderedReport, Error> {
    tokio::task::spawn_blocking(move || {
        let mut sink = progress.map(ChannelProgress);
        let mut options = GenerateOptions {
            progress: sink.as_mut().map(|s| s as &mut dyn ProgressSink),
            cancel,
        };
        generate_contingency_plan(&plan, section.as_deref(), &config, &mut options)
    })
    .await
    .map_err(|e| Error::Task(e.to_string()))?
}
