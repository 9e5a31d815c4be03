mod board;
mod contingency;

use std::time::Instant;

use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::engine::{Composer, Footer, Masthead, decorate};
use crate::error::Error;
use crate::progress::GenerateOptions;

pub use board::{BoardReport, BoardSection};
pub use contingency::ContingencyReport;

/// One entry in a report's rendering plan.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<S> {
    pub section: S,
    /// Progress milestone announced when the step begins.
    pub percent: u8,
    pub message: String,
}

impl<S> Step<S> {
    pub fn new(section: S, percent: u8, message: impl Into<String>) -> Self {
        Self {
            section,
            percent,
            message: message.into(),
        }
    }
}

/// A document kind: what goes on the pages, in which order.
pub trait ReportDefinition {
    type Section: Copy + std::fmt::Debug;

    /// Reject malformed input before anything is drawn.
    fn validate(&self) -> Result<(), Error>;

    fn masthead(&self) -> Masthead;

    fn footer(&self) -> Footer;

    /// Enabled sections in rendering order. Disabled sections are absent.
    fn plan(&self) -> Vec<Step<Self::Section>>;

    fn render(&self, section: Self::Section, composer: &mut Composer<'_>) -> Result<(), Error>;

    fn file_name(&self) -> String;
}

/// Lay out every planned section, decorate all pages, and serialize.
///
/// Errors abort generation: no bytes are returned and no further progress
/// is reported.
pub fn assemble<R: ReportDefinition>(
    report: &R,
    canvas: &mut dyn Canvas,
    config: &RenderConfig,
    options: &mut GenerateOptions<'_>,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();
    report.validate()?;
    if canvas.page_count() == 0 {
        canvas.new_page();
    }

    let plan = report.plan();
    {
        let mut composer = Composer::new(&mut *canvas, &config.layout);
        for step in plan {
            if options.cancelled() {
                log::info!("Generation cancelled before {:?}", step.section);
                return Err(Error::Cancelled);
            }
            options.emit(step.percent, step.message);
            report.render(step.section, &mut composer)?;
        }
    }
    let t_layout = t0.elapsed();

    if options.cancelled() {
        return Err(Error::Cancelled);
    }
    options.emit(98, "Finalizing headers and footers");
    decorate(canvas, &config.layout, &report.masthead(), &report.footer());
    let t_decorate = t0.elapsed();

    let bytes = canvas.serialize()?;
    let t_total = t0.elapsed();
    options.emit(100, "Complete");

    log::info!(
        "Timing: layout={:.1}ms, decorate={:.1}ms, serialize={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_decorate - t_layout).as_secs_f64() * 1000.0,
        (t_total - t_decorate).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        canvas.page_count(),
        bytes.len(),
    );

    Ok(bytes)
}

/// Lowercase ASCII alphanumerics with every other run collapsed to `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Resilience Dashboard"), "resilience-dashboard");
        assert_eq!(slugify("  Water & Sewage -- Supply!  "), "water-sewage-supply");
        assert_eq!(slugify("1. Staffing"), "1-staffing");
    }
}
