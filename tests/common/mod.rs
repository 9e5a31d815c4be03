#![allow(dead_code)]

use boardreport_pdf::model::{
    CapitalSummary, KriRow, PlanSection, Rag, ReportOptions, RiskEntry, ScenarioSummary,
    SectionId, ServiceSummary, Trend,
};
use boardreport_pdf::progress::GenerateOptions;
use boardreport_pdf::{
    ContingencyPlan, Document, Error, PdfCanvas, RenderConfig, ReportData, ReportDefinition,
    assemble, fonts::FontFamily,
};
use chrono::{TimeZone, Utc};

pub const CAPITAL_NAMES: [&str; 5] = ["Financial", "Operational", "Human", "Social", "Natural"];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn kri(name: &str, status: Rag) -> KriRow {
    KriRow {
        name: name.to_string(),
        value: "92%".to_string(),
        target: "95%".to_string(),
        status,
        trend: Trend::Stable,
    }
}

pub fn capital(name: &str, score: f32) -> CapitalSummary {
    CapitalSummary {
        name: name.to_string(),
        score,
        status: Rag::Amber,
        trend: Trend::Improving,
        commentary: format!(
            "**{name} position**\n\n{name} capital held steady this quarter with two indicators below target."
        ),
        kris: vec![
            kri(&format!("{name} liquidity cover"), Rag::Green),
            kri(&format!("{name} incident backlog"), Rag::Amber),
            kri(&format!("{name} supplier concentration"), Rag::Red),
        ],
        recent_changes: vec![
            "Refreshed the recovery playbook".to_string(),
            "Added a second escalation contact".to_string(),
        ],
        risks: vec![RiskEntry {
            description: "Single point of failure in key supplier".to_string(),
            mitigation: "Dual-source by Q3".to_string(),
        }],
    }
}

/// Q1 2026 board snapshot: executive summary and five capitals, disclaimer
/// on, citations off.
pub fn q1_report() -> ReportData {
    ReportData {
        organisation: Some("Northwind Water".to_string()),
        period: "Q1 2026".to_string(),
        generated_at: Utc.with_ymd_and_hms(2026, 4, 2, 9, 30, 0).unwrap(),
        sections: vec![SectionId::ExecutiveSummary, SectionId::FiveCapitals],
        options: ReportOptions {
            include_citations: false,
            include_disclaimer: true,
            include_raw_data: false,
        },
        aggregate_score: 72.0,
        aggregate_status: Rag::Amber,
        aggregate_trend: Trend::Improving,
        executive_summary: "Resilience improved slightly over the quarter.\n\n\
Key themes\n- Supplier concentration remains the largest exposure\n- Staffing recovered after the winter peak"
            .to_string(),
        capitals: CAPITAL_NAMES
            .iter()
            .enumerate()
            .map(|(i, n)| capital(n, 60.0 + i as f32 * 5.0))
            .collect(),
        critical_issues: vec!["Supplier risk: one vendor supplies 70% of chemicals".to_string()],
        recommended_actions: vec![
            "Procurement: qualify a second chemicals vendor".to_string(),
            "Workforce: extend the on-call rota".to_string(),
        ],
        services: Some(vec![ServiceSummary {
            name: "Water treatment".to_string(),
            status: Rag::Green,
            reason: "All sites operational".to_string(),
            last_updated: "2026-03-30".to_string(),
        }]),
        scenarios: Some(vec![ScenarioSummary {
            name: "Regional power outage".to_string(),
            outcome: "Recovered within tolerance".to_string(),
            date: "2026-02-14".to_string(),
        }]),
        forward_look: None,
        citations: vec!["Internal audit report 2025/14".to_string()],
    }
}

pub fn plan() -> ContingencyPlan {
    ContingencyPlan {
        service_name: "Water Treatment".to_string(),
        generated_at: Utc.with_ymd_and_hms(2026, 4, 2, 9, 30, 0).unwrap(),
        sections: vec![
            PlanSection {
                title: "Immediate Response".to_string(),
                content: "**First hour**\n\n1. Isolate: close the affected intake\n2. Notify: call the duty manager"
                    .to_string(),
            },
            PlanSection {
                title: "Communication Plan".to_string(),
                content: "Stakeholders\n- Regulator\n- Local authority\n- Customers".to_string(),
            },
            PlanSection {
                title: "Recovery & Restoration".to_string(),
                content: "Restore normal treatment once water quality samples pass.".to_string(),
            },
        ],
    }
}

/// Lay out `report` on a fresh [`PdfCanvas`] and keep the canvas for inspection.
pub fn render_with<R: ReportDefinition>(
    report: &R,
    config: &RenderConfig,
    options: &mut GenerateOptions<'_>,
) -> Result<(Document, Vec<u8>), Error> {
    let mut canvas = PdfCanvas::new(&config.layout, FontFamily::default());
    let bytes = assemble(report, &mut canvas, config, options)?;
    Ok((canvas.document().clone(), bytes))
}

pub fn render<R: ReportDefinition>(report: &R, config: &RenderConfig) -> Document {
    render_with(report, config, &mut GenerateOptions::default())
        .expect("render")
        .0
}

/// Page indices whose text runs include `needle` (exact run match).
pub fn pages_with(doc: &Document, needle: &str) -> Vec<usize> {
    doc.pages_with_text(needle)
}

/// Every text run on a page, top to bottom as drawn.
pub fn page_text(doc: &Document, index: usize) -> Vec<String> {
    doc.pages[index].texts().map(|t| t.text.clone()).collect()
}
