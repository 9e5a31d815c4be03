use crate::canvas::Color;
use crate::config::RenderConfig;
use crate::engine::{Cell, Column, Composer, Fact, Footer, Masthead, Table};
use crate::error::Error;
use crate::markup::NumberedItem;
use crate::model::{CapitalSummary, Rag, ReportData, SectionId};

use super::{ReportDefinition, Step, slugify};

const DISCLAIMER: &str = "This report summarises self-assessed resilience data for the \
stated period. Scores, indicators and commentary reflect the information available \
when the report was generated and should be read alongside the underlying evidence. \
It does not constitute an audit opinion or regulatory attestation.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardSection {
    Disclaimer,
    ExecutiveSummary,
    /// Detail page for `ReportData::capitals[i]`.
    Capital(usize),
    Services,
    Scenarios,
    ForwardLook,
    Citations,
    RawData,
}

/// Board-level resilience report over one [`ReportData`] snapshot.
pub struct BoardReport<'a> {
    data: &'a ReportData,
    config: &'a RenderConfig,
}

impl<'a> BoardReport<'a> {
    pub fn new(data: &'a ReportData, config: &'a RenderConfig) -> Self {
        Self { data, config }
    }

    fn wants_citations(&self) -> bool {
        self.data.options.include_citations || self.data.has_section(SectionId::Citations)
    }

    fn executive_summary(&self, c: &mut Composer<'_>) {
        let d = self.data;
        c.banner("Executive Summary", false);
        c.facts(&[
            Fact::new("Overall score", format!("{:.0} / 100", d.aggregate_score)),
            Fact::new("Status", d.aggregate_status.label()).colored(rag_color(d.aggregate_status)),
            Fact::new("Trend", d.aggregate_trend.label()),
            Fact::new("Period", d.period.as_str()),
        ]);
        if !d.executive_summary.trim().is_empty() {
            c.blocks(&d.executive_summary);
        }

        if !d.capitals.is_empty() {
            let mut table = Table::new(vec![
                Column::new("Capital"),
                Column::fixed("Score", 25.0),
                Column::fixed("Status", 28.0),
                Column::fixed("Trend", 30.0),
            ]);
            for capital in &d.capitals {
                table.push_row([
                    Cell::new(capital.name.as_str()),
                    Cell::new(format!("{:.0}", capital.score)),
                    status_cell(capital.status),
                    Cell::new(capital.trend.label()),
                ]);
            }
            c.table_heading("Five Capitals Overview", &table);
            c.table(&table);
        }

        if !d.critical_issues.is_empty() {
            c.heading("Critical Issues");
            c.numbered_list(None, &numbered(&d.critical_issues));
        }
        if !d.recommended_actions.is_empty() {
            c.heading("Recommended Actions");
            c.numbered_list(None, &numbered(&d.recommended_actions));
        }
    }

    fn capital(&self, capital: &CapitalSummary, c: &mut Composer<'_>) {
        c.banner(&capital.name, true);
        c.key_value(
            "Score",
            &format!(
                "{:.0} / 100    Status: {}    Trend: {}",
                capital.score,
                capital.status.label(),
                capital.trend.label()
            ),
        );
        c.gap(2.0);
        if !capital.commentary.trim().is_empty() {
            c.blocks(&capital.commentary);
        }

        if capital.kris.is_empty() {
            c.heading("Key Risk Indicators");
            c.note("No key risk indicators recorded for this capital.");
        } else {
            let mut table = Table::new(vec![
                Column::new("Indicator"),
                Column::fixed("Value", 26.0),
                Column::fixed("Target", 26.0),
                Column::fixed("Status", 22.0),
                Column::fixed("Trend", 24.0),
            ]);
            for kri in &capital.kris {
                table.push_row([
                    Cell::new(kri.name.as_str()),
                    Cell::new(kri.value.as_str()),
                    Cell::new(kri.target.as_str()),
                    status_cell(kri.status),
                    Cell::new(kri.trend.label()),
                ]);
            }
            c.table_heading("Key Risk Indicators", &table);
            c.table(&table);
        }

        if !capital.recent_changes.is_empty() {
            c.heading("Recent Changes");
            c.bullet_list(None, &capital.recent_changes);
        }

        if !capital.risks.is_empty() {
            let mut table = Table::new(vec![Column::new("Risk"), Column::new("Mitigation")]);
            for risk in &capital.risks {
                table.push_row([risk.description.as_str(), risk.mitigation.as_str()]);
            }
            c.table_heading("Key Risks", &table);
            c.table(&table);
        }
    }

    fn services(&self, c: &mut Composer<'_>) {
        c.banner("Essential Services", false);
        match self.data.services.as_deref() {
            Some(services) if !services.is_empty() => {
                let mut table = Table::new(vec![
                    Column::new("Service"),
                    Column::fixed("Status", 22.0),
                    Column::new("Reason"),
                    Column::fixed("Last updated", 30.0),
                ]);
                for s in services {
                    table.push_row([
                        Cell::new(s.name.as_str()),
                        status_cell(s.status),
                        Cell::new(s.reason.as_str()),
                        Cell::new(s.last_updated.as_str()),
                    ]);
                }
                c.table(&table);
            }
            _ => c.note("No essential service data is available for this period."),
        }
    }

    fn scenarios(&self, c: &mut Composer<'_>) {
        c.banner("Scenario Testing", false);
        match self.data.scenarios.as_deref() {
            Some(scenarios) if !scenarios.is_empty() => {
                let mut table = Table::new(vec![
                    Column::new("Scenario"),
                    Column::new("Outcome"),
                    Column::fixed("Date", 30.0),
                ]);
                for s in scenarios {
                    table.push_row([s.name.as_str(), s.outcome.as_str(), s.date.as_str()]);
                }
                c.table(&table);
            }
            _ => c.note("No scenario tests were run in this period."),
        }
    }

    fn forward_look(&self, c: &mut Composer<'_>) {
        let d = self.data;
        c.banner("Forward Look", false);
        match d.forward_look.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(text) => c.blocks(text),
            None if !d.recommended_actions.is_empty() => c.numbered_list(
                Some("Priorities for the next period:"),
                &numbered(&d.recommended_actions),
            ),
            None => c.note("No forward-looking commentary was provided."),
        }
    }

    fn citations(&self, c: &mut Composer<'_>) {
        c.banner("Citations & Sources", false);
        if self.data.citations.is_empty() {
            c.note("No sources were cited.");
            return;
        }
        let items: Vec<NumberedItem> = self
            .data
            .citations
            .iter()
            .map(|text| NumberedItem {
                number: None,
                label: None,
                body: text.clone(),
            })
            .collect();
        c.numbered_list(None, &items);
    }

    fn raw_data(&self, c: &mut Composer<'_>) {
        c.banner("Appendix: Raw KRI Data", true);
        let mut table = Table::new(vec![
            Column::fixed("Capital", 32.0),
            Column::new("Indicator"),
            Column::fixed("Value", 22.0),
            Column::fixed("Target", 22.0),
            Column::fixed("Status", 20.0),
            Column::fixed("Trend", 24.0),
        ]);
        for capital in &self.data.capitals {
            for kri in &capital.kris {
                table.push_row([
                    Cell::new(capital.name.as_str()),
                    Cell::new(kri.name.as_str()),
                    Cell::new(kri.value.as_str()),
                    Cell::new(kri.target.as_str()),
                    status_cell(kri.status),
                    Cell::new(kri.trend.label()),
                ]);
            }
        }
        if table.rows.is_empty() {
            c.note("No indicator data recorded.");
        } else {
            c.table(&table);
        }
    }
}

fn rag_color(rag: Rag) -> Color {
    match rag {
        Rag::Green => Color::GREEN,
        Rag::Amber => Color::AMBER,
        Rag::Red => Color::RED,
    }
}

fn status_cell(rag: Rag) -> Cell {
    Cell::colored(rag.label(), rag_color(rag))
}

fn numbered(lines: &[String]) -> Vec<NumberedItem> {
    lines.iter().map(|l| NumberedItem::parse(l)).collect()
}

fn check_score(what: &str, score: f32) -> Result<(), Error> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "{what} must be between 0 and 100, got {score}"
        )))
    }
}

impl ReportDefinition for BoardReport<'_> {
    type Section = BoardSection;

    fn validate(&self) -> Result<(), Error> {
        let d = self.data;
        if d.period.trim().is_empty() {
            return Err(Error::InvalidInput("report period label is required".into()));
        }
        check_score("aggregate score", d.aggregate_score)?;
        for (i, capital) in d.capitals.iter().enumerate() {
            if capital.name.trim().is_empty() {
                return Err(Error::InvalidInput(format!("capital #{} has no name", i + 1)));
            }
            check_score(&format!("score of capital '{}'", capital.name), capital.score)?;
        }
        if d.has_section(SectionId::FiveCapitals) && d.capitals.is_empty() {
            log::warn!("five-capitals section enabled but no capitals supplied");
        }
        Ok(())
    }

    fn masthead(&self) -> Masthead {
        let d = self.data;
        Masthead {
            title: "Board Resilience Report".to_string(),
            subtitle: d
                .organisation
                .clone()
                .unwrap_or_else(|| self.config.product.clone()),
            period: format!("Reporting period: {}", d.period),
            date: format!("Generated {}", d.generated_at.format("%-d %B %Y")),
        }
    }

    fn footer(&self) -> Footer {
        Footer {
            notice: self.config.confidentiality.clone(),
            attribution: format!("Generated by {}", self.config.product),
        }
    }

    fn plan(&self) -> Vec<Step<BoardSection>> {
        let d = self.data;
        let mut plan = Vec::new();
        if d.options.include_disclaimer {
            plan.push(Step::new(BoardSection::Disclaimer, 5, "Adding disclaimer"));
        }
        if d.has_section(SectionId::ExecutiveSummary) {
            plan.push(Step::new(
                BoardSection::ExecutiveSummary,
                10,
                "Generating executive summary",
            ));
        }
        if d.has_section(SectionId::FiveCapitals) {
            let n = d.capitals.len();
            for (i, capital) in d.capitals.iter().enumerate() {
                let percent = 30 + (i * 40 / n) as u8;
                plan.push(Step::new(
                    BoardSection::Capital(i),
                    percent,
                    format!("Rendering {} capital", capital.name),
                ));
            }
        }
        if d.has_section(SectionId::EssentialServices) {
            plan.push(Step::new(BoardSection::Services, 70, "Adding essential services"));
        }
        if d.has_section(SectionId::ScenarioTesting) {
            plan.push(Step::new(BoardSection::Scenarios, 80, "Adding scenario testing"));
        }
        if d.has_section(SectionId::ForwardLook) {
            plan.push(Step::new(BoardSection::ForwardLook, 90, "Adding forward look"));
        }
        if self.wants_citations() {
            plan.push(Step::new(BoardSection::Citations, 95, "Adding citations"));
        }
        if d.options.include_raw_data {
            plan.push(Step::new(BoardSection::RawData, 97, "Appending raw data"));
        }
        plan
    }

    fn render(&self, section: BoardSection, c: &mut Composer<'_>) -> Result<(), Error> {
        match section {
            BoardSection::Disclaimer => c.callout("Disclaimer", DISCLAIMER),
            BoardSection::ExecutiveSummary => self.executive_summary(c),
            BoardSection::Capital(i) => {
                let capital = self.data.capitals.get(i).ok_or_else(|| {
                    Error::InvalidInput(format!("no capital at position {i}"))
                })?;
                self.capital(capital, c);
            }
            BoardSection::Services => self.services(c),
            BoardSection::Scenarios => self.scenarios(c),
            BoardSection::ForwardLook => self.forward_look(c),
            BoardSection::Citations => self.citations(c),
            BoardSection::RawData => self.raw_data(c),
        }
        Ok(())
    }

    fn file_name(&self) -> String {
        format!(
            "{}-board-report-{}.pdf",
            slugify(&self.config.product),
            self.data.generated_at.format("%Y-%m-%d")
        )
    }
}
