use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Red/Amber/Green status rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rag {
    #[serde(alias = "Green")]
    Green,
    #[serde(alias = "Amber")]
    Amber,
    #[serde(alias = "Red")]
    Red,
}

impl Rag {
    pub fn label(self) -> &'static str {
        match self {
            Rag::Green => "Green",
            Rag::Amber => "Amber",
            Rag::Red => "Red",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[serde(alias = "Improving")]
    Improving,
    #[serde(alias = "Declining")]
    Declining,
    #[serde(alias = "Stable")]
    Stable,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Declining => "Declining",
            Trend::Stable => "Stable",
        }
    }
}

/// Identifiers of the independently enabled board report sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    ExecutiveSummary,
    FiveCapitals,
    EssentialServices,
    ScenarioTesting,
    ForwardLook,
    Citations,
}

impl SectionId {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::ExecutiveSummary => "executive-summary",
            SectionId::FiveCapitals => "five-capitals",
            SectionId::EssentialServices => "essential-services",
            SectionId::ScenarioTesting => "scenario-testing",
            SectionId::ForwardLook => "forward-look",
            SectionId::Citations => "citations",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    pub include_citations: bool,
    pub include_disclaimer: bool,
    pub include_raw_data: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KriRow {
    pub name: String,
    pub value: String,
    pub target: String,
    pub status: Rag,
    pub trend: Trend,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEntry {
    pub description: String,
    pub mitigation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalSummary {
    pub name: String,
    pub score: f32,
    pub status: Rag,
    pub trend: Trend,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub kris: Vec<KriRow>,
    #[serde(default)]
    pub recent_changes: Vec<String>,
    #[serde(default)]
    pub risks: Vec<RiskEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub name: String,
    pub status: Rag,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub name: String,
    pub outcome: String,
    #[serde(default)]
    pub date: String,
}

/// Snapshot of everything the board report shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub organisation: Option<String>,
    pub period: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<SectionId>,
    #[serde(default)]
    pub options: ReportOptions,
    pub aggregate_score: f32,
    pub aggregate_status: Rag,
    pub aggregate_trend: Trend,
    #[serde(default)]
    pub executive_summary: String,
    #[serde(default)]
    pub capitals: Vec<CapitalSummary>,
    #[serde(default)]
    pub critical_issues: Vec<String>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    #[serde(default)]
    pub services: Option<Vec<ServiceSummary>>,
    #[serde(default)]
    pub scenarios: Option<Vec<ScenarioSummary>>,
    #[serde(default)]
    pub forward_look: Option<String>,
    #[serde(default)]
    pub citations: Vec<String>,
}

impl ReportData {
    pub fn has_section(&self, id: SectionId) -> bool {
        self.sections.contains(&id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSection {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Contingency plan text for one essential service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContingencyPlan {
    pub service_name: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub sections: Vec<PlanSection>,
}
