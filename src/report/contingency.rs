use crate::config::RenderConfig;
use crate::engine::{Composer, Footer, Masthead};
use crate::error::Error;
use crate::model::ContingencyPlan;

use super::{ReportDefinition, Step, slugify};

/// Contingency plan for one essential service: either the whole bundle or
/// a single selected section.
pub struct ContingencyReport<'a> {
    plan: &'a ContingencyPlan,
    selected: Option<usize>,
    config: &'a RenderConfig,
}

impl<'a> ContingencyReport<'a> {
    /// `section` picks one plan section by title (case-insensitive) or by
    /// its slug; `None` renders every section.
    pub fn new(
        plan: &'a ContingencyPlan,
        section: Option<&str>,
        config: &'a RenderConfig,
    ) -> Result<Self, Error> {
        let selected = match section {
            None => None,
            Some(wanted) => {
                let slug = slugify(wanted);
                let index = plan
                    .sections
                    .iter()
                    .position(|s| {
                        s.title.trim().eq_ignore_ascii_case(wanted.trim()) || slugify(&s.title) == slug
                    })
                    .ok_or_else(|| {
                        Error::InvalidInput(format!(
                            "plan for '{}' has no section '{wanted}'",
                            plan.service_name
                        ))
                    })?;
                Some(index)
            }
        };
        Ok(Self {
            plan,
            selected,
            config,
        })
    }

    fn indices(&self) -> Vec<usize> {
        match self.selected {
            Some(i) => vec![i],
            None => (0..self.plan.sections.len()).collect(),
        }
    }
}

impl ReportDefinition for ContingencyReport<'_> {
    type Section = usize;

    fn validate(&self) -> Result<(), Error> {
        if self.plan.service_name.trim().is_empty() {
            return Err(Error::InvalidInput("contingency plan has no service name".into()));
        }
        if self.plan.sections.is_empty() {
            return Err(Error::InvalidInput(format!(
                "contingency plan for '{}' has no sections",
                self.plan.service_name
            )));
        }
        Ok(())
    }

    fn masthead(&self) -> Masthead {
        let period = match self.selected {
            Some(i) => self.plan.sections[i].title.clone(),
            None => "Complete plan".to_string(),
        };
        Masthead {
            title: "Contingency Plan".to_string(),
            subtitle: self.plan.service_name.clone(),
            period,
            date: format!("Generated {}", self.plan.generated_at.format("%-d %B %Y")),
        }
    }

    fn footer(&self) -> Footer {
        Footer {
            notice: self.config.confidentiality.clone(),
            attribution: format!("Generated by {}", self.config.product),
        }
    }

    fn plan(&self) -> Vec<Step<usize>> {
        let indices = self.indices();
        let n = indices.len();
        indices
            .into_iter()
            .enumerate()
            .map(|(k, i)| {
                let percent = 10 + (k * 85 / n) as u8;
                Step::new(i, percent, format!("Rendering {}", self.plan.sections[i].title))
            })
            .collect()
    }

    fn render(&self, index: usize, c: &mut Composer<'_>) -> Result<(), Error> {
        let section = self
            .plan
            .sections
            .get(index)
            .ok_or_else(|| Error::InvalidInput(format!("no plan section at position {index}")))?;
        let first = self.indices().first() == Some(&index);
        c.banner(&section.title, !first);
        if section.content.trim().is_empty() {
            c.note("No content has been written for this section yet.");
        } else {
            c.blocks(&section.content);
        }
        Ok(())
    }

    fn file_name(&self) -> String {
        let service = slugify(&self.plan.service_name);
        match self.selected {
            Some(i) => format!("{service}-{}.pdf", slugify(&self.plan.sections[i].title)),
            None => format!("{service}-contingency-plans.pdf"),
        }
    }
}
