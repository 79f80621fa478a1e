//! Desired schedule construction.

use std::fmt;

use crate::date_range::RunWindow;
use crate::error::MaintenanceResult;
use crate::rule::RecurringRule;
use crate::term::{Term, merge_terms};

/// One maintenance definition from the rule document.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceDefinition {
    pub service: String,
    pub title: String,
    pub body: String,
    pub rules: Vec<RecurringRule>,
}

/// A term of the desired schedule, annotated with what it is for.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTerm {
    pub service: String,
    pub title: String,
    pub body: String,
    pub term: Term,
}

impl fmt::Display for ScheduledTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.service, self.term)
    }
}

impl MaintenanceDefinition {
    /// Expand every rule over the window and merge overlapping terms.
    pub fn scheduled_terms(&self, window: &RunWindow) -> MaintenanceResult<Vec<ScheduledTerm>> {
        let mut terms = Vec::new();
        for rule in &self.rules {
            let incoming = rule.create_terms(window.from_date, window.to_date, &window.calendar)?;
            terms = merge_terms(terms, incoming);
        }

        Ok(terms
            .into_iter()
            .map(|term| ScheduledTerm {
                service: self.service.clone(),
                title: self.title.clone(),
                body: self.body.clone(),
                term,
            })
            .collect())
    }
}

/// Build the desired schedule: definition order, then merge order within a
/// definition. The result is not sorted by time.
pub fn build_schedule(
    definitions: &[MaintenanceDefinition],
    window: &RunWindow,
) -> MaintenanceResult<Vec<ScheduledTerm>> {
    let mut schedule = Vec::new();
    for definition in definitions {
        let terms = definition.scheduled_terms(window)?;
        tracing::debug!(
            service = %definition.service,
            terms = terms.len(),
            "expanded maintenance definition"
        );
        schedule.extend(terms);
    }
    Ok(schedule)
}
