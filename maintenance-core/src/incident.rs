//! Remote incidents and the payload for creating one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduledTerm;
use crate::term::Term;

/// Metadata namespace marking incidents created by this tool.
pub const TOOL_NAMESPACE: &str = "statuspage_register_tool";
pub const KEY_CREATED_AT: &str = "createdAt";
pub const KEY_SCHEDULE_TYPE: &str = "scheduleType";
pub const KEY_SCHEDULE_KEY: &str = "scheduleKey";

/// Component ids compared as a set: order does not matter, size does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ComponentSet(Vec<String>);

impl ComponentSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().map(Into::into).collect()
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ComponentSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut ids: Vec<String> = iter.into_iter().collect();
        ids.sort();
        ComponentSet(ids)
    }
}

impl From<Vec<String>> for ComponentSet {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<ComponentSet> for Vec<String> {
    fn from(set: ComponentSet) -> Self {
        set.0
    }
}

/// Schedule type recorded in a tool-managed incident's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleType {
    Recurring,
    Other(String),
}

impl ScheduleType {
    pub fn as_str(&self) -> &str {
        match self {
            ScheduleType::Recurring => "recurring",
            ScheduleType::Other(s) => s,
        }
    }
}

impl From<&str> for ScheduleType {
    fn from(s: &str) -> Self {
        match s {
            "recurring" => ScheduleType::Recurring,
            other => ScheduleType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What this tool recorded about an incident it created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolMetadata {
    pub schedule_type: Option<ScheduleType>,
    pub schedule_key: Option<String>,
}

/// An incident as stored on the remote page.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteIncident {
    pub id: String,
    pub page_id: String,
    pub name: String,
    pub components: ComponentSet,
    pub scheduled_for: DateTime<Utc>,
    pub scheduled_until: DateTime<Utc>,
    /// `Some` when the incident carries this tool's metadata namespace.
    pub tool_metadata: Option<ToolMetadata>,
}

impl RemoteIncident {
    /// Created by this tool as a recurring schedule.
    ///
    /// Incidents from before schedule types were recorded count as recurring.
    pub fn is_recurring_schedule(&self) -> bool {
        match &self.tool_metadata {
            Some(meta) => matches!(meta.schedule_type, None | Some(ScheduleType::Recurring)),
            None => false,
        }
    }

    pub fn has_components(&self, components: &ComponentSet) -> bool {
        self.components == *components
    }

    /// Exactly the same window.
    pub fn is_same_term(&self, term: &Term) -> bool {
        self.scheduled_for == term.start && self.scheduled_until == term.end
    }

    /// Closed-interval overlap: touching endpoints count.
    pub fn overlaps(&self, term: &Term) -> bool {
        self.scheduled_for <= term.end && self.scheduled_until >= term.start
    }

    /// The incident's window contains the whole term.
    pub fn covers(&self, term: &Term) -> bool {
        self.scheduled_for <= term.start && self.scheduled_until >= term.end
    }

    /// Link to the incident in the Statuspage management UI.
    pub fn manage_url(&self) -> String {
        format!(
            "https://manage.statuspage.io/pages/{}/incidents/{}",
            self.page_id, self.id
        )
    }
}

impl fmt::Display for RemoteIncident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} id:{}",
            self.name, self.scheduled_for, self.scheduled_until, self.id
        )
    }
}

/// Everything needed to create a scheduled maintenance incident.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceIncidentSpec {
    pub title: String,
    pub body: String,
    pub components: ComponentSet,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub schedule_type: ScheduleType,
    pub schedule_key: Option<String>,
}

impl MaintenanceIncidentSpec {
    pub fn recurring(scheduled: &ScheduledTerm, components: ComponentSet) -> Self {
        MaintenanceIncidentSpec {
            title: scheduled.title.clone(),
            body: scheduled.body.clone(),
            components,
            start: scheduled.term.start,
            end: scheduled.term.end,
            schedule_type: ScheduleType::Recurring,
            schedule_key: None,
        }
    }
}

impl fmt::Display for MaintenanceIncidentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.title, self.start, self.end)
    }
}
