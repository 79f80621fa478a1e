//! Statuspage REST wire types.
//!
//! Only the fields the engine reads are decoded; everything else in the
//! incident payload is ignored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maintenance_core::incident::{KEY_SCHEDULE_KEY, KEY_SCHEDULE_TYPE, TOOL_NAMESPACE};
use maintenance_core::{
    MaintenanceError, MaintenanceIncidentSpec, RemoteIncident, ScheduleType,
    ToolMetadata,
};

// =============================================================================
// Read side
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct StatuspageComponent {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// An incident as returned by `GET /pages/{page}/incidents/scheduled`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatuspageIncident {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub page_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub components: Vec<StatuspageComponent>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub scheduled_until: Option<DateTime<Utc>>,
    /// Namespace -> key -> value. `null` when the incident has none.
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl StatuspageIncident {
    /// Metadata written by this tool, if the namespace is present.
    pub fn tool_metadata(&self) -> Option<ToolMetadata> {
        let namespace = self.metadata.as_ref()?.get(TOOL_NAMESPACE)?;

        let schedule_type = namespace.get(KEY_SCHEDULE_TYPE).map(|v| match v.as_str() {
            Some(s) => ScheduleType::from(s),
            None => ScheduleType::Other(v.to_string()),
        });
        let schedule_key = namespace
            .get(KEY_SCHEDULE_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Some(ToolMetadata {
            schedule_type,
            schedule_key,
        })
    }
}

impl TryFrom<StatuspageIncident> for RemoteIncident {
    type Error = MaintenanceError;

    fn try_from(incident: StatuspageIncident) -> Result<Self, Self::Error> {
        let tool_metadata = incident.tool_metadata();

        let (Some(scheduled_for), Some(scheduled_until)) =
            (incident.scheduled_for, incident.scheduled_until)
        else {
            return Err(MaintenanceError::RemoteRead(format!(
                "Scheduled incident {} has no scheduled_for/scheduled_until",
                incident.id
            )));
        };

        Ok(RemoteIncident {
            id: incident.id,
            page_id: incident.page_id,
            name: incident.name,
            components: incident.components.into_iter().map(|c| c.id).collect(),
            scheduled_for,
            scheduled_until,
            tool_metadata,
        })
    }
}

// =============================================================================
// Write side
// =============================================================================

/// Body of `POST /pages/{page}/incidents`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIncidentRequest {
    pub incident: IncidentPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolNamespace {
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "scheduleType")]
    pub schedule_type: String,
    #[serde(rename = "scheduleKey")]
    pub schedule_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncidentPayload {
    pub name: String,
    pub status: &'static str,
    pub impact_override: &'static str,
    pub scheduled_for: DateTime<Utc>,
    pub scheduled_until: DateTime<Utc>,
    pub scheduled_remind_prior: bool,
    pub scheduled_auto_in_progress: bool,
    pub scheduled_auto_completed: bool,
    pub scheduled_auto_transition: bool,
    pub metadata: BTreeMap<&'static str, ToolNamespace>,
    pub deliver_notifications: bool,
    pub auto_transition_deliver_notifications_at_end: bool,
    pub auto_transition_deliver_notifications_at_start: bool,
    pub auto_transition_to_maintenance_state: bool,
    pub auto_transition_to_operational_state: bool,
    pub auto_tweet_at_beginning: bool,
    pub auto_tweet_on_completion: bool,
    pub auto_tweet_on_creation: bool,
    pub auto_tweet_one_hour_before: bool,
    pub backfill_date: Option<DateTime<Utc>>,
    pub backfilled: bool,
    pub body: String,
    pub components: serde_json::Map<String, serde_json::Value>,
    pub component_ids: Vec<String>,
}

impl CreateIncidentRequest {
    /// A scheduled maintenance that starts, progresses and completes on its
    /// own, notifies subscribers, and never tweets.
    pub fn maintenance(spec: &MaintenanceIncidentSpec, created_at: DateTime<Utc>) -> Self {
        let namespace = ToolNamespace {
            created_at,
            schedule_type: spec.schedule_type.as_str().to_string(),
            schedule_key: spec.schedule_key.clone().unwrap_or_default(),
        };

        CreateIncidentRequest {
            incident: IncidentPayload {
                name: spec.title.clone(),
                status: "scheduled",
                impact_override: "maintenance",
                scheduled_for: spec.start,
                scheduled_until: spec.end,
                scheduled_remind_prior: true,
                scheduled_auto_in_progress: true,
                scheduled_auto_completed: true,
                scheduled_auto_transition: true,
                metadata: BTreeMap::from([(TOOL_NAMESPACE, namespace)]),
                deliver_notifications: true,
                auto_transition_deliver_notifications_at_end: true,
                auto_transition_deliver_notifications_at_start: true,
                auto_transition_to_maintenance_state: true,
                auto_transition_to_operational_state: true,
                auto_tweet_at_beginning: false,
                auto_tweet_on_completion: false,
                auto_tweet_on_creation: false,
                auto_tweet_one_hour_before: false,
                backfill_date: None,
                backfilled: false,
                body: spec.body.clone(),
                components: serde_json::Map::new(),
                component_ids: spec.components.ids().to_vec(),
            },
        }
    }
}
