//! One reconciliation pass: build, fetch, adjust, diff.

use chrono::{DateTime, Utc};

use crate::date_range::RunWindow;
use crate::error::{MaintenanceError, MaintenanceResult};
use crate::incident::RemoteIncident;
use crate::mapping::ServiceComponentMapping;
use crate::reconcile::{Adjustment, Notice, ReconcilePlan, adjust};
use crate::repository::IncidentRepository;
use crate::schedule::{MaintenanceDefinition, ScheduledTerm, build_schedule};

/// Incidents are read as a single page of this size. A full page means the
/// listing may be truncated, which would make the diff unsafe.
pub const INCIDENT_PAGE_SIZE: u32 = 200;

/// Everything computed before the first remote write.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub desired: Vec<ScheduledTerm>,
    pub notices: Vec<Notice>,
    pub plan: ReconcilePlan,
}

pub async fn fetch_incidents(
    repository: &dyn IncidentRepository,
) -> MaintenanceResult<Vec<RemoteIncident>> {
    let incidents = repository.find_all_scheduled(1, INCIDENT_PAGE_SIZE).await?;

    if incidents.len() >= INCIDENT_PAGE_SIZE as usize {
        return Err(MaintenanceError::CapacityExceeded {
            found: incidents.len(),
            limit: INCIDENT_PAGE_SIZE as usize,
        });
    }

    tracing::debug!(count = incidents.len(), mode = repository.mode(), "fetched scheduled incidents");
    Ok(incidents)
}

/// Build the desired schedule and compute the plan against a fresh read of
/// the remote store. Nothing is written.
pub async fn prepare(
    definitions: &[MaintenanceDefinition],
    mapping: &ServiceComponentMapping,
    window: &RunWindow,
    repository: &dyn IncidentRepository,
    now: DateTime<Utc>,
) -> MaintenanceResult<RunPlan> {
    let desired = build_schedule(definitions, window)?;
    let incidents = fetch_incidents(repository).await?;

    let Adjustment { kept, notices } = adjust(desired.clone(), &incidents, mapping)?;
    let plan = ReconcilePlan::compute(&kept, &incidents, mapping, window, now)?;

    tracing::info!(
        desired = desired.len(),
        kept = kept.len(),
        deletions = plan.deletions.len(),
        additions = plan.additions.len(),
        "reconciled schedule"
    );

    Ok(RunPlan {
        desired,
        notices,
        plan,
    })
}
