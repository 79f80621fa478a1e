use std::fmt;

use chrono::{DateTime, Utc};

use crate::date_range::RunWindow;
use crate::error::MaintenanceResult;
use crate::incident::{ComponentSet, MaintenanceIncidentSpec, RemoteIncident};
use crate::mapping::ServiceComponentMapping;
use crate::reconcile::change::Change;
use crate::repository::IncidentRepository;
use crate::schedule::ScheduledTerm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyExists,
    OutsideWindow,
    InThePast,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyExists => write!(f, "already exists"),
            SkipReason::OutsideWindow => write!(f, "outside window"),
            SkipReason::InThePast => write!(f, "in the past"),
        }
    }
}

/// A desired term that will not be added.
#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    pub term: ScheduledTerm,
    pub reason: SkipReason,
}

/// Remote writes that bring the page in line with the desired schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub deletions: Vec<RemoteIncident>,
    pub additions: Vec<MaintenanceIncidentSpec>,
    pub skipped: Vec<Skip>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub added: usize,
    pub deleted: usize,
}

impl ReconcilePlan {
    pub fn compute(
        desired: &[ScheduledTerm],
        remote: &[RemoteIncident],
        mapping: &ServiceComponentMapping,
        window: &RunWindow,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<Self> {
        let deletions = diff_deletes(desired, remote, mapping, window)?;
        let (additions, skipped) = diff_adds(desired, remote, mapping, window, now)?;

        Ok(ReconcilePlan {
            deletions,
            additions,
            skipped,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.additions.is_empty()
    }

    /// Every write in execution order: all deletions, then all additions.
    pub fn changes(&self) -> impl Iterator<Item = Change<'_>> {
        self.deletions
            .iter()
            .map(Change::Delete)
            .chain(self.additions.iter().map(Change::Add))
    }

    /// Issue the plan one call at a time. The first failure aborts; writes
    /// already made stay made.
    pub async fn apply(&self, repository: &dyn IncidentRepository) -> MaintenanceResult<ApplyStats> {
        let pacing = repository.add_pacing();
        let mut stats = ApplyStats::default();

        for change in self.changes() {
            match change {
                Change::Delete(incident) => {
                    repository.delete(incident).await?;
                    stats.deleted += 1;
                }
                Change::Add(spec) => {
                    if let Some(delay) = pacing.filter(|_| stats.added > 0) {
                        tokio::time::sleep(delay).await;
                    }
                    repository.add(spec).await?;
                    stats.added += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// Desired terms to create, and the ones that are skipped.
///
/// A term is created when no incident has its components and exactly its
/// window, and it starts after the first midnight of the run window, before
/// the midnight following its last date, and after `now`.
pub fn diff_adds(
    desired: &[ScheduledTerm],
    remote: &[RemoteIncident],
    mapping: &ServiceComponentMapping,
    window: &RunWindow,
    now: DateTime<Utc>,
) -> MaintenanceResult<(Vec<MaintenanceIncidentSpec>, Vec<Skip>)> {
    let mut additions = Vec::new();
    let mut skipped = Vec::new();

    for scheduled in desired {
        let components = mapping.components_for(&scheduled.service)?;
        let start = scheduled.term.start;

        let reason = if exists_same_incident(remote, components, scheduled) {
            Some(SkipReason::AlreadyExists)
        } else if start <= window.from || start >= window.until {
            Some(SkipReason::OutsideWindow)
        } else if start <= now {
            Some(SkipReason::InThePast)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                tracing::debug!(service = %scheduled.service, term = %scheduled.term, %reason, "skip");
                skipped.push(Skip {
                    term: scheduled.clone(),
                    reason,
                });
            }
            None => additions.push(MaintenanceIncidentSpec::recurring(scheduled, components.clone())),
        }
    }

    Ok((additions, skipped))
}

/// Tool-managed recurring incidents no longer in the desired schedule.
///
/// Only incidents scheduled strictly between the first and the last midnight
/// of the run window are candidates.
pub fn diff_deletes(
    desired: &[ScheduledTerm],
    remote: &[RemoteIncident],
    mapping: &ServiceComponentMapping,
    window: &RunWindow,
) -> MaintenanceResult<Vec<RemoteIncident>> {
    let keyed = desired
        .iter()
        .map(|s| Ok((mapping.components_for(&s.service)?, s)))
        .collect::<MaintenanceResult<Vec<_>>>()?;

    Ok(remote
        .iter()
        .filter(|incident| incident.is_recurring_schedule())
        .filter(|incident| incident.scheduled_for > window.from && incident.scheduled_for < window.to)
        .filter(|incident| {
            !keyed.iter().any(|(components, scheduled)| {
                incident.has_components(components) && incident.is_same_term(&scheduled.term)
            })
        })
        .cloned()
        .collect())
}

fn exists_same_incident(
    remote: &[RemoteIncident],
    components: &ComponentSet,
    scheduled: &ScheduledTerm,
) -> bool {
    remote
        .iter()
        .any(|i| i.has_components(components) && i.is_same_term(&scheduled.term))
}
