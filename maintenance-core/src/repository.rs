//! Boundary to the remote incident store.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::MaintenanceResult;
use crate::incident::{MaintenanceIncidentSpec, RemoteIncident};

/// Read/write access to scheduled incidents on the remote page.
///
/// Implementations decide whether writes really happen; the engine treats
/// every implementation the same way and issues calls strictly one at a time.
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Create a scheduled maintenance incident.
    async fn add(&self, spec: &MaintenanceIncidentSpec) -> MaintenanceResult<()>;

    /// Delete an incident.
    async fn delete(&self, incident: &RemoteIncident) -> MaintenanceResult<()>;

    /// List scheduled incidents, one page at a time (pages start at 1).
    async fn find_all_scheduled(
        &self,
        page: u32,
        per_page: u32,
    ) -> MaintenanceResult<Vec<RemoteIncident>>;

    /// Pause between successive additions to stay under the store's rate
    /// limit. `None` when writes do not reach the store.
    fn add_pacing(&self) -> Option<Duration>;

    /// Short label for output, e.g. "statuspage" or "simulate".
    fn mode(&self) -> &str;
}
