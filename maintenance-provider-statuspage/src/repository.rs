//! Real and simulated incident repositories backed by the Statuspage API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use maintenance_core::{
    IncidentRepository, MaintenanceIncidentSpec, MaintenanceResult, RemoteIncident,
};

use crate::client::StatuspageClient;
use crate::types::CreateIncidentRequest;

/// Statuspage answers bursts of creates with "Too many requests, enhance
/// your calm".
pub const ADD_PACING: Duration = Duration::from_secs(5);

async fn find_all_scheduled(
    client: &StatuspageClient,
    page: u32,
    per_page: u32,
) -> MaintenanceResult<Vec<RemoteIncident>> {
    client
        .scheduled_incidents(page, per_page)
        .await?
        .into_iter()
        .map(RemoteIncident::try_from)
        .collect()
}

/// Writes go to Statuspage.
pub struct RestRepository {
    client: StatuspageClient,
}

impl RestRepository {
    pub fn new(client: StatuspageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IncidentRepository for RestRepository {
    async fn add(&self, spec: &MaintenanceIncidentSpec) -> MaintenanceResult<()> {
        tracing::info!(title = %spec.title, start = %spec.start, end = %spec.end, "add incident");
        let request = CreateIncidentRequest::maintenance(spec, Utc::now());
        self.client.create_incident(&request).await
    }

    async fn delete(&self, incident: &RemoteIncident) -> MaintenanceResult<()> {
        tracing::info!(id = %incident.id, name = %incident.name, "delete incident");
        self.client.delete_incident(&incident.id).await
    }

    async fn find_all_scheduled(
        &self,
        page: u32,
        per_page: u32,
    ) -> MaintenanceResult<Vec<RemoteIncident>> {
        find_all_scheduled(&self.client, page, per_page).await
    }

    fn add_pacing(&self) -> Option<Duration> {
        Some(ADD_PACING)
    }

    fn mode(&self) -> &str {
        "statuspage"
    }
}

/// Reads from Statuspage, only logs writes.
pub struct SimulateRepository {
    client: StatuspageClient,
}

impl SimulateRepository {
    pub fn new(client: StatuspageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IncidentRepository for SimulateRepository {
    async fn add(&self, spec: &MaintenanceIncidentSpec) -> MaintenanceResult<()> {
        tracing::info!(title = %spec.title, start = %spec.start, end = %spec.end, "[dry run] add incident");
        Ok(())
    }

    async fn delete(&self, incident: &RemoteIncident) -> MaintenanceResult<()> {
        tracing::info!(id = %incident.id, name = %incident.name, "[dry run] delete incident");
        Ok(())
    }

    async fn find_all_scheduled(
        &self,
        page: u32,
        per_page: u32,
    ) -> MaintenanceResult<Vec<RemoteIncident>> {
        find_all_scheduled(&self.client, page, per_page).await
    }

    fn add_pacing(&self) -> Option<Duration> {
        None
    }

    fn mode(&self) -> &str {
        "simulate"
    }
}

/// Pick the repository for a run: simulated when `dry_run`.
pub fn repository_for(client: StatuspageClient, dry_run: bool) -> Box<dyn IncidentRepository> {
    if dry_run {
        Box::new(SimulateRepository::new(client))
    } else {
        Box::new(RestRepository::new(client))
    }
}
