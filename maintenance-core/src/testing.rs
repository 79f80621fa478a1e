//! In-memory incident store for engine tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::incident::{MaintenanceIncidentSpec, RemoteIncident, ToolMetadata};
use crate::repository::IncidentRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Add(MaintenanceIncidentSpec),
    Delete(String),
}

pub struct MemoryRepository {
    page_id: String,
    pacing: Option<Duration>,
    incidents: Mutex<Vec<RemoteIncident>>,
    calls: Mutex<Vec<(Instant, Call)>>,
    next_id: Mutex<u32>,
    fail_adds: bool,
}

impl MemoryRepository {
    pub fn new(page_id: &str, incidents: Vec<RemoteIncident>) -> Self {
        MemoryRepository {
            page_id: page_id.to_string(),
            pacing: None,
            incidents: Mutex::new(incidents),
            calls: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            fail_adds: false,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = Some(pacing);
        self
    }

    pub fn failing_adds(mut self) -> Self {
        self.fail_adds = true;
        self
    }

    pub fn incidents(&self) -> Vec<RemoteIncident> {
        self.incidents.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl IncidentRepository for MemoryRepository {
    async fn add(&self, spec: &MaintenanceIncidentSpec) -> MaintenanceResult<()> {
        if self.fail_adds {
            return Err(MaintenanceError::RemoteWrite("status 429: enhance your calm".into()));
        }

        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = format!("new{}", *next);
            *next += 1;
            id
        };

        self.incidents.lock().unwrap().push(RemoteIncident {
            id,
            page_id: self.page_id.clone(),
            name: spec.title.clone(),
            components: spec.components.clone(),
            scheduled_for: spec.start,
            scheduled_until: spec.end,
            tool_metadata: Some(ToolMetadata {
                schedule_type: Some(spec.schedule_type.clone()),
                schedule_key: spec.schedule_key.clone(),
            }),
        });
        self.calls.lock().unwrap().push((Instant::now(), Call::Add(spec.clone())));
        Ok(())
    }

    async fn delete(&self, incident: &RemoteIncident) -> MaintenanceResult<()> {
        self.incidents.lock().unwrap().retain(|i| i.id != incident.id);
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), Call::Delete(incident.id.clone())));
        Ok(())
    }

    async fn find_all_scheduled(
        &self,
        _page: u32,
        _per_page: u32,
    ) -> MaintenanceResult<Vec<RemoteIncident>> {
        Ok(self.incidents())
    }

    fn add_pacing(&self) -> Option<Duration> {
        self.pacing
    }

    fn mode(&self) -> &str {
        "memory"
    }
}
