//! Service name to Statuspage component mapping.

use std::collections::HashMap;

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::incident::ComponentSet;

/// Which Statuspage page and components each service maps to.
#[derive(Debug, Clone, Default)]
pub struct ServiceComponentMapping {
    page_id: String,
    services: HashMap<String, ComponentSet>,
}

impl ServiceComponentMapping {
    pub fn new<I>(page_id: impl Into<String>, services: I) -> MaintenanceResult<Self>
    where
        I: IntoIterator<Item = (String, ComponentSet)>,
    {
        let mut mapping = ServiceComponentMapping {
            page_id: page_id.into(),
            services: HashMap::new(),
        };

        for (service, components) in services {
            if mapping.services.contains_key(&service) {
                return Err(MaintenanceError::Config(format!(
                    "Service '{}' is mapped more than once",
                    service
                )));
            }
            mapping.services.insert(service, components);
        }

        Ok(mapping)
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn components_for(&self, service: &str) -> MaintenanceResult<&ComponentSet> {
        self.services
            .get(service)
            .ok_or_else(|| MaintenanceError::UnknownService(service.to_string()))
    }
}
