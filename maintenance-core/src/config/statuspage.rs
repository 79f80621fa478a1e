//! Statuspage document: page id and the components of each service.

use std::path::Path;

use serde::Deserialize;

use crate::config::document::load_document;
use crate::error::{MaintenanceError, MaintenanceResult};
use crate::incident::ComponentSet;
use crate::mapping::ServiceComponentMapping;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuspageConfig {
    pub statuspage_page_id: String,
    #[serde(default)]
    pub statuspage_services: Vec<StatuspageService>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuspageService {
    pub service: String,
    pub component_ids: ComponentSet,
}

impl TryFrom<StatuspageConfig> for ServiceComponentMapping {
    type Error = MaintenanceError;

    fn try_from(config: StatuspageConfig) -> Result<Self, Self::Error> {
        if config.statuspage_page_id.trim().is_empty() {
            return Err(MaintenanceError::Config("statuspagePageId is empty".into()));
        }

        if let Some(empty) = config
            .statuspage_services
            .iter()
            .find(|s| s.component_ids.is_empty())
        {
            return Err(MaintenanceError::Config(format!(
                "Service '{}' has no componentIds",
                empty.service
            )));
        }

        ServiceComponentMapping::new(
            config.statuspage_page_id,
            config
                .statuspage_services
                .into_iter()
                .map(|s| (s.service, s.component_ids)),
        )
    }
}

pub fn load_mapping(path: &Path) -> MaintenanceResult<ServiceComponentMapping> {
    let config: StatuspageConfig = load_document(path)?;
    ServiceComponentMapping::try_from(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_yaml_mapping() {
        let file = write_file(
            ".yaml",
            r#"
statuspagePageId: testPageId
statuspageServices:
  - service: testService
    componentIds: [testComponentId]
  - service: testService2
    componentIds:
      - testComponentId2
      - testComponentId1
"#,
        );

        let mapping = load_mapping(file.path()).unwrap();

        assert_eq!(mapping.page_id(), "testPageId");
        assert_eq!(
            mapping.components_for("testService2").unwrap(),
            &ComponentSet::new(["testComponentId1", "testComponentId2"])
        );
    }

    #[test]
    fn loads_toml_mapping() {
        let file = write_file(
            ".toml",
            r#"
statuspagePageId = "page"

[[statuspageServices]]
service = "api"
componentIds = ["c1"]
"#,
        );

        let mapping = load_mapping(file.path()).unwrap();
        assert_eq!(mapping.components_for("api").unwrap(), &ComponentSet::new(["c1"]));
    }

    #[test]
    fn rejects_incomplete_documents() {
        let no_page = write_file(".yaml", "statuspagePageId: ''\n");
        assert!(matches!(load_mapping(no_page.path()), Err(MaintenanceError::Config(_))));

        let no_components = write_file(
            ".yaml",
            "statuspagePageId: page\nstatuspageServices:\n  - {service: api, componentIds: []}\n",
        );
        assert!(matches!(
            load_mapping(no_components.path()),
            Err(MaintenanceError::Config(_))
        ));
    }
}
