//! Maintenance definitions document.
//!
//! YAML documents are a top-level list; TOML documents
//! use an array of `[[maintenance]]` tables:
//!
//! ```yaml
//! - service: api
//!   title: API maintenance
//!   body: The API may be unavailable.
//!   recurring:
//!     - day: 2nd tuesday
//!       start: 22h
//!       time: 2h
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::config::document::load_document;
use crate::error::{MaintenanceError, MaintenanceResult};
use crate::rule::RecurringRule;
use crate::schedule::MaintenanceDefinition;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaintenancesDocument {
    List(Vec<MaintenanceEntry>),
    Table { maintenance: Vec<MaintenanceEntry> },
}

impl MaintenancesDocument {
    pub fn into_entries(self) -> Vec<MaintenanceEntry> {
        match self {
            MaintenancesDocument::List(entries) => entries,
            MaintenancesDocument::Table { maintenance } => maintenance,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceEntry {
    pub service: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub recurring: Vec<RuleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub day: String,
    pub start: String,
    pub time: String,
}

impl TryFrom<MaintenanceEntry> for MaintenanceDefinition {
    type Error = MaintenanceError;

    fn try_from(entry: MaintenanceEntry) -> Result<Self, Self::Error> {
        if entry.service.trim().is_empty() {
            return Err(MaintenanceError::Config(
                "Maintenance definition without a service".into(),
            ));
        }

        let rules = entry
            .recurring
            .iter()
            .map(|r| {
                RecurringRule::parse(&r.day, &r.start, &r.time).map_err(|e| match e {
                    MaintenanceError::RuleParse(msg) => {
                        MaintenanceError::RuleParse(format!("{} (service '{}')", msg, entry.service))
                    }
                    MaintenanceError::Config(msg) => {
                        MaintenanceError::Config(format!("{} (service '{}')", msg, entry.service))
                    }
                    other => other,
                })
            })
            .collect::<MaintenanceResult<Vec<_>>>()?;

        Ok(MaintenanceDefinition {
            service: entry.service,
            title: entry.title,
            body: entry.body,
            rules,
        })
    }
}

/// Load and validate every maintenance definition of a document.
pub fn load_definitions(path: &Path) -> MaintenanceResult<Vec<MaintenanceDefinition>> {
    let document: MaintenancesDocument = load_document(path)?;
    document
        .into_entries()
        .into_iter()
        .map(MaintenanceDefinition::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::DaySpec;
    use chrono::{Duration, Weekday};
    use std::io::Write;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_yaml_list() {
        let file = write_file(
            ".yaml",
            r#"
- service: api
  title: API maintenance
  body: The API may be unavailable.
  recurring:
    - day: 2nd tuesday
      start: 22h
      time: 2h
    - day: everyday
      start: 23h50m
      time: 20m
- service: web
  recurring: []
"#,
        );

        let definitions = load_definitions(file.path()).unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].service, "api");
        assert_eq!(definitions[0].title, "API maintenance");
        assert_eq!(
            definitions[0].rules[0].day,
            DaySpec::NthWeekday { ordinal: 2, weekday: Weekday::Tue }
        );
        assert_eq!(definitions[0].rules[0].start, Duration::hours(22));
        assert_eq!(definitions[0].rules[1].start, Duration::minutes(23 * 60 + 50));
        assert_eq!(definitions[0].rules[1].duration, Duration::minutes(20));
        assert!(definitions[1].rules.is_empty());
    }

    #[test]
    fn loads_toml_tables() {
        let file = write_file(
            ".toml",
            r#"
[[maintenance]]
service = "api"
title = "API maintenance"
body = ""

[[maintenance.recurring]]
day = "every sunday"
start = "3h"
time = "30m"
"#,
        );

        let definitions = load_definitions(file.path()).unwrap();

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].rules[0].day, DaySpec::EveryWeekday(Weekday::Sun));
        assert_eq!(definitions[0].rules[0].duration, Duration::minutes(30));
    }

    #[test]
    fn bad_day_spec_names_the_service() {
        let file = write_file(
            ".yml",
            "- service: api\n  recurring:\n    - {day: 6th monday, start: 1h, time: 1h}\n",
        );

        match load_definitions(file.path()) {
            Err(MaintenanceError::RuleParse(msg)) => assert!(msg.contains("api"), "{msg}"),
            other => panic!("expected RuleParse, got {:?}", other),
        }
    }

    #[test]
    fn bad_span_is_a_config_error() {
        let file = write_file(
            ".yaml",
            "- service: api\n  recurring:\n    - {day: everyday, start: noon, time: 1h}\n",
        );
        assert!(matches!(load_definitions(file.path()), Err(MaintenanceError::Config(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = load_definitions(Path::new("/nonexistent/maintenance.yaml"));
        assert!(matches!(result, Err(MaintenanceError::Config(_))));
    }
}
