//! Loading of the rule and Statuspage documents.

mod definitions;
mod document;
mod statuspage;

pub use definitions::{MaintenanceEntry, MaintenancesDocument, RuleEntry, load_definitions};
pub use document::{default_statuspage_path, expand_path, load_document};
pub use statuspage::{StatuspageConfig, StatuspageService, load_mapping};
