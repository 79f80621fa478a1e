//! Core engine for scheduling recurring maintenance windows on Statuspage.
//!
//! This crate provides everything the CLI and the Statuspage provider share:
//! - `rule`, `term` and `schedule` expand recurring rules into the desired schedule
//! - `reconcile` adjusts that schedule against foreign incidents and diffs it
//!   against the incidents this tool created earlier
//! - `repository` is the boundary to the remote incident store
//! - `run` wires the pieces into one reconciliation pass

pub mod calendar;
pub mod config;
pub mod date_range;
pub mod error;
pub mod incident;
pub mod mapping;
pub mod reconcile;
pub mod repository;
pub mod rule;
pub mod run;
pub mod schedule;
pub mod term;

#[cfg(test)]
mod testing;

pub use calendar::CalendarContext;
pub use date_range::RunWindow;
pub use error::{MaintenanceError, MaintenanceResult};
pub use incident::{ComponentSet, MaintenanceIncidentSpec, RemoteIncident, ScheduleType, ToolMetadata};
pub use mapping::ServiceComponentMapping;
pub use reconcile::{ApplyStats, Notice, ReconcilePlan, Skip, SkipReason};
pub use repository::IncidentRepository;
pub use rule::{DaySpec, RecurringRule};
pub use run::{RunPlan, prepare};
pub use schedule::{MaintenanceDefinition, ScheduledTerm};
pub use term::Term;
