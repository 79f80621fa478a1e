use std::fmt;

use crate::incident::{MaintenanceIncidentSpec, RemoteIncident};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Delete,
}

impl ChangeKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            ChangeKind::Add => "+",
            ChangeKind::Delete => "-",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One remote write of a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change<'a> {
    Add(&'a MaintenanceIncidentSpec),
    Delete(&'a RemoteIncident),
}

impl Change<'_> {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Add(_) => ChangeKind::Add,
            Change::Delete(_) => ChangeKind::Delete,
        }
    }
}

impl fmt::Display for Change<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Add(spec) => write!(f, "{}: {}", self.kind(), spec),
            Change::Delete(incident) => write!(f, "{}: {}", self.kind(), incident),
        }
    }
}
