use crate::error::MaintenanceResult;
use crate::incident::RemoteIncident;
use crate::mapping::ServiceComponentMapping;
use crate::schedule::ScheduledTerm;

/// Why a desired term was dropped in favour of a foreign incident.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The foreign incident already covers the whole term.
    Covered {
        term: ScheduledTerm,
        incident: RemoteIncident,
    },
    /// The foreign incident only partly overlaps the term and should be
    /// widened by hand to contain it.
    Overlap {
        term: ScheduledTerm,
        incident: RemoteIncident,
    },
}

impl Notice {
    pub fn term(&self) -> &ScheduledTerm {
        match self {
            Notice::Covered { term, .. } | Notice::Overlap { term, .. } => term,
        }
    }

    pub fn incident(&self) -> &RemoteIncident {
        match self {
            Notice::Covered { incident, .. } | Notice::Overlap { incident, .. } => incident,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjustment {
    pub kept: Vec<ScheduledTerm>,
    pub notices: Vec<Notice>,
}

/// Drop every desired term that overlaps an incident for the same components
/// which this tool did not create as a recurring schedule.
///
/// Overlap here is closed: an incident ending exactly when the term starts
/// still collides. Only the first colliding incident (in `remote` order)
/// is reported for a term.
pub fn adjust(
    desired: Vec<ScheduledTerm>,
    remote: &[RemoteIncident],
    mapping: &ServiceComponentMapping,
) -> MaintenanceResult<Adjustment> {
    let mut adjustment = Adjustment::default();

    for scheduled in desired {
        let components = mapping.components_for(&scheduled.service)?;

        let collision = remote.iter().find(|incident| {
            !incident.is_recurring_schedule()
                && incident.has_components(components)
                && incident.overlaps(&scheduled.term)
        });

        match collision {
            None => adjustment.kept.push(scheduled),
            Some(incident) if incident.covers(&scheduled.term) => {
                tracing::debug!(
                    service = %scheduled.service,
                    term = %scheduled.term,
                    incident = %incident.id,
                    "term covered by existing maintenance"
                );
                adjustment.notices.push(Notice::Covered {
                    term: scheduled,
                    incident: incident.clone(),
                });
            }
            Some(incident) => {
                tracing::debug!(
                    service = %scheduled.service,
                    term = %scheduled.term,
                    incident = %incident.id,
                    url = %incident.manage_url(),
                    "term overlaps existing maintenance"
                );
                adjustment.notices.push(Notice::Overlap {
                    term: scheduled,
                    incident: incident.clone(),
                });
            }
        }
    }

    Ok(adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaintenanceError;
    use crate::incident::{ComponentSet, ToolMetadata};
    use crate::term::Term;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, h, m, 0).unwrap()
    }

    fn mapping() -> ServiceComponentMapping {
        ServiceComponentMapping::new(
            "testPageId",
            [
                ("test".to_string(), ComponentSet::new(["testComponentId"])),
                ("other".to_string(), ComponentSet::new(["otherComponentId"])),
            ],
        )
        .unwrap()
    }

    fn scheduled(service: &str, from: (u32, u32), to: (u32, u32)) -> ScheduledTerm {
        ScheduledTerm {
            service: service.to_string(),
            title: "title".to_string(),
            body: "body".to_string(),
            term: Term::new(at(from.0, from.1), at(to.0, to.1)),
        }
    }

    fn foreign(id: &str, components: &[&str], from: (u32, u32), to: (u32, u32)) -> RemoteIncident {
        RemoteIncident {
            id: id.to_string(),
            page_id: "testPageId".to_string(),
            name: format!("incident {id}"),
            components: ComponentSet::new(components.iter().copied()),
            scheduled_for: at(from.0, from.1),
            scheduled_until: at(to.0, to.1),
            tool_metadata: None,
        }
    }

    #[test]
    fn covered_term_is_dropped_without_alert() {
        let desired = vec![scheduled("test", (1, 0), (1, 10))];
        let remote = vec![foreign("i1", &["testComponentId"], (0, 50), (1, 10))];

        let adjustment = adjust(desired.clone(), &remote, &mapping()).unwrap();

        assert!(adjustment.kept.is_empty());
        assert_eq!(
            adjustment.notices,
            vec![Notice::Covered { term: desired[0].clone(), incident: remote[0].clone() }]
        );
    }

    #[test]
    fn partial_overlap_is_dropped_with_one_alert() {
        let desired = vec![scheduled("test", (1, 0), (1, 10))];
        let remote = vec![
            foreign("i1", &["testComponentId"], (1, 5), (1, 30)),
            foreign("i2", &["testComponentId"], (0, 30), (1, 5)),
        ];

        let adjustment = adjust(desired, &remote, &mapping()).unwrap();

        assert!(adjustment.kept.is_empty());
        assert_eq!(adjustment.notices.len(), 1);
        assert!(matches!(&adjustment.notices[0], Notice::Overlap { incident, .. } if incident.id == "i1"));
        assert_eq!(
            adjustment.notices[0].incident().manage_url(),
            "https://manage.statuspage.io/pages/testPageId/incidents/i1"
        );
    }

    #[test]
    fn touching_incident_collides() {
        let desired = vec![scheduled("test", (1, 0), (1, 10))];
        let remote = vec![foreign("i1", &["testComponentId"], (1, 10), (2, 0))];

        let adjustment = adjust(desired, &remote, &mapping()).unwrap();

        assert!(adjustment.kept.is_empty());
        assert!(matches!(adjustment.notices[0], Notice::Overlap { .. }));
    }

    #[test]
    fn unrelated_incidents_leave_terms_unchanged() {
        let desired = vec![
            scheduled("test", (1, 0), (1, 10)),
            scheduled("other", (3, 0), (4, 0)),
            scheduled("test", (5, 0), (6, 0)),
        ];
        let mut managed = foreign("i3", &["testComponentId"], (5, 0), (6, 0));
        managed.tool_metadata = Some(ToolMetadata::default());
        let remote = vec![
            // no overlap
            foreign("i1", &["testComponentId"], (2, 0), (2, 30)),
            // different component set
            foreign("i2", &["testComponentId", "otherComponentId"], (3, 0), (4, 0)),
            managed,
        ];

        let adjustment = adjust(desired.clone(), &remote, &mapping()).unwrap();

        assert_eq!(adjustment.kept, desired);
        assert!(adjustment.notices.is_empty());
    }

    #[test]
    fn unknown_service_is_fatal() {
        let desired = vec![scheduled("missing", (1, 0), (1, 10))];
        let result = adjust(desired, &[], &mapping());
        assert!(matches!(result, Err(MaintenanceError::UnknownService(s)) if s == "missing"));
    }
}
