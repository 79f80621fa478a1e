//! The calendar context every date computation runs in.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{MaintenanceError, MaintenanceResult};

/// Time zone in which rule documents are interpreted.
///
/// Days, weekdays and start-of-day offsets are all local to this zone; the
/// resulting instants are stored in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    tz: Tz,
}

impl Default for CalendarContext {
    fn default() -> Self {
        CalendarContext { tz: Tz::UTC }
    }
}

impl CalendarContext {
    pub fn new(tz: Tz) -> Self {
        CalendarContext { tz }
    }

    /// Parse an IANA zone name such as `Asia/Tokyo`.
    pub fn from_name(name: &str) -> MaintenanceResult<Self> {
        let tz: Tz = name
            .trim()
            .parse()
            .map_err(|e| MaintenanceError::Config(format!("Unknown time zone '{}': {}", name, e)))?;
        Ok(Self::new(tz))
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// First instant of `date` in this zone.
    ///
    /// When a DST transition makes midnight ambiguous the earlier instant wins.
    /// A date whose midnight does not exist at all is rejected.
    pub fn start_of_day(&self, date: NaiveDate) -> MaintenanceResult<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                MaintenanceError::Config(format!("{} has no midnight in {}", date, self.tz))
            })
    }

    /// Local calendar date of an instant.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// `YYYY-MM-DD HH:MM` in local time, for messages.
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.tz)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}
