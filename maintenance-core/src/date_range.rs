//! Date window of a reconciliation run.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::calendar::CalendarContext;
use crate::error::{MaintenanceError, MaintenanceResult};

/// Inclusive range of calendar dates a run schedules for, with its instants
/// resolved once in the run's calendar context.
///
/// `from` and `to` are the local midnights of the first and last date;
/// `until` is the midnight after the last date.
#[derive(Debug, Clone)]
pub struct RunWindow {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub calendar: CalendarContext,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl RunWindow {
    pub fn new(
        from_date: NaiveDate,
        to_date: NaiveDate,
        calendar: CalendarContext,
    ) -> MaintenanceResult<Self> {
        if to_date < from_date {
            return Err(MaintenanceError::Config(format!(
                "Last date {} is before first date {}",
                to_date, from_date
            )));
        }

        let next_day = to_date.succ_opt().ok_or_else(|| {
            MaintenanceError::Config(format!("Date {} is out of range", to_date))
        })?;

        Ok(RunWindow {
            from_date,
            to_date,
            calendar,
            from: calendar.start_of_day(from_date)?,
            to: calendar.start_of_day(to_date)?,
            until: calendar.start_of_day(next_day)?,
        })
    }

    /// Build a window from CLI-style arguments.
    /// - `from`: first date as YYYY-MM-DD
    /// - `days`: number of days to schedule, at least 1
    pub fn from_args(from: &str, days: i64, calendar: CalendarContext) -> MaintenanceResult<Self> {
        if days < 1 {
            return Err(MaintenanceError::Config(format!(
                "Number of days must be at least 1, got {}",
                days
            )));
        }

        let from_date = parse_date(from)?;
        let out_of_range = || MaintenanceError::Config(format!("{} days from {} is out of range", days, from));
        let to_date = Duration::try_days(days - 1)
            .and_then(|span| from_date.checked_add_signed(span))
            .ok_or_else(out_of_range)?;

        Self::new(from_date, to_date, calendar)
    }

    /// Every calendar date of the window, first to last.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.to_date;
        self.from_date.iter_days().take_while(move |d| *d <= last)
    }
}

/// Parse YYYY-MM-DD
fn parse_date(s: &str) -> MaintenanceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        MaintenanceError::Config(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}
