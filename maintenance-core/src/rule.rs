//! Recurring rule grammar and its expansion into concrete terms.
//!
//! A rule document line such as `{day: "2nd tuesday", start: "22h", time: "2h"}`
//! becomes a [`RecurringRule`]: which days of a month it fires on, how long
//! after local midnight the window opens, and how long it stays open.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::calendar::CalendarContext;
use crate::error::{MaintenanceError, MaintenanceResult};
use crate::term::Term;

/// Which days a rule fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySpec {
    /// `everyday`
    Everyday,
    /// `every <weekday>`
    EveryWeekday(Weekday),
    /// `<1st|2nd|3rd|4th|5th> <weekday>`
    NthWeekday { ordinal: u32, weekday: Weekday },
}

impl DaySpec {
    pub fn is_maintenance_day(&self, date: NaiveDate) -> bool {
        match *self {
            DaySpec::Everyday => true,
            DaySpec::EveryWeekday(weekday) => date.weekday() == weekday,
            DaySpec::NthWeekday { ordinal, weekday } => {
                date.weekday() == weekday && ordinal_of_weekday(date) == ordinal
            }
        }
    }
}

/// Which occurrence of its weekday `date` is within its month.
///
/// e.g. 2020-01-01 -> 1 (first Wednesday), 2020-12-31 -> 5 (fifth Thursday)
pub fn ordinal_of_weekday(date: NaiveDate) -> u32 {
    // Days 1-7 hold the first occurrence of every weekday, 8-14 the second, ...
    (date.day() - 1) / 7 + 1
}

impl FromStr for DaySpec {
    type Err = MaintenanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let invalid = || MaintenanceError::RuleParse(format!("'{}'", s));

        if normalized == "everyday" {
            return Ok(DaySpec::Everyday);
        }

        let mut parts = normalized.split_whitespace();
        let (Some(ordinal), Some(weekday), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let weekday = parse_weekday(weekday).ok_or_else(invalid)?;

        let ordinal = match ordinal {
            "every" => return Ok(DaySpec::EveryWeekday(weekday)),
            "1st" => 1,
            "2nd" => 2,
            "3rd" => 3,
            "4th" => 4,
            "5th" => 5,
            _ => return Err(invalid()),
        };

        Ok(DaySpec::NthWeekday { ordinal, weekday })
    }
}

impl fmt::Display for DaySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DaySpec::Everyday => write!(f, "everyday"),
            DaySpec::EveryWeekday(weekday) => write!(f, "every {}", weekday_name(weekday)),
            DaySpec::NthWeekday { ordinal, weekday } => {
                let suffix = match ordinal {
                    1 => "st",
                    2 => "nd",
                    3 => "rd",
                    _ => "th",
                };
                write!(f, "{}{} {}", ordinal, suffix, weekday_name(weekday))
            }
        }
    }
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

/// One recurring maintenance rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringRule {
    pub day: DaySpec,
    /// Offset from local midnight at which the window opens.
    pub start: Duration,
    /// Length of the window.
    pub duration: Duration,
}

impl RecurringRule {
    /// Parse the raw strings of a rule document entry.
    ///
    /// `start` and `time` use compact spans such as `23h50m`, `20m` or `2h`.
    pub fn parse(day: &str, start: &str, time: &str) -> MaintenanceResult<Self> {
        let rule = RecurringRule {
            day: day.parse()?,
            start: parse_span(start, "start")?,
            duration: parse_span(time, "time")?,
        };

        if rule.duration <= Duration::zero() {
            return Err(MaintenanceError::Config(format!(
                "Maintenance window of '{}' must not be empty",
                day
            )));
        }

        Ok(rule)
    }

    pub fn is_maintenance_day(&self, date: NaiveDate) -> bool {
        self.day.is_maintenance_day(date)
    }

    /// Expand the rule over every date from `first` through `last` inclusive.
    ///
    /// Offsets are added to the instant of local midnight, so a window may end
    /// on the following calendar day.
    pub fn create_terms(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        calendar: &CalendarContext,
    ) -> MaintenanceResult<Vec<Term>> {
        let mut terms = Vec::new();

        for date in first.iter_days().take_while(|d| *d <= last) {
            if !self.is_maintenance_day(date) {
                continue;
            }
            let midnight = calendar.start_of_day(date)?;
            let start = midnight.checked_add_signed(self.start);
            let end = start.and_then(|start| start.checked_add_signed(self.duration));
            let (Some(start), Some(end)) = (start, end) else {
                return Err(MaintenanceError::Config(format!(
                    "Maintenance window of '{}' on {} is out of range",
                    self.day, date
                )));
            };
            terms.push(Term::new(start, end));
        }

        Ok(terms)
    }
}

fn parse_span(raw: &str, field: &str) -> MaintenanceResult<Duration> {
    let std_duration = humantime::parse_duration(raw.trim()).map_err(|e| {
        MaintenanceError::Config(format!("Invalid {} '{}': {}", field, raw, e))
    })?;
    Duration::from_std(std_duration)
        .map_err(|_| MaintenanceError::Config(format!("{} '{}' is too large", field, raw)))
}
