//! Terminal rendering for maintenance-core types.
//!
//! Extension traits that add colored output to core types using owo_colors.
//! Times are shown in the run's calendar context.

use chrono::{DateTime, Utc};
use maintenance_core::reconcile::{Change, ChangeKind};
use maintenance_core::{CalendarContext, Notice, ReconcilePlan, RunWindow, ScheduledTerm, Skip};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self, calendar: &CalendarContext) -> String;
}

fn render_kind(kind: ChangeKind) -> String {
    colorize(kind, kind.symbol())
}

fn colorize(kind: ChangeKind, text: &str) -> String {
    match kind {
        ChangeKind::Add => text.green().to_string(),
        ChangeKind::Delete => text.red().to_string(),
    }
}

fn render_window(calendar: &CalendarContext, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{} - {}", calendar.format(start), calendar.format(end))
}

impl Render for Change<'_> {
    fn render(&self, calendar: &CalendarContext) -> String {
        let kind = self.kind();
        match self {
            Change::Add(spec) => format!(
                "{} {} {}",
                render_kind(kind),
                colorize(kind, &spec.title),
                render_window(calendar, spec.start, spec.end).dimmed()
            ),
            Change::Delete(incident) => format!(
                "{} {} {} {}",
                render_kind(kind),
                colorize(kind, &incident.name),
                render_window(calendar, incident.scheduled_for, incident.scheduled_until).dimmed(),
                format!("id:{}", incident.id).dimmed()
            ),
        }
    }
}

impl Render for Notice {
    fn render(&self, calendar: &CalendarContext) -> String {
        let term = self.term();
        let incident = self.incident();
        let window = render_window(calendar, term.term.start, term.term.end);

        match self {
            Notice::Covered { .. } => format!(
                "{} [{}] {} is covered by {} ({})",
                "skip:".dimmed(),
                term.service,
                window,
                incident.name,
                render_window(calendar, incident.scheduled_for, incident.scheduled_until)
            )
            .dimmed()
            .to_string(),
            Notice::Overlap { .. } => format!(
                "{} {} ({}) should be modified to contain {}",
                "alert:".yellow().bold(),
                incident.name.yellow(),
                incident.manage_url().underline(),
                window
            ),
        }
    }
}

impl Render for Skip {
    fn render(&self, calendar: &CalendarContext) -> String {
        format!(
            "skip: [{}] {} ({})",
            self.term.service,
            render_window(calendar, self.term.term.start, self.term.term.end),
            self.reason
        )
        .dimmed()
        .to_string()
    }
}

impl Render for ScheduledTerm {
    fn render(&self, calendar: &CalendarContext) -> String {
        format!(
            "{} {} {}",
            format!("[{}]", self.service).cyan(),
            self.title,
            render_window(calendar, self.term.start, self.term.end).dimmed()
        )
    }
}

pub fn render_header(page_id: &str, window: &RunWindow, mode: &str) -> String {
    format!(
        "📅 {} {} {}",
        page_id.bold(),
        format!("{} .. {} ({})", window.from_date, window.to_date, window.calendar.tz()).dimmed(),
        format!("[{}]", mode).dimmed()
    )
}

pub fn render_plan(plan: &ReconcilePlan, calendar: &CalendarContext, verbose: bool) -> String {
    let mut lines = Vec::new();

    if plan.is_empty() {
        lines.push("   No changes".dimmed().to_string());
    }

    for change in plan.changes() {
        lines.push(format!("   {}", change.render(calendar)));
    }

    if verbose {
        for skip in &plan.skipped {
            lines.push(format!("   {}", skip.render(calendar)));
        }
    } else if !plan.skipped.is_empty() {
        let label = format!(
            "({} skipped {})",
            plan.skipped.len(),
            pluralize("term", plan.skipped.len())
        );
        lines.push(format!("   {}", label.dimmed()));
    }

    lines.join("\n")
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
