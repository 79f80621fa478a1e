use anyhow::Result;
use owo_colors::OwoColorize;

use maintenance_core::schedule::build_schedule;
use maintenance_core::{MaintenanceDefinition, RunWindow};

use crate::render::{self, Render};

pub fn run(definitions: &[MaintenanceDefinition], window: &RunWindow) -> Result<()> {
    let schedule = build_schedule(definitions, window)?;

    if schedule.is_empty() {
        println!("{}", "No maintenance in this window".dimmed());
        return Ok(());
    }

    for scheduled in &schedule {
        println!("{}", scheduled.render(&window.calendar));
    }

    println!("\n{} {}", schedule.len(), render::pluralize("term", schedule.len()));
    Ok(())
}
