use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;

use maintenance_core::{
    IncidentRepository, MaintenanceDefinition, RunWindow, ServiceComponentMapping, prepare,
};

use crate::render::{self, Render};

pub async fn run(
    definitions: &[MaintenanceDefinition],
    mapping: &ServiceComponentMapping,
    window: &RunWindow,
    repository: &dyn IncidentRepository,
    verbose: bool,
) -> Result<()> {
    let calendar = &window.calendar;

    println!("{}", render::render_header(mapping.page_id(), window, repository.mode()));

    let run = prepare(definitions, mapping, window, repository, Utc::now()).await?;

    for notice in &run.notices {
        println!("   {}", notice.render(calendar));
    }
    if !run.notices.is_empty() {
        println!();
    }

    println!("{}", render::render_plan(&run.plan, calendar, verbose));

    if run.plan.is_empty() {
        return Ok(());
    }

    let stats = run.plan.apply(repository).await?;

    println!(
        "\nApplied ({}): {} added, {} deleted",
        repository.mode().dimmed(),
        stats.added,
        stats.deleted
    );

    Ok(())
}
