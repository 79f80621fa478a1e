mod commands;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use maintenance_core::config::{default_statuspage_path, expand_path, load_definitions, load_mapping};
use maintenance_core::{CalendarContext, MaintenanceDefinition, RunWindow};
use maintenance_provider_statuspage::{StatuspageClient, repository_for};

#[derive(Parser)]
#[command(name = "statuspage-maintenance")]
#[command(about = "Register recurring maintenance windows as Statuspage scheduled incidents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScheduleArgs {
    /// Maintenance definitions (YAML, or TOML with a .toml extension)
    #[arg(long)]
    schedule: String,

    /// First date to schedule (YYYY-MM-DD)
    #[arg(long)]
    from: String,

    /// Number of days to schedule, the first date included
    #[arg(long)]
    day: i64,

    /// IANA time zone the rules are written in (default: system time zone)
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile Statuspage scheduled incidents with the maintenance rules
    Recurring {
        #[command(flatten)]
        args: ScheduleArgs,

        /// Statuspage page id and service components
        /// (default: ~/.config/statuspage-maintenance/statuspage.yaml)
        #[arg(long)]
        statuspage: Option<String>,

        /// Read incidents but only log the writes
        #[arg(long)]
        dry_run: bool,

        /// Statuspage API key
        #[arg(long, env = "STATUSPAGE_ACCESS_KEY", hide_env_values = true)]
        access_token: String,

        /// List every skipped term instead of a count
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the maintenance schedule without contacting Statuspage
    Schedule {
        #[command(flatten)]
        args: ScheduleArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recurring {
            args,
            statuspage,
            dry_run,
            access_token,
            verbose,
        } => {
            let (definitions, window) = args.load()?;

            let statuspage_path = match statuspage {
                Some(path) => expand_path(&path),
                None => default_statuspage_path()?,
            };
            let mapping = load_mapping(&statuspage_path)?;

            let client = StatuspageClient::new(mapping.page_id(), access_token);
            let repository = repository_for(client, dry_run);

            commands::recurring::run(&definitions, &mapping, &window, repository.as_ref(), verbose)
                .await
        }
        Commands::Schedule { args } => {
            let (definitions, window) = args.load()?;
            commands::schedule::run(&definitions, &window)
        }
    }
}

impl ScheduleArgs {
    /// Load the definitions and resolve the run window. Both fail before any
    /// remote call is made.
    fn load(&self) -> Result<(Vec<MaintenanceDefinition>, RunWindow)> {
        let calendar = match self.timezone.as_deref() {
            Some(name) => CalendarContext::from_name(name)?,
            None => system_calendar(),
        };
        let window = RunWindow::from_args(&self.from, self.day, calendar)?;
        let definitions = load_definitions(&expand_path(&self.schedule))?;

        tracing::debug!(
            from = %window.from_date,
            to = %window.to_date,
            tz = %calendar.tz(),
            definitions = definitions.len(),
            "loaded maintenance definitions"
        );

        Ok((definitions, window))
    }
}

/// The system time zone, or UTC when it cannot be determined.
fn system_calendar() -> CalendarContext {
    match iana_time_zone::get_timezone() {
        Ok(name) => CalendarContext::from_name(&name).unwrap_or_else(|e| {
            tracing::warn!(%name, error = %e, "unsupported system time zone, using UTC");
            CalendarContext::default()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "could not determine system time zone, using UTC");
            CalendarContext::default()
        }
    }
}
