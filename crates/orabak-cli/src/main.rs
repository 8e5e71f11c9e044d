//! Orabak CLI - operator console for Oracle backup management
//!
//! Usage:
//!   orabak dashboard              Launch the terminal console
//!   orabak status                 Print a one-shot status summary
//!   orabak scheduler start|stop   Send a scheduler command
//!   orabak init [path]            Write a default orabak.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orabak_client::{BackendApi, HttpBackend};
use orabak_core::{ConsoleConfig, DEFAULT_CONFIG_FILE};
use orabak_dashboard::{
    ActivityHistory, AuthContext, CommandOutcome, ConfigContext, DashboardPage, DashboardView,
    DatabasePanel, SchedulerCommand, SchedulerContext,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orabak")]
#[command(author, version, about = "Operator console for Oracle backup management")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $ORABAK_CONFIG, then ./orabak.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal console
    Dashboard {
        /// Poll health and scheduler state every N milliseconds
        #[arg(long, value_name = "MS")]
        auto_refresh: Option<u64>,
    },

    /// Fetch every slice once and print a summary
    Status,

    /// Start or stop the backup scheduler
    Scheduler {
        #[command(subcommand)]
        action: SchedulerCommands,
    },

    /// Write a default configuration file
    Init {
        /// Target path
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum SchedulerCommands {
    /// Start the scheduler
    Start,
    /// Stop the scheduler
    Stop,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { path, force } = &cli.command {
        init_logging(cli.verbose, None)?;
        return cmd_init(path, *force);
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let mut config = ConsoleConfig::resolve(cli.config.as_deref(), &cwd)?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    config.validate()?;

    match cli.command {
        Commands::Dashboard { auto_refresh } => {
            // The console owns stdout; logs go to a file
            init_logging(cli.verbose, Some(&config.effective_log_file()))?;
            if auto_refresh.is_some() {
                config.auto_refresh_ms = auto_refresh;
            }
            cmd_dashboard(config).await
        }
        Commands::Status => {
            init_logging(cli.verbose, None)?;
            cmd_status(config).await
        }
        Commands::Scheduler { action } => {
            init_logging(cli.verbose, None)?;
            let command = match action {
                SchedulerCommands::Start => SchedulerCommand::Start,
                SchedulerCommands::Stop => SchedulerCommand::Stop,
            };
            cmd_scheduler(config, command).await
        }
        Commands::Init { .. } => Ok(()),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
        }
        None => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
        }
    }
    Ok(())
}

fn backend(config: &ConsoleConfig) -> Result<(AuthContext, Arc<dyn BackendApi>)> {
    let auth = AuthContext::resolve(config);
    let api = HttpBackend::from_config(config, auth.token().map(str::to_string))
        .context("Failed to build HTTP client")?;
    Ok((auth, Arc::new(api)))
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ConsoleConfig::write_default(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

async fn cmd_dashboard(config: ConsoleConfig) -> Result<()> {
    info!("Launching console against {}", config.api_url);
    orabak_dashboard::run(config).await?;
    Ok(())
}

async fn cmd_status(config: ConsoleConfig) -> Result<()> {
    let (auth, api) = backend(&config)?;
    let history = ActivityHistory::new(config.history_limit);
    let system = ConfigContext::new(api.clone(), history.clone());
    let scheduler = SchedulerContext::new(api.clone(), history.clone());
    let dashboard = DashboardPage::new(api, config.stats_window_days, history.clone());

    // Every slice loads independently; failures only leave their slice empty
    let _ = tokio::join!(system.refresh(), scheduler.refresh(), dashboard.load_statistics());

    let view = dashboard.view(&system, &scheduler);
    print!("{}", format_status(&config.api_url, auth.label(), &view));

    let failures: Vec<_> = history
        .entries()
        .into_iter()
        .filter(|e| e.kind.is_failure())
        .collect();
    if !failures.is_empty() {
        println!("\nErrores:");
        for entry in failures.iter().rev() {
            println!("  ✗ {}: {}", entry.source, entry.message);
        }
    }
    Ok(())
}

async fn cmd_scheduler(config: ConsoleConfig, command: SchedulerCommand) -> Result<()> {
    let (_, api) = backend(&config)?;
    let scheduler = SchedulerContext::new(api, ActivityHistory::new(config.history_limit));

    match scheduler.run(command).await? {
        CommandOutcome::Applied(status) => {
            println!(
                "Scheduler {}: {} ({} scheduled jobs)",
                command.as_str(),
                status.token(),
                status.scheduled_jobs_count
            );
        }
        CommandOutcome::Busy => println!("Another scheduler command is in flight"),
    }
    Ok(())
}

/// Plain-text rendering of the dashboard view
fn format_status(api_url: &str, auth: &str, view: &DashboardView) -> String {
    let mut out = String::new();
    let title = "Sistema de Gestión de Respaldo Oracle";
    out.push_str(&format!("{}\n{}\n", title, "=".repeat(title.chars().count())));
    out.push_str(&format!("API:           {} ({})\n", api_url, auth));

    for card in [&view.database_card, &view.scheduler_card] {
        let token = card.token.as_deref().unwrap_or("—");
        out.push_str(&format!(
            "{:<15}{} [{}]\n",
            format!("{}:", card.title),
            card.headline,
            token
        ));
    }
    out.push_str(&format!(
        "Estrategias:   {} ({})\n",
        view.strategy_card.ratio_label(),
        view.strategy_card.inactive_label()
    ));
    out.push_str(&format!("Trabajos:      {}\n", view.jobs_card.count));

    if let Some(stats) = &view.statistics {
        out.push_str(&format!(
            "\n{}\n  Éxito: {}  Total: {}  Completados: {}  Fallidos: {}  Tamaño: {}\n",
            stats.title,
            stats.rate_label,
            stats.total,
            stats.completed,
            stats.failed,
            stats.size_label
        ));
    }
    match &view.database_panel {
        Some(DatabasePanel::Details { name, log_mode, .. }) => {
            out.push_str(&format!("  Base de datos: {} ({})\n", name, log_mode));
        }
        Some(DatabasePanel::Unavailable) => {
            out.push_str(&format!("  {}\n", DatabasePanel::UNAVAILABLE_MESSAGE));
        }
        None => {}
    }

    if !view.alerts.is_empty() {
        out.push_str("\nAlertas:\n");
        for alert in &view.alerts {
            out.push_str(&format!("  ▲ {}\n", alert.message()));
        }
    }
    out
}
