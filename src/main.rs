use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sumview::app::{App, Event, ViewMode};
use sumview::cli::{self, ManageAction, OutputFormat};
use sumview::config;
use sumview::web;

#[derive(Debug, Parser)]
#[command(name = "sumview")]
#[command(about = "Browse daily research summaries from local storage or the platform API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show summaries from the local storage tree
    Local {
        /// Date to show (default: most recent)
        #[arg(long)]
        date: Option<String>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show summaries fetched from the platform API
    Remote {
        /// Date to show (default: first listed by the API)
        #[arg(long)]
        date: Option<String>,
        /// Fetch a single category instead of the whole day
        #[arg(long)]
        category: Option<String>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Storage management: export, cleanup, storage index
    Manage {
        #[command(subcommand)]
        action: Option<ManageCommand>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table", global = true)]
        format: String,
    },
    /// Category and daily aggregates of the local summaries
    Analyze {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show the storage index (remote by default)
    Index {
        /// Build the index from the local tree instead
        #[arg(long)]
        local: bool,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Interactive terminal dashboard
    Dash {
        /// Starting view: local, remote, manage
        #[arg(long)]
        mode: Option<String>,
        /// Start with the analysis panel shown
        #[arg(long)]
        analysis: bool,
    },
    /// Launch the web dashboard
    Web {
        /// Bind address (default: from config, 127.0.0.1:8501)
        #[arg(long)]
        addr: Option<String>,
        /// Open the dashboard in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Show recent activity log records
    Activity {
        /// Number of records to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ManageCommand {
    /// Trigger a remote export
    Export,
    /// Delete remote summaries older than N days
    Cleanup {
        /// Days of summaries to keep (>= 1)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show effective configuration (merged from all sources)
    Show,
    /// Create default config file at ~/.sumview/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a configuration value (e.g., api.base_url http://host:5000/api)
    Set {
        /// Dotted key path (e.g., dashboard.days_to_keep)
        key: String,
        /// Value to set
        value: String,
    },
    /// Reset configuration to defaults
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load();
    let mut app = App::new(&cfg);

    match cli.command {
        Commands::Local { date, format } => {
            cli::run_local(&mut app, date, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Remote {
            date,
            category,
            format,
        } => cli::run_remote(
            &mut app,
            date,
            category,
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Manage { action, format } => {
            let action = action.map(|a| match a {
                ManageCommand::Export => ManageAction::Export,
                ManageCommand::Cleanup { days } => ManageAction::Cleanup { days },
            });
            cli::run_manage(&mut app, action, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Analyze { format } => {
            cli::run_analyze(&app, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Index { local, format } => {
            cli::run_index(&app, local, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Dash { mode, analysis } => {
            if let Some(mode) = mode {
                app.handle(Event::SelectMode(mode.parse::<ViewMode>()?));
            }
            if analysis {
                app.handle(Event::ShowAnalysis(true));
            }
            let stdin = io::stdin();
            cli::dashboard::run_loop(&mut app, stdin.lock(), io::stdout())
        }
        Commands::Web { addr, open } => {
            let addr = addr.unwrap_or_else(|| cfg.web.addr.clone());
            web::serve(&app, &addr, open)
        }
        Commands::Activity { limit, format } => {
            cli::run_activity(&app, limit, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&cfg),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
