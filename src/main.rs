use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error};

use perf_scorer::ingest::Comparison;
use perf_scorer::server::{EmployeeResponse, TeamResponse};

const EXIT_SUCCESS: i32 = 0;
const EXIT_SERVER: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP scoring service (default if no subcommand)
    Serve,
    /// Score a local CSV or Excel file and print the ranking
    Score {
        /// Table to score (.csv, .xlsx or .xls)
        file: PathBuf,

        /// Print the team comparison instead of employees
        #[arg(long)]
        teams: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "perf-scorer")]
#[command(about = "Employee performance scoring service", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/perf-scorer/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, global = true, env = "SCORER_HOST")]
    host: Option<String>,

    /// Port to listen on (default: 8050)
    #[arg(long, global = true, env = "SCORER_PORT")]
    port: Option<u16>,

    /// Debug logging, enabled when set to "true" (default: true)
    #[arg(long, global = true, env = "SCORER_DEBUG")]
    debug: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // A .env file feeds the same variables as the process environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring .env: {}", e);
        }
    }

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    // Load config
    let mut config = match perf_scorer::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let overrides = perf_scorer::config::ServerOverrides {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
    }
    .or_legacy_env(|key| std::env::var(key).ok());
    match overrides {
        Ok(overrides) => config.server.apply(&overrides),
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }

    let serving = matches!(command, Commands::Serve);
    perf_scorer::logging::init_logging(cli.verbose || (serving && config.server.debug));

    // Validate config at startup
    let scoring = config.scoring.clone().unwrap_or_default();
    let mut errors = Vec::new();
    if let Err(e) = perf_scorer::scoring::validate_scoring(&scoring) {
        errors.extend(e);
    }
    if let Err(e) = perf_scorer::config::validate_server(&config.server) {
        errors.extend(e);
    }
    if !errors.is_empty() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match command {
        Commands::Serve => {
            if let Err(e) = perf_scorer::server::start_server(config.server, scoring).await {
                error!("{:#}", e);
                std::process::exit(EXIT_SERVER);
            }
        }
        Commands::Score {
            file,
            teams,
            format,
        } => {
            let start_time = Instant::now();
            let comparison = if teams {
                Comparison::Teams
            } else {
                Comparison::Employees
            };

            let rows = match perf_scorer::ingest::load_file(&file, comparison) {
                Ok(rows) => rows,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            debug!("Loaded {} rows from {}", rows.len(), file.display());

            let card = perf_scorer::scoring::score(&rows, &scoring);
            let use_colors = perf_scorer::output::should_use_colors();

            let output = match (format, comparison) {
                (OutputFormat::Table, Comparison::Employees) => {
                    perf_scorer::output::format_employee_table(&card.employees, use_colors)
                }
                (OutputFormat::Table, Comparison::Teams) => {
                    perf_scorer::output::format_team_table(&card.teams, use_colors)
                }
                (OutputFormat::Tsv, Comparison::Employees) => {
                    perf_scorer::output::format_employee_tsv(&card.employees)
                }
                (OutputFormat::Tsv, Comparison::Teams) => {
                    perf_scorer::output::format_team_tsv(&card.teams)
                }
                (OutputFormat::Json, Comparison::Employees) => to_json(&EmployeeResponse {
                    results: card.employees,
                }),
                (OutputFormat::Json, Comparison::Teams) => {
                    to_json(&TeamResponse { team: card.teams })
                }
            };
            if !output.is_empty() {
                println!("{}", output);
            }

            debug!(
                "Scored {} rows from {} in {:?}",
                rows.len(),
                file.display(),
                start_time.elapsed()
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize results: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}
