//! LearnTrack command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the student store.
//! - Map subcommands onto `learntrack_core` use-cases and print results.
//!
//! # Invariants
//! - Logging is initialized before the store is opened.
//! - Any failure exits with status 1 and a one-line message on stderr.

use clap::{Parser, Subcommand};
use learntrack_core::{init_logging, CoreConfig};
use log::warn;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

mod commands;

/// Student competency assessment tracker.
#[derive(Parser)]
#[command(name = "learntrack")]
#[command(version)]
#[command(about = "Track student competency assessments and trends")]
#[command(propagate_version = true)]
struct Cli {
    /// Overrides LEARNTRACK_DATA_DIR.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Core linkage smoke check
    Ping,
    /// Print the core crate version
    Version,
    /// Print the assessment taxonomy with labels
    Taxonomy,
    /// Manage student profiles
    Student {
        #[command(subcommand)]
        action: commands::StudentCommand,
    },
    /// Record or edit an assessment
    Assess(commands::AssessArgs),
    /// List assessments newest first, one per day
    History { student: Uuid },
    /// Show the recent trend series, oldest first
    Trend {
        student: Uuid,
        /// Number of recent assessments; defaults to LEARNTRACK_TREND_WINDOW
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show dimension averages of the latest assessment
    Radar {
        student: Uuid,
        /// Show sub-dimension averages of this dimension instead
        #[arg(long)]
        dimension: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Ping => {
            println!("learntrack_core ping={}", learntrack_core::ping());
            return Ok(());
        }
        Command::Version => {
            println!("learntrack_core version={}", learntrack_core::core_version());
            return Ok(());
        }
        Command::Taxonomy => {
            commands::print_taxonomy();
            return Ok(());
        }
        _ => {}
    }

    let mut config = CoreConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if config.data_dir.is_relative() {
        config.data_dir = std::env::current_dir()?.join(&config.data_dir);
    }

    if let Err(err) = init_logging(&config.log_level, config.log_dir()) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = learntrack_core::open_db(config.db_path())?;
    let mut session = commands::Session::open(&conn, &config)?;

    let result = match cli.command {
        Command::Student { action } => session.student(action),
        Command::Assess(args) => session.assess(args),
        Command::History { student } => session.history(student),
        Command::Trend { student, limit } => session.trend(student, limit),
        Command::Radar { student, dimension } => session.radar(student, dimension.as_deref()),
        Command::Ping | Command::Version | Command::Taxonomy => Ok(()),
    };

    if let Err(err) = &result {
        warn!("event=cli_command module=cli status=error error={}", err);
    }
    result
}
