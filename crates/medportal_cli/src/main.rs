//! `medportal` command line entry point.
//!
//! # Responsibility
//! - Parse subcommands and route them to core services and tools.
//! - Map every failure to a non-zero exit code with one stderr line.

use clap::{Parser, Subcommand, ValueEnum};
use medportal_core::{default_log_level, init_logging, init_stderr_logging, PhaseId, SiteConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;

use error::CliError;

const DEFAULT_CONFIG_FILE: &str = "medportal.json";

#[derive(Parser, Debug)]
#[command(name = "medportal", version, about = "Medical department portal tools")]
struct Cli {
    /// JSON config file; skipped when absent.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Overrides `log_level` from config.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; stderr when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the portal page for a route and viewport.
    Render {
        #[arg(long, default_value = "")]
        fragment: String,
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Installed-app display mode.
        #[arg(long)]
        standalone: bool,
        #[arg(long)]
        open_group: Option<String>,
        #[arg(long)]
        open_region: Option<String>,
        /// Write HTML here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Inspect or change the progress task list.
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Assign project slots to a JSON array of topics.
    Slots {
        #[arg(long)]
        committee: String,
        /// JSON file with topics; legacy slot field names are accepted.
        #[arg(long)]
        input: PathBuf,
    },
    /// Submit a password to the login gate.
    Login {
        #[arg(long, default_value = "")]
        password: String,
        /// Clear the session flag instead.
        #[arg(long)]
        logout: bool,
    },
    /// Create portal accounts for the fixed roster.
    Provision {
        /// Run against an in-memory directory.
        #[arg(long)]
        dry_run: bool,
    },
    /// Rasterize app icons from one source image.
    Icons {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    List {
        /// Print the board as JSON.
        #[arg(long)]
        json: bool,
    },
    Add {
        #[arg(long, value_enum)]
        phase: PhaseArg,
        text: String,
    },
    Toggle {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PhaseArg {
    Diagnostico,
    Planificacion,
    Implementacion,
    Evaluacion,
}

impl From<PhaseArg> for PhaseId {
    fn from(value: PhaseArg) -> Self {
        match value {
            PhaseArg::Diagnostico => PhaseId::Diagnostico,
            PhaseArg::Planificacion => PhaseId::Planificacion,
            PhaseArg::Implementacion => PhaseId::Implementacion,
            PhaseArg::Evaluacion => PhaseId::Evaluacion,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("medportal: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = SiteConfig::load(Some(cli.config.as_path()))?;

    let level = cli
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or(default_log_level())
        .to_string();
    let logging = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(&level, dir),
        None => init_stderr_logging(&level),
    };
    logging.map_err(CliError::Logging)?;

    match cli.command {
        Command::Render {
            fragment,
            width,
            standalone,
            open_group,
            open_region,
            out,
        } => commands::render(
            &config,
            commands::RenderArgs {
                fragment,
                width,
                standalone,
                open_group,
                open_region,
                out,
            },
        ),
        Command::Tasks { command } => match command {
            TaskCommand::List { json } => commands::tasks_list(&config, json),
            TaskCommand::Add { phase, text } => commands::tasks_add(&config, &text, phase.into()),
            TaskCommand::Toggle { id } => commands::tasks_toggle(&config, id),
            TaskCommand::Delete { id } => commands::tasks_delete(&config, id),
        },
        Command::Slots { committee, input } => commands::slots(&config, &committee, &input),
        Command::Login { password, logout } => commands::login(&config, &password, logout),
        Command::Provision { dry_run } => commands::provision(dry_run),
        Command::Icons { source, out } => commands::icons(&source, &out),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, TaskCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn task_add_parses_phase_and_text() {
        let cli = Cli::try_parse_from([
            "medportal",
            "tasks",
            "add",
            "--phase",
            "evaluacion",
            "Cerrar informe",
        ])
        .unwrap();
        match cli.command {
            Command::Tasks {
                command: TaskCommand::Add { text, .. },
            } => assert_eq!(text, "Cerrar informe"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn provision_defaults_to_live_mode() {
        let cli = Cli::try_parse_from(["medportal", "provision"]).unwrap();
        assert!(matches!(cli.command, Command::Provision { dry_run: false }));
    }
}
