//! fwdash CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command
//! handler. With no subcommand, the interactive dashboard opens.

use clap::{Parser, Subcommand};
use fwdash::commands::{
    dashboard_command, describe_command, projects_command, simulate_command, SimulateOptions,
};
use fwdash::completion::{print_completion_script, ShellType, SUPPORTED_SHELLS};
use fwdash::output::print_error;

#[derive(Debug, Parser)]
#[command(name = "fwdash")]
#[command(
    version,
    about = "Terminal dashboard for firmware build and validation workflow runs",
    after_help = "EXAMPLES:
    # Open the dashboard
    fwdash
    fwdash dashboard --project \"Arrow Lake-H\"

    # Browse the mock data from the plain CLI
    fwdash projects
    fwdash describe p3

    # Drive one step lifecycle end to end
    fwdash simulate --step step2 --ticks 10"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard {
        /// Focus a specific project by id or name
        #[arg(short, long)]
        project: Option<String>,
    },

    /// List the known projects
    Projects,

    /// Show detailed information about a specific project
    Describe {
        /// Project id or name
        project: String,
    },

    /// Drive one step lifecycle in plain CLI mode
    #[command(after_help = "EXAMPLES:
    fwdash simulate                     # Simulate the default test step
    fwdash simulate --step step1        # Simulate the IFWI build step
    fwdash simulate --ticks 10          # Ten ticks per busy phase")]
    Simulate {
        /// Step id to simulate (defaults to the in-progress test step)
        #[arg(short, long)]
        step: Option<String>,

        /// Ticks spent in each busy phase
        #[arg(short, long, default_value_t = 5)]
        ticks: u64,
    },

    /// Output shell completion script to stdout (hidden utility command)
    #[command(hide = true)]
    Completions {
        /// Shell type to generate completions for (bash, zsh, or fish)
        shell: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => dashboard_command(None),
        Some(Commands::Dashboard { project }) => dashboard_command(project.as_deref()),
        Some(Commands::Projects) => projects_command(),
        Some(Commands::Describe { project }) => describe_command(&project),
        Some(Commands::Simulate { step, ticks }) => {
            simulate_command(SimulateOptions { step, ticks })
        }
        Some(Commands::Completions { shell }) => match ShellType::from_name(&shell) {
            Ok(shell_type) => {
                print_completion_script(shell_type);
                Ok(())
            }
            Err(e) => {
                print_error(&format!(
                    "{}\nSupported shells: {}",
                    e,
                    SUPPORTED_SHELLS.join(", ")
                ));
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
