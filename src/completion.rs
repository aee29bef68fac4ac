//! Shell completion generation for the `completions` subcommand.

use crate::error::{FwdashError, Result};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Shells we can emit completion scripts for.
pub const SUPPORTED_SHELLS: &[&str] = &["bash", "zsh", "fish"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl ShellType {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "bash" => Ok(ShellType::Bash),
            "zsh" => Ok(ShellType::Zsh),
            "fish" => Ok(ShellType::Fish),
            other => Err(FwdashError::Config(format!(
                "Unsupported shell: '{other}'"
            ))),
        }
    }

    fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Command hierarchy mirroring the CLI in `main.rs`, for clap_complete.
fn build_cli() -> Command {
    Command::new("fwdash")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal dashboard for firmware build and validation workflow runs")
        .subcommand(
            Command::new("dashboard").about("Open the interactive dashboard").arg(
                clap::Arg::new("project")
                    .short('p')
                    .long("project")
                    .help("Focus a specific project"),
            ),
        )
        .subcommand(Command::new("projects").about("List the known projects"))
        .subcommand(
            Command::new("describe")
                .about("Show detailed information about a project")
                .arg(clap::Arg::new("project").required(true)),
        )
        .subcommand(
            Command::new("simulate")
                .about("Drive one step lifecycle in plain CLI mode")
                .arg(clap::Arg::new("step").short('s').long("step"))
                .arg(clap::Arg::new("ticks").short('t').long("ticks")),
        )
}

/// Write the completion script for `shell` to stdout.
pub fn print_completion_script(shell: ShellType) {
    let mut cmd = build_cli();
    generate(
        shell.to_clap_shell(),
        &mut cmd,
        "fwdash",
        &mut io::stdout(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ShellType::from_name("bash").unwrap(), ShellType::Bash);
        assert_eq!(ShellType::from_name("zsh").unwrap(), ShellType::Zsh);
        assert_eq!(ShellType::from_name("fish").unwrap(), ShellType::Fish);
        assert!(ShellType::from_name("powershell").is_err());
    }

    #[test]
    fn test_supported_shells_match_from_name() {
        for shell in SUPPORTED_SHELLS {
            assert!(ShellType::from_name(shell).is_ok());
        }
    }

    #[test]
    fn test_build_cli_has_subcommands() {
        let cmd = build_cli();
        let names: Vec<_> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        assert!(names.contains(&"dashboard"));
        assert!(names.contains(&"projects"));
        assert!(names.contains(&"describe"));
        assert!(names.contains(&"simulate"));
    }
}
