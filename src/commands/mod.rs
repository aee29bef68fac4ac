//! CLI command handlers.
//!
//! Each subcommand has its own module with a thin handler; shared state
//! loading (config, dataset) happens here at the edges.
//!
//! - [`dashboard`] - the interactive TUI screen
//! - [`projects`] - list the known projects
//! - [`describe`] - detail view for one project
//! - [`simulate`] - drive a step lifecycle in plain CLI mode

mod dashboard;
mod describe;
mod projects;
mod simulate;

pub use dashboard::dashboard_command;
pub use describe::describe_command;
pub use projects::projects_command;
pub use simulate::{simulate_command, SimulateOptions};
