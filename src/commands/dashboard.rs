//! Dashboard command handler.

use crate::config::load_config;
use crate::dashboard::run_dashboard;
use crate::dataset::Dataset;
use crate::error::Result;

/// Launch the interactive dashboard, optionally focused on one project.
pub fn dashboard_command(project: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let data = Dataset::mock();

    // Fail on a bad project name before the terminal is put in raw mode.
    if let Some(query) = project {
        data.find_project(query)?;
    }

    run_dashboard(config, data, project)
}
