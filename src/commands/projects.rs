//! Projects command handler.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::output::{print_header, BOLD, CYAN, GRAY, RESET};

/// List the known projects with code names and last-accessed stamps.
pub fn projects_command() -> Result<()> {
    let data = Dataset::mock();

    print_header();
    println!("{BOLD}Projects ({}){RESET}", data.projects.len());
    for project in &data.projects {
        println!(
            "  {CYAN}{:<18}{RESET} {:<8} {GRAY}last accessed {}{RESET}",
            project.name, project.code_name, project.last_accessed
        );
    }
    Ok(())
}
