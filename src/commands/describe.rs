//! Describe command handler.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::output::{print_detail_row, print_header, BOLD, DIM, GRAY, GREEN, RESET, YELLOW};

/// Show workflow, dependency and knob details for one project.
pub fn describe_command(query: &str) -> Result<()> {
    let data = Dataset::mock();
    let project = data.find_project(query)?;

    print_header();
    println!("{BOLD}{}{RESET} {GRAY}({}){RESET}", project.name, project.code_name);
    print_detail_row("LAST ACCESSED", &project.last_accessed);
    print_detail_row("RUN", &data.run_header.name);
    print_detail_row("SUITE", &data.run_header.suite);
    print_detail_row("BRANCH", &data.run_header.branch);
    println!();

    println!("{BOLD}Workflow stages{RESET}");
    for stage in &data.workflow {
        println!(
            "  {GREEN}●{RESET} {} {GRAY}({}, {}%){RESET}",
            stage.name,
            stage.status.label(),
            stage.progress
        );
        for step in &stage.steps {
            println!("      {DIM}{}{RESET} {GRAY}{}{RESET}", step.name, step.status.label());
        }
    }
    println!();

    println!("{BOLD}Build dependencies{RESET}");
    for dep in &data.build_deps {
        let marker = if dep.is_modified {
            format!("{YELLOW}~{RESET}")
        } else {
            " ".to_string()
        };
        println!(
            "  {marker} {:<10} {:<10} {GRAY}{} by {} ({}){RESET}",
            dep.id, dep.version, dep.released_ww, dep.released_by, dep.released_date
        );
    }
    println!();

    let overridden: Vec<_> = data.overridden_knobs().collect();
    println!("{BOLD}Overridden knobs ({}){RESET}", overridden.len());
    for knob in overridden {
        println!(
            "  {YELLOW}{:<28}{RESET} {:<10} {GRAY}{}{RESET}",
            knob.name, knob.display_value, knob.path
        );
    }
    Ok(())
}
