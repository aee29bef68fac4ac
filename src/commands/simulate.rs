//! Simulate command handler.
//!
//! Drives one step's lifecycle machine from discovery to done in plain CLI
//! mode: busy phases tick a progress bar at the configured interval, the
//! review and result gates auto-resolve, and Ctrl-C aborts at the next tick
//! boundary.

use crate::config::load_config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::output::{print_header, print_info, print_phase_banner, print_success};
use crate::phase::{ExecutionPhase, Outcome, PhaseState};
use crate::signal::SignalHandler;
use crate::viewmodel::{format_elapsed, step_status_line, Tone};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;

const AUTO_RESOLUTION_REASON: &str = "Simulated run, auto-resolved";

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    /// Step to simulate; defaults to the in-progress test step.
    pub step: Option<String>,
    /// Ticks spent in each busy phase.
    pub ticks: u64,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            step: None,
            ticks: 5,
        }
    }
}

/// Run the simulated lifecycle to completion (or Ctrl-C).
pub fn simulate_command(options: SimulateOptions) -> Result<()> {
    let config = load_config()?;
    let data = Dataset::mock();
    let step = data.find_step(options.step.as_deref().unwrap_or("step2"))?;
    let signals = SignalHandler::new()?;

    print_header();
    print_info(&format!("Simulating lifecycle of {}", step.name));

    let mut machine = PhaseState::starting_at(step.kind, ExecutionPhase::Discovery);
    let tick = Duration::from_secs(config.tick_seconds);

    while machine.current() != ExecutionPhase::Done {
        let phase = machine.current();
        let info = machine.current_info();
        print_phase_banner(info.label, banner_tone(phase));

        if phase.is_busy() {
            if !run_busy_phase(&mut machine, &signals, options.ticks, tick, info.description) {
                print_info(&format!("Aborted: {}", step_status_line(&machine)));
                return Ok(());
            }
            machine.advance();
            continue;
        }

        match phase {
            ExecutionPhase::Review => {
                print_info(info.description);
                machine.advance();
            }
            ExecutionPhase::Result => {
                print_info(info.description);
                machine.choose_outcome(Outcome::Passed);
                machine.set_resolution_reason(AUTO_RESOLUTION_REASON);
                machine.finalize();
            }
            // Busy phases and Done are handled above.
            _ => machine.advance(),
        }
    }

    print_success(&format!(
        "{} finished {} in {}",
        step.name,
        machine.summary_label(),
        format_elapsed(machine.elapsed_seconds()),
    ));
    Ok(())
}

/// Tick the machine through one busy phase. Returns false on Ctrl-C.
fn run_busy_phase(
    machine: &mut PhaseState,
    signals: &SignalHandler,
    ticks: u64,
    tick: Duration,
    description: &str,
) -> bool {
    let bar = ProgressBar::new(ticks);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:30.cyan}] {pos}/{len}")
            .expect("invalid template"),
    );
    bar.set_message(description.to_string());

    for _ in 0..ticks {
        if signals.is_shutdown_requested() {
            bar.abandon();
            machine.abort();
            return false;
        }
        thread::sleep(tick);
        machine.tick();
        bar.inc(1);
    }
    bar.finish_and_clear();
    true
}

fn banner_tone(phase: ExecutionPhase) -> Tone {
    match phase {
        ExecutionPhase::Done => Tone::Success,
        _ if phase.requires_action() => Tone::Warning,
        _ => Tone::Accent,
    }
}
