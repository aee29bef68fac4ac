//! Pure view derivations for the step screens.
//!
//! Everything in this module is a function of the lifecycle snapshot
//! `(kind, phase, outcome)` plus fixed demo numbers; nothing here is stored
//! or mutated by the views. The dashboard and the plain-CLI commands both
//! render from these shapes so the two outputs can never drift.

use crate::phase::{ExecutionPhase, Outcome, PhaseState};

/// Semantic color bucket; the render layer maps this to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Accent,
    Success,
    Danger,
    Warning,
}

/// One KPI tile in the strip above the step tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
    pub pulse: bool,
}

impl Kpi {
    fn new(label: &'static str, value: impl Into<String>, tone: Tone) -> Self {
        Self {
            label,
            value: value.into(),
            tone,
            pulse: false,
        }
    }

    fn pulsing(mut self) -> Self {
        self.pulse = true;
        self
    }
}

/// Phase-determined KPI strip. Stable order per phase.
pub fn kpi_strip(phase: ExecutionPhase, outcome: Option<Outcome>) -> Vec<Kpi> {
    match phase {
        ExecutionPhase::Discovery => Vec::new(),
        ExecutionPhase::Review => vec![
            Kpi::new("Discovered", "41", Tone::Neutral),
            Kpi::new("Selected", "38", Tone::Accent),
            Kpi::new("Excluded", "3", Tone::Danger),
        ],
        ExecutionPhase::Submission => vec![
            Kpi::new("Discovered", "41", Tone::Neutral),
            Kpi::new("Submitted", "0", Tone::Accent).pulsing(),
        ],
        ExecutionPhase::Execution | ExecutionPhase::Result | ExecutionPhase::Done => {
            let done = phase == ExecutionPhase::Done;
            let passed = done && outcome == Some(Outcome::Passed);
            let failed = outcome == Some(Outcome::Failed);
            let mut running = Kpi::new("Running", "1", Tone::Accent);
            if phase == ExecutionPhase::Execution {
                running = running.pulsing();
            }
            vec![
                Kpi::new("Discovered", "41", Tone::Neutral),
                Kpi::new("Submitted", "41", Tone::Neutral),
                Kpi::new("Completed", "10", Tone::Neutral),
                running,
                Kpi::new("Passed", if passed { "41" } else { "0" }, Tone::Success),
                Kpi::new("Failed", if failed { "41" } else { "10" }, Tone::Danger),
                Kpi::new("Pending", if done { "0" } else { "30" }, Tone::Neutral),
                Kpi::new("Pass Rate", if passed { "100%" } else { "0%" }, Tone::Success),
            ]
        }
    }
}

/// Badge tone for the step summary card.
pub fn summary_tone(phase: ExecutionPhase, outcome: Option<Outcome>) -> Tone {
    match phase {
        ExecutionPhase::Done => match outcome {
            Some(Outcome::Failed) => Tone::Danger,
            _ => Tone::Success,
        },
        ExecutionPhase::Execution | ExecutionPhase::Submission | ExecutionPhase::Result => {
            Tone::Accent
        }
        _ => Tone::Neutral,
    }
}

/// Position of one lifecycle dot relative to the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Past,
    Current,
    Future,
}

/// One marker per phase, past/current/future relative to `phase`.
pub fn lifecycle_dots(phase: ExecutionPhase) -> Vec<DotState> {
    let current = phase.progress_index();
    ExecutionPhase::all()
        .iter()
        .map(|p| {
            let idx = p.progress_index();
            if idx < current {
                DotState::Past
            } else if idx == current {
                DotState::Current
            } else {
                DotState::Future
            }
        })
        .collect()
}

/// Display status of one synthetic testline row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestlineStatus {
    Passed,
    Failed,
    Running,
    Pending,
}

impl TestlineStatus {
    pub fn label(self) -> &'static str {
        match self {
            TestlineStatus::Passed => "PASSED",
            TestlineStatus::Failed => "FAILED",
            TestlineStatus::Running => "RUNNING",
            TestlineStatus::Pending => "PENDING",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            TestlineStatus::Passed => Tone::Success,
            TestlineStatus::Failed => Tone::Danger,
            TestlineStatus::Running => Tone::Accent,
            TestlineStatus::Pending => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestlineRow {
    pub name: String,
    pub status: TestlineStatus,
}

fn testline_status(index: usize, phase: ExecutionPhase, outcome: Option<Outcome>) -> TestlineStatus {
    if phase == ExecutionPhase::Done {
        return match outcome {
            Some(Outcome::Failed) => TestlineStatus::Failed,
            _ => TestlineStatus::Passed,
        };
    }
    if phase == ExecutionPhase::Review {
        return TestlineStatus::Pending;
    }
    match index % 4 {
        0 => TestlineStatus::Passed,
        1 => TestlineStatus::Failed,
        2 => TestlineStatus::Running,
        _ => TestlineStatus::Pending,
    }
}

/// Synthetic testline table rows.
pub fn testline_rows(phase: ExecutionPhase, outcome: Option<Outcome>, count: usize) -> Vec<TestlineRow> {
    (0..count)
        .map(|i| TestlineRow {
            name: format!("GNR_CI_Prod_Cycle_{}", 1024 + i),
            status: testline_status(i, phase, outcome),
        })
        .collect()
}

/// Heat-map cells: same derivation as the table, tones only.
pub fn heatmap_cells(phase: ExecutionPhase, outcome: Option<Outcome>, count: usize) -> Vec<Tone> {
    (0..count)
        .map(|i| testline_status(i, phase, outcome).tone())
        .collect()
}

/// Format accumulated seconds as `18d 04h 21m 45s`, dropping zero leading
/// units.
pub fn format_elapsed(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m {seconds:02}s")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

/// Demo execution-progress percentage.
///
/// Advances by one point per tick while the phase is busy: clamped at 99
/// during `Execution` (the run never quite finishes on its own) and wrapping
/// to zero in the other busy phases. Re-seeded from a cycle counter so each
/// cycle starts somewhere fresh but renders stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockProgress {
    percent: u8,
}

impl MockProgress {
    pub fn new() -> Self {
        Self { percent: 45 }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// One ticker interval elapsed in `phase`.
    pub fn tick(&mut self, phase: ExecutionPhase) {
        if !phase.is_busy() {
            return;
        }
        if self.percent < 99 {
            self.percent += 1;
        } else if phase != ExecutionPhase::Execution {
            self.percent = 0;
        }
    }

    /// Re-seed below 40% when the user cycles the phase.
    pub fn reseed(&mut self, cycle: u32) {
        self.percent = ((cycle.wrapping_mul(31).wrapping_add(17)) % 40) as u8;
    }
}

impl Default for MockProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of the step state for one-line CLI output.
pub fn step_status_line(state: &PhaseState) -> String {
    let info = state.current_info();
    format!(
        "{} [{}] elapsed {}",
        info.label,
        state.summary_label(),
        format_elapsed(state.elapsed_seconds()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::StepKind;

    #[test]
    fn test_kpi_strip_empty_during_discovery() {
        assert!(kpi_strip(ExecutionPhase::Discovery, None).is_empty());
    }

    #[test]
    fn test_kpi_strip_review_triples() {
        let strip = kpi_strip(ExecutionPhase::Review, None);
        let labels: Vec<_> = strip.iter().map(|k| k.label).collect();
        assert_eq!(labels, ["Discovered", "Selected", "Excluded"]);
        assert!(strip.iter().all(|k| !k.pulse));
    }

    #[test]
    fn test_kpi_strip_submission_pulses() {
        let strip = kpi_strip(ExecutionPhase::Submission, None);
        assert_eq!(strip.len(), 2);
        assert_eq!(strip[1].label, "Submitted");
        assert!(strip[1].pulse);
    }

    #[test]
    fn test_kpi_strip_execution_full_set() {
        let strip = kpi_strip(ExecutionPhase::Execution, None);
        let labels: Vec<_> = strip.iter().map(|k| k.label).collect();
        assert_eq!(
            labels,
            [
                "Discovered",
                "Submitted",
                "Completed",
                "Running",
                "Passed",
                "Failed",
                "Pending",
                "Pass Rate"
            ]
        );
        let running = &strip[3];
        assert!(running.pulse, "Running pulses during Execution");
    }

    #[test]
    fn test_kpi_strip_done_reflects_outcome() {
        let passed = kpi_strip(ExecutionPhase::Done, Some(Outcome::Passed));
        assert_eq!(passed[4].value, "41"); // Passed
        assert_eq!(passed[6].value, "0"); // Pending
        assert_eq!(passed[7].value, "100%"); // Pass Rate

        let failed = kpi_strip(ExecutionPhase::Done, Some(Outcome::Failed));
        assert_eq!(failed[4].value, "0");
        assert_eq!(failed[5].value, "41");
        assert_eq!(failed[7].value, "0%");
    }

    #[test]
    fn test_kpi_strip_stable_between_calls() {
        let a = kpi_strip(ExecutionPhase::Result, Some(Outcome::Failed));
        let b = kpi_strip(ExecutionPhase::Result, Some(Outcome::Failed));
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_tone() {
        assert_eq!(summary_tone(ExecutionPhase::Discovery, None), Tone::Neutral);
        assert_eq!(summary_tone(ExecutionPhase::Execution, None), Tone::Accent);
        assert_eq!(
            summary_tone(ExecutionPhase::Done, Some(Outcome::Passed)),
            Tone::Success
        );
        assert_eq!(
            summary_tone(ExecutionPhase::Done, Some(Outcome::Failed)),
            Tone::Danger
        );
    }

    #[test]
    fn test_lifecycle_dots_partition() {
        let dots = lifecycle_dots(ExecutionPhase::Execution);
        assert_eq!(dots.len(), ExecutionPhase::all().len());
        assert_eq!(
            dots,
            [
                DotState::Past,
                DotState::Past,
                DotState::Past,
                DotState::Current,
                DotState::Future,
                DotState::Future,
            ]
        );
    }

    #[test]
    fn test_testline_rows_review_all_pending() {
        let rows = testline_rows(ExecutionPhase::Review, None, 8);
        assert!(rows.iter().all(|r| r.status == TestlineStatus::Pending));
        assert_eq!(rows[0].name, "GNR_CI_Prod_Cycle_1024");
    }

    #[test]
    fn test_testline_rows_done_collapse_to_outcome() {
        let rows = testline_rows(ExecutionPhase::Done, Some(Outcome::Failed), 5);
        assert!(rows.iter().all(|r| r.status == TestlineStatus::Failed));
    }

    #[test]
    fn test_testline_rows_cycle_during_execution() {
        let rows = testline_rows(ExecutionPhase::Execution, None, 4);
        assert_eq!(rows[0].status, TestlineStatus::Passed);
        assert_eq!(rows[1].status, TestlineStatus::Failed);
        assert_eq!(rows[2].status, TestlineStatus::Running);
        assert_eq!(rows[3].status, TestlineStatus::Pending);
    }

    #[test]
    fn test_heatmap_matches_table_derivation() {
        let rows = testline_rows(ExecutionPhase::Execution, None, 41);
        let cells = heatmap_cells(ExecutionPhase::Execution, None, 41);
        assert_eq!(cells.len(), 41);
        for (row, cell) in rows.iter().zip(&cells) {
            assert_eq!(row.status.tone(), *cell);
        }
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0s");
        assert_eq!(format_elapsed(59), "59s");
        assert_eq!(format_elapsed(65), "1m 05s");
        assert_eq!(format_elapsed(3_661), "1h 01m 01s");
        assert_eq!(format_elapsed(1_570_905), "18d 04h 21m 45s");
    }

    #[test]
    fn test_mock_progress_caps_at_99_during_execution() {
        let mut progress = MockProgress::new();
        for _ in 0..200 {
            progress.tick(ExecutionPhase::Execution);
        }
        assert_eq!(progress.percent(), 99);
    }

    #[test]
    fn test_mock_progress_wraps_in_other_busy_phases() {
        let mut progress = MockProgress::new();
        for _ in 0..54 {
            progress.tick(ExecutionPhase::Submission);
        }
        assert_eq!(progress.percent(), 99);
        progress.tick(ExecutionPhase::Submission);
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn test_mock_progress_frozen_when_not_busy() {
        let mut progress = MockProgress::new();
        progress.tick(ExecutionPhase::Done);
        progress.tick(ExecutionPhase::Result);
        assert_eq!(progress.percent(), 45);
    }

    #[test]
    fn test_mock_progress_reseed_below_40() {
        let mut progress = MockProgress::new();
        for cycle in 0..100 {
            progress.reseed(cycle);
            assert!(progress.percent() < 40, "cycle {cycle}");
        }
    }

    #[test]
    fn test_step_status_line() {
        let state = PhaseState::new(StepKind::Test);
        let line = step_status_line(&state);
        assert!(line.contains("Execution"));
        assert!(line.contains("In progress"));
    }
}
