//! Lifecycle model for a single workflow step.
//!
//! A workflow step (an IFWI quick build or a validation test run) moves
//! through a fixed sequence of phases. One machine serves both step kinds;
//! the user-facing labels and descriptions come from a per-kind phase table.

use serde::{Deserialize, Serialize};

/// Ordered lifecycle phases of a workflow step.
///
/// The declaration order is the progress order: earlier phases render as
/// completed markers, the current phase as the active marker, later phases
/// as pending markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionPhase {
    Discovery,
    Review,
    Submission,
    Execution,
    Result,
    Done,
}

impl ExecutionPhase {
    /// All phases in progress order.
    pub fn all() -> &'static [ExecutionPhase] {
        &[
            ExecutionPhase::Discovery,
            ExecutionPhase::Review,
            ExecutionPhase::Submission,
            ExecutionPhase::Execution,
            ExecutionPhase::Result,
            ExecutionPhase::Done,
        ]
    }

    /// Ordinal position in the progress order.
    pub fn progress_index(self) -> usize {
        self as usize
    }

    /// The phase after this one, or `None` at the end of the sequence.
    pub fn next(self) -> Option<ExecutionPhase> {
        ExecutionPhase::all().get(self.progress_index() + 1).copied()
    }

    /// Whether the elapsed-time ticker runs during this phase.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            ExecutionPhase::Discovery | ExecutionPhase::Submission | ExecutionPhase::Execution
        )
    }

    /// Whether this phase blocks on a human decision.
    pub fn requires_action(self) -> bool {
        matches!(self, ExecutionPhase::Review | ExecutionPhase::Result)
    }
}

/// Final pass/fail resolution of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Passed => "PASSED",
            Outcome::Failed => "FAILED",
        }
    }
}

/// The two step flavors sharing the lifecycle machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Build,
    Test,
}

/// User-facing text for one phase of one step kind.
#[derive(Debug, Clone, Copy)]
pub struct PhaseInfo {
    pub label: &'static str,
    pub description: &'static str,
}

static BUILD_PHASES: [PhaseInfo; 6] = [
    PhaseInfo {
        label: "Discovery",
        description: "Collecting ingredient manifests and build inputs.",
    },
    PhaseInfo {
        label: "Review",
        description: "Human confirmation of the image recipe and overrides.",
    },
    PhaseInfo {
        label: "Submission",
        description: "Dispatching the assembly job to the build pool.",
    },
    PhaseInfo {
        label: "Assembly",
        description: "Stitching ingredients into the IFWI image.",
    },
    PhaseInfo {
        label: "Result",
        description: "Inspecting artifacts and providing final pass/fail resolution.",
    },
    PhaseInfo {
        label: "Done",
        description: "Image published and artifacts archived.",
    },
];

static TEST_PHASES: [PhaseInfo; 6] = [
    PhaseInfo {
        label: "Discovery",
        description: "Scanning environment and gathering test artifacts.",
    },
    PhaseInfo {
        label: "Review",
        description: "Human confirmation of the test suite configuration.",
    },
    PhaseInfo {
        label: "Submission",
        description: "Dispatching payloads to the NGA orchestrator.",
    },
    PhaseInfo {
        label: "Execution",
        description: "Tests are live and running on physical silicon.",
    },
    PhaseInfo {
        label: "Result",
        description: "Analyzing logs and providing final pass/fail resolution.",
    },
    PhaseInfo {
        label: "Done",
        description: "Step successfully completed and artifacts archived.",
    },
];

impl StepKind {
    /// Label and description table lookup for a phase.
    pub fn phase_info(self, phase: ExecutionPhase) -> &'static PhaseInfo {
        let table = match self {
            StepKind::Build => &BUILD_PHASES,
            StepKind::Test => &TEST_PHASES,
        };
        &table[phase.progress_index()]
    }
}

/// Live lifecycle state of one selected workflow step.
///
/// Created when a step is opened in the dashboard and discarded when the
/// user navigates away; nothing here is persisted. Every mutation goes
/// through one of the transition methods below, and each method is a no-op
/// when its precondition does not hold — the UI disables the corresponding
/// control rather than surfacing an error.
///
/// Invariant: `outcome` is set exactly while the step sits at `Done`, or at
/// `Result` after the user has chosen a resolution.
#[derive(Debug, Clone)]
pub struct PhaseState {
    kind: StepKind,
    current: ExecutionPhase,
    outcome: Option<Outcome>,
    elapsed_seconds: u64,
    resolution_reason: String,
}

impl PhaseState {
    /// New machine for a freshly selected step.
    ///
    /// Starts at `Execution` so the most interesting view permutation is
    /// visible immediately.
    pub fn new(kind: StepKind) -> Self {
        Self::starting_at(kind, ExecutionPhase::Execution)
    }

    /// New machine starting at a specific phase.
    pub fn starting_at(kind: StepKind, phase: ExecutionPhase) -> Self {
        let mut state = Self {
            kind,
            current: phase,
            outcome: None,
            elapsed_seconds: 0,
            resolution_reason: String::new(),
        };
        state.repair_outcome();
        state
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn current(&self) -> ExecutionPhase {
        self.current
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn resolution_reason(&self) -> &str {
        &self.resolution_reason
    }

    /// Phase table entry for the current phase.
    pub fn current_info(&self) -> &'static PhaseInfo {
        self.kind.phase_info(self.current)
    }

    /// Move to the next phase. `Done` is terminal: call [`reset`] to re-arm.
    ///
    /// Landing on `Done` without a chosen outcome records `Passed`.
    ///
    /// [`reset`]: PhaseState::reset
    pub fn advance(&mut self) {
        if let Some(next) = self.current.next() {
            self.current = next;
            if next == ExecutionPhase::Done {
                self.outcome.get_or_insert(Outcome::Passed);
            }
        }
    }

    /// Whether [`abort`](PhaseState::abort) currently has an effect.
    pub fn can_abort(&self) -> bool {
        matches!(
            self.current,
            ExecutionPhase::Execution | ExecutionPhase::Submission
        )
    }

    /// Pull a dispatched or running step back to `Review`.
    pub fn abort(&mut self) {
        if self.can_abort() {
            self.current = ExecutionPhase::Review;
            self.repair_outcome();
        }
    }

    /// Set the phase directly (lifecycle-inspector control).
    ///
    /// Repairs the outcome invariant: landing on `Done` defaults the outcome,
    /// landing below `Result` clears it.
    pub fn jump_to(&mut self, phase: ExecutionPhase) {
        self.current = phase;
        self.repair_outcome();
    }

    /// Record the user's pass/fail choice. Only meaningful at `Result`.
    pub fn choose_outcome(&mut self, outcome: Outcome) {
        if self.current == ExecutionPhase::Result {
            self.outcome = Some(outcome);
        }
    }

    /// Replace the free-text triage justification.
    pub fn set_resolution_reason(&mut self, reason: impl Into<String>) {
        self.resolution_reason = reason.into();
    }

    /// Whether [`finalize`](PhaseState::finalize) currently has an effect.
    pub fn can_finalize(&self) -> bool {
        self.current == ExecutionPhase::Result
            && self.outcome.is_some()
            && !self.resolution_reason.trim().is_empty()
    }

    /// Close out the step: `Result` with a chosen outcome and a non-blank
    /// justification moves to `Done`. No-op otherwise.
    pub fn finalize(&mut self) {
        if self.can_finalize() {
            self.current = ExecutionPhase::Done;
        }
    }

    /// Whether [`reset`](PhaseState::reset) currently has an effect.
    pub fn can_reset(&self) -> bool {
        self.current == ExecutionPhase::Done
    }

    /// Re-arm a finished step back to `Execution`, clearing the outcome,
    /// the justification and the elapsed counter.
    pub fn reset(&mut self) {
        if self.can_reset() {
            self.current = ExecutionPhase::Execution;
            self.outcome = None;
            self.elapsed_seconds = 0;
            self.resolution_reason.clear();
        }
    }

    /// One ticker interval elapsed. Counts only while the phase is busy.
    pub fn tick(&mut self) {
        if self.current.is_busy() {
            self.elapsed_seconds += 1;
        }
    }

    /// Badge text for the step summary card.
    pub fn summary_label(&self) -> &'static str {
        match (self.current, self.outcome) {
            (ExecutionPhase::Done, Some(outcome)) => outcome.label(),
            _ => "In progress",
        }
    }

    fn repair_outcome(&mut self) {
        match self.current {
            ExecutionPhase::Done => {
                self.outcome.get_or_insert(Outcome::Passed);
            }
            ExecutionPhase::Result => {}
            _ => self.outcome = None,
        }
    }
}
