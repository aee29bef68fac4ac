//! Dashboard application state and event loop.

use super::popover::{DismissRegistry, DismissScope};
use super::views::{next_context, next_tab, ContentView};
use crate::config::Config;
use crate::dataset::{Dataset, WorkflowStep};
use crate::error::{FwdashError, Result};
use crate::nav::NavigationState;
use crate::phase::{ExecutionPhase, Outcome, PhaseState};
use crate::ticker::ElapsedTicker;
use crate::viewmodel::MockProgress;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Collapsible regions of the step view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Settings,
    Table,
    Heatmap,
}

/// Independent collapsed flags, one per region.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionToggles {
    pub settings: bool,
    pub table: bool,
    pub heatmap: bool,
}

impl SectionToggles {
    pub fn toggle(&mut self, section: Section) {
        match section {
            Section::Settings => self.settings = !self.settings,
            Section::Table => self.table = !self.table,
            Section::Heatmap => self.heatmap = !self.heatmap,
        }
    }

    pub fn is_collapsed(&self, section: Section) -> bool {
        match section {
            Section::Settings => self.settings,
            Section::Table => self.table,
            Section::Heatmap => self.heatmap,
        }
    }
}

/// Everything mounted alongside an open step view.
///
/// Created when a step is selected, dropped when the user navigates away —
/// which is what releases the ticker schedule and any popover scope.
pub struct StepSession {
    pub(crate) step_id: String,
    pub(crate) step_name: String,
    pub(crate) machine: PhaseState,
    pub(crate) ticker: ElapsedTicker,
    pub(crate) progress: MockProgress,
    pub(crate) sections: SectionToggles,
    pub(crate) popover: Option<DismissScope>,
    pub(crate) reason_input: Option<String>,
    cycles: u32,
}

impl StepSession {
    fn mount(step: &WorkflowStep, config: &Config) -> Self {
        Self {
            step_id: step.id.clone(),
            step_name: step.name.clone(),
            machine: PhaseState::starting_at(step.kind, config.start_phase),
            ticker: ElapsedTicker::new(Duration::from_secs(config.tick_seconds)),
            progress: MockProgress::new(),
            sections: SectionToggles::default(),
            popover: None,
            reason_input: None,
            cycles: 0,
        }
    }

    pub fn machine(&self) -> &PhaseState {
        &self.machine
    }

    pub fn popover_open(&self) -> bool {
        self.popover.is_some()
    }
}

/// The dashboard application state.
pub struct DashboardApp {
    pub(crate) config: Config,
    pub(crate) data: Dataset,
    pub(crate) nav: NavigationState,
    pub(crate) project_cursor: usize,
    pub(crate) step_cursor: usize,
    pub(crate) session: Option<StepSession>,
    pub(crate) stages_collapsed: bool,
    dismiss_registry: DismissRegistry,
    should_quit: bool,
}

impl DashboardApp {
    pub fn new(config: Config, data: Dataset) -> Self {
        let mut nav = NavigationState::new();
        if !config.sidebar_expanded {
            nav.toggle_sidebar();
        }

        // Land on the workflow screen of the demo project, mirroring the
        // state an engineer cares about most.
        if let Some(project) = data.projects.get(2).or_else(|| data.projects.first()) {
            nav.select_project(project.id.clone());
            nav.set_active_tab("Quick Builds");
        }

        // Default to the in-progress test step when present.
        let step_cursor = data
            .steps()
            .position(|s| s.id == "step2")
            .unwrap_or(0);

        let mut app = Self {
            config,
            data,
            nav,
            project_cursor: 0,
            step_cursor,
            session: None,
            stages_collapsed: false,
            dismiss_registry: DismissRegistry::new(),
            should_quit: false,
        };
        app.sync_session();
        app
    }

    /// Focus a specific project at startup.
    pub fn with_project(mut self, query: &str) -> Result<Self> {
        let (id, index) = {
            let project = self.data.find_project(query)?;
            let id = project.id.clone();
            let index = self.data.projects.iter().position(|p| p.id == id);
            (id, index)
        };
        self.nav.select_project(id);
        self.nav.set_active_tab("Quick Builds");
        self.project_cursor = index.unwrap_or(0);
        self.sync_session();
        Ok(self)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn session(&self) -> Option<&StepSession> {
        self.session.as_ref()
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn dismiss_registry(&self) -> &DismissRegistry {
        &self.dismiss_registry
    }

    /// Content the main area currently shows.
    pub fn content_view(&self) -> ContentView {
        ContentView::resolve(self.nav.active_context(), self.nav.active_tab())
    }

    fn steps(&self) -> Vec<WorkflowStep> {
        self.data.steps().cloned().collect()
    }

    pub(crate) fn selected_step(&self) -> Option<WorkflowStep> {
        self.steps().get(self.step_cursor).cloned()
    }

    /// Mount or unmount the step session to match the visible content.
    ///
    /// Leaving the workflow screen discards the session entirely — the
    /// lifecycle state of a step is demo state, not persisted state.
    fn sync_session(&mut self) {
        if self.content_view() != ContentView::WorkflowRun {
            self.session = None;
            return;
        }
        let mounted = self.session.as_ref().map(|s| s.step_id.clone());
        let selected = self.selected_step();
        match (mounted, selected) {
            (_, None) => self.session = None,
            (Some(id), Some(step)) if id == step.id => {}
            (_, Some(step)) => self.session = Some(StepSession::mount(&step, &self.config)),
        }
    }

    /// Advance clocks. Called by the event loop every iteration.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session
                .ticker
                .sync(session.machine.current().is_busy(), now);
            let ticks = session.ticker.poll(now);
            for _ in 0..ticks {
                session.machine.tick();
                session.progress.tick(session.machine.current());
            }
        }
    }

    /// Route one key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        // Text entry for the resolution reason swallows everything.
        if let Some(session) = self.session.as_mut() {
            if session.reason_input.is_some() {
                Self::handle_reason_key(session, key);
                return;
            }
            // Any key with the popover open is an outside interaction:
            // dismiss and swallow.
            if session.popover.take().is_some() {
                return;
            }
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => {
                let kind = self.nav.active_context();
                let tab = next_tab(kind, self.nav.active_tab());
                self.nav.set_active_tab(tab);
                self.sync_session();
            }
            KeyCode::Char('x') => {
                self.nav.set_context(next_context(self.nav.active_context()));
                self.sync_session();
            }
            KeyCode::Char('b') => self.nav.toggle_sidebar(),
            _ => match self.content_view() {
                ContentView::Explorer => self.handle_explorer_key(key),
                ContentView::WorkflowRun => self.handle_workflow_key(key),
                _ => {}
            },
        }
    }

    fn handle_reason_key(session: &mut StepSession, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let reason = session.reason_input.take().unwrap_or_default();
                session.machine.set_resolution_reason(reason);
            }
            KeyCode::Esc => {
                session.reason_input = None;
            }
            KeyCode::Backspace => {
                if let Some(buffer) = session.reason_input.as_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = session.reason_input.as_mut() {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_explorer_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.project_cursor = self.project_cursor.saturating_sub(1),
            KeyCode::Down => {
                let max = self.data.projects.len().saturating_sub(1);
                if self.project_cursor < max {
                    self.project_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(project) = self.data.projects.get(self.project_cursor) {
                    self.nav.select_project(project.id.clone());
                    self.sync_session();
                }
            }
            _ => {}
        }
    }

    fn handle_workflow_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('w') => self.stages_collapsed = !self.stages_collapsed,
            KeyCode::Up => {
                if self.step_cursor > 0 {
                    self.step_cursor -= 1;
                    self.sync_session();
                }
            }
            KeyCode::Down => {
                let max = self.steps().len().saturating_sub(1);
                if self.step_cursor < max {
                    self.step_cursor += 1;
                    self.sync_session();
                }
            }
            _ => self.handle_step_key(key),
        }
    }

    fn handle_step_key(&mut self, key: KeyCode) {
        let registry = self.dismiss_registry.clone();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match key {
            KeyCode::Char('c') => {
                session.machine.advance();
                session.cycles += 1;
                session.progress.reseed(session.cycles);
            }
            KeyCode::Char('a') => session.machine.abort(),
            KeyCode::Char('s') => {
                // Submit: only valid from the review phase.
                if session.machine.current() == ExecutionPhase::Review {
                    session.machine.advance();
                }
            }
            KeyCode::Char('p') => session.machine.choose_outcome(Outcome::Passed),
            KeyCode::Char('f') => session.machine.choose_outcome(Outcome::Failed),
            KeyCode::Char('r') => {
                if session.machine.current() == ExecutionPhase::Result {
                    session.reason_input =
                        Some(session.machine.resolution_reason().to_string());
                }
            }
            KeyCode::Enter => session.machine.finalize(),
            KeyCode::Char('R') => session.machine.reset(),
            KeyCode::Char('l') => {
                // Opening replaces any previous scope; it can never stack.
                session.popover = Some(registry.acquire());
            }
            KeyCode::Char('1') => session.sections.toggle(Section::Settings),
            KeyCode::Char('2') => session.sections.toggle(Section::Table),
            KeyCode::Char('3') => session.sections.toggle(Section::Heatmap),
            _ => {}
        }
    }
}

type DashTerminal = Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> Result<DashTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut DashTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the dashboard event loop until the user quits.
pub fn run_dashboard(config: Config, data: Dataset, project: Option<&str>) -> Result<()> {
    // Restore the terminal even if a draw panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut app = DashboardApp::new(config, data);
    if let Some(query) = project {
        app = app.with_project(query)?;
    }

    let mut terminal = init_terminal()
        .map_err(|e| FwdashError::Terminal(format!("failed to initialize terminal: {e}")))?;

    let poll_duration = Duration::from_millis(100);
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        app.on_tick(Instant::now());

        if app.should_quit() {
            break;
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::StepKind;

    fn app() -> DashboardApp {
        DashboardApp::new(Config::default(), Dataset::mock())
    }

    #[test]
    fn test_startup_lands_on_workflow_with_test_step() {
        let app = app();
        assert_eq!(app.content_view(), ContentView::WorkflowRun);
        let session = app.session().expect("step session mounted");
        assert_eq!(session.step_id, "step2");
        assert_eq!(session.machine().kind(), StepKind::Test);
        assert_eq!(session.machine().current(), ExecutionPhase::Execution);
    }

    #[test]
    fn test_tab_away_unmounts_session() {
        let mut app = app();
        assert!(app.session().is_some());

        // Quick Builds -> Workflows keeps the session; -> Dashboard drops it.
        app.handle_key(KeyCode::Tab);
        assert!(app.session().is_some());
        app.handle_key(KeyCode::Tab);
        assert!(app.session().is_none());
    }

    #[test]
    fn test_step_navigation_remounts_session() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        let session = app.session().expect("session for next step");
        assert_eq!(session.step_id, "step3");

        app.handle_key(KeyCode::Up);
        assert_eq!(app.session().unwrap().step_id, "step2");
    }

    #[test]
    fn test_selecting_build_step_mounts_build_machine() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        let session = app.session().expect("session for build step");
        assert_eq!(session.step_id, "step1");
        assert_eq!(session.machine().kind(), StepKind::Build);
    }

    #[test]
    fn test_cycle_and_abort_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Result
        );

        // Abort does nothing at Result.
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Result
        );
    }

    #[test]
    fn test_abort_from_execution_returns_to_review() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Review
        );
    }

    #[test]
    fn test_submit_only_from_review() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Execution,
            "submit must not fire outside Review"
        );

        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Submission
        );
    }

    #[test]
    fn test_resolution_flow_through_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c')); // Execution -> Result
        app.handle_key(KeyCode::Char('f'));

        // Finalize without a reason: still at Result.
        app.handle_key(KeyCode::Enter);
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Result
        );

        // Type a reason and commit it.
        app.handle_key(KeyCode::Char('r'));
        for c in "root cause X".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(
            app.session().unwrap().machine().resolution_reason(),
            "root cause X"
        );

        app.handle_key(KeyCode::Enter);
        let machine = app.session().unwrap().machine();
        assert_eq!(machine.current(), ExecutionPhase::Done);
        assert_eq!(machine.outcome(), Some(Outcome::Failed));
    }

    #[test]
    fn test_reason_input_esc_cancels() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c'));
        app.handle_key(KeyCode::Char('r'));
        for c in "typo".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.session().unwrap().machine().resolution_reason(), "");
    }

    #[test]
    fn test_reset_key_after_done() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c')); // Result
        app.handle_key(KeyCode::Char('p'));
        app.handle_key(KeyCode::Char('r'));
        for c in "clean pass".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter); // commit reason
        app.handle_key(KeyCode::Enter); // finalize
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Done
        );

        // Cycling at Done is inert; reset re-arms.
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Done
        );
        app.handle_key(KeyCode::Char('R'));
        let machine = app.session().unwrap().machine();
        assert_eq!(machine.current(), ExecutionPhase::Execution);
        assert_eq!(machine.outcome(), None);
        assert_eq!(machine.elapsed_seconds(), 0);
    }

    #[test]
    fn test_popover_any_key_dismisses_and_is_swallowed() {
        let mut app = app();
        app.handle_key(KeyCode::Char('l'));
        assert!(app.session().unwrap().popover_open());
        assert_eq!(app.dismiss_registry().active(), 1);

        // Any interaction while open dismisses; the key does nothing else.
        app.handle_key(KeyCode::Char('c'));
        assert!(!app.session().unwrap().popover_open());
        assert_eq!(app.dismiss_registry().active(), 0);
        assert_eq!(
            app.session().unwrap().machine().current(),
            ExecutionPhase::Execution,
            "the dismissing key must not also cycle the machine"
        );
    }

    #[test]
    fn test_popover_never_stacks_across_toggles() {
        let mut app = app();
        // 'l' opens when closed and counts as an outside interaction when
        // open, so repeated presses toggle and can never stack scopes.
        for _ in 0..9 {
            app.handle_key(KeyCode::Char('l'));
            assert!(app.dismiss_registry().active() <= 1);
        }
        assert!(app.session().unwrap().popover_open());
        assert_eq!(app.dismiss_registry().active(), 1);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.dismiss_registry().active(), 0);
    }

    #[test]
    fn test_popover_scope_released_on_unmount() {
        let mut app = app();
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.dismiss_registry().active(), 1);

        // Dropping the session (navigation away) releases the scope with it.
        app.session = None;
        assert_eq!(app.dismiss_registry().active(), 0);
    }

    #[test]
    fn test_ticker_counts_only_while_busy() {
        let mut app = app();
        let t0 = Instant::now();
        app.on_tick(t0);
        app.on_tick(t0 + Duration::from_secs(3));
        assert_eq!(app.session().unwrap().machine().elapsed_seconds(), 3);

        // Move to Result: the counter freezes.
        app.handle_key(KeyCode::Char('c'));
        app.on_tick(t0 + Duration::from_secs(10));
        let frozen = app.session().unwrap().machine().elapsed_seconds();
        app.on_tick(t0 + Duration::from_secs(20));
        assert_eq!(app.session().unwrap().machine().elapsed_seconds(), frozen);
    }

    #[test]
    fn test_mount_unmount_cycles_leave_single_ticker() {
        let mut app = app();
        let t0 = Instant::now();
        app.on_tick(t0);

        // Bounce between steps; each remount replaces the session wholesale.
        for _ in 0..5 {
            app.handle_key(KeyCode::Down);
            app.handle_key(KeyCode::Up);
        }
        app.on_tick(t0 + Duration::from_secs(1));
        // A fresh mount starts from zero and one armed schedule: exactly one
        // second accrues, not one per stale ticker.
        app.on_tick(t0 + Duration::from_secs(2));
        assert!(app.session().unwrap().machine().elapsed_seconds() <= 2);
        assert!(app.session().unwrap().ticker.is_armed());
    }

    #[test]
    fn test_section_toggles_are_independent() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        let sections = app.session().unwrap().sections;
        assert!(!sections.is_collapsed(Section::Settings));
        assert!(sections.is_collapsed(Section::Table));
        assert!(!sections.is_collapsed(Section::Heatmap));
    }

    #[test]
    fn test_explorer_selection_restores_tab_history() {
        let mut app = app();
        // Project context cycles straight to the global explorer.
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.content_view(), ContentView::Explorer);

        // Select the first project; its default tab is Dashboard.
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.nav().active_tab(), "Dashboard");

        // Remember a different tab, leave, come back.
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.nav().active_tab(), "Quick Builds");
        app.handle_key(KeyCode::Char('x'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.nav().active_tab(), "Quick Builds");
    }

    #[test]
    fn test_with_project_focus() {
        let app = app().with_project("Lunar Lake-M").unwrap();
        assert_eq!(app.nav().active_project_id(), Some("p2"));
        assert!(app
            .with_project("missing")
            .is_err());
    }
}
