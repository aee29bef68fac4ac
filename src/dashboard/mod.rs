//! Dashboard TUI - the interactive workflow screen.
//!
//! Renders the mock firmware workflow run: a stages sidebar, a step view
//! driven by the lifecycle machine, and context tabs with per-context tab
//! memory. All mutations are keyboard-driven; a periodic tick feeds the
//! elapsed-time counter of the selected step.
//!
//! Keys:
//! - Tab: next tab in the current context, x: switch context
//! - Up/Down + Enter: navigate lists
//! - c: cycle state, a: abort, s: submit, p/f: resolve, r: reason, R: reset
//! - l: lifecycle popover, 1/2/3: collapse sections, w: stages sidebar
//! - q: quit

pub mod app;
pub mod popover;
pub mod step_view;
pub mod views;

pub use app::{run_dashboard, DashboardApp};
pub use popover::{DismissRegistry, DismissScope};
