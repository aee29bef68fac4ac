//! View definitions for the dashboard.
//!
//! The visible content is a function of the navigation snapshot: the active
//! context kind and that context's remembered tab resolve to one of a small
//! set of content views.

use crate::nav::ContextKind;
use crate::viewmodel::Tone;
use ratatui::style::Color;

/// Tabs available in each context, in cycle order.
pub fn tabs_for(kind: ContextKind) -> &'static [&'static str] {
    match kind {
        ContextKind::Global => &["Project Explorer", "Releases"],
        ContextKind::Personal => &["Dashboard"],
        ContextKind::Project => &["Dashboard", "Quick Builds", "Workflows"],
    }
}

/// The tab after `tab` in its context, wrapping.
pub fn next_tab(kind: ContextKind, tab: &str) -> &'static str {
    let tabs = tabs_for(kind);
    let idx = tabs.iter().position(|t| *t == tab).unwrap_or(0);
    tabs[(idx + 1) % tabs.len()]
}

/// The context after `kind`, cycling Global -> Personal -> Project.
pub fn next_context(kind: ContextKind) -> ContextKind {
    match kind {
        ContextKind::Global => ContextKind::Personal,
        ContextKind::Personal => ContextKind::Project,
        ContextKind::Project => ContextKind::Global,
    }
}

/// What the main area renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentView {
    /// Project list with selection (global context).
    Explorer,
    /// Personal workspace summary.
    PersonalDashboard,
    /// The workflow run screen with the step view.
    WorkflowRun,
    /// Unbuilt tab placeholder.
    Placeholder,
}

impl ContentView {
    /// Resolve the content for a context/tab pair.
    pub fn resolve(kind: ContextKind, tab: &str) -> ContentView {
        match (kind, tab) {
            (ContextKind::Global, "Project Explorer") => ContentView::Explorer,
            (ContextKind::Personal, "Dashboard") => ContentView::PersonalDashboard,
            (ContextKind::Project, "Quick Builds") | (ContextKind::Project, "Workflows") => {
                ContentView::WorkflowRun
            }
            _ => ContentView::Placeholder,
        }
    }
}

/// Terminal color for a semantic tone.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::DarkGray,
        Tone::Accent => Color::Cyan,
        Tone::Success => Color::Green,
        Tone::Danger => Color::Red,
        Tone::Warning => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_nonempty_per_context() {
        for kind in [
            ContextKind::Global,
            ContextKind::Personal,
            ContextKind::Project,
        ] {
            assert!(!tabs_for(kind).is_empty());
        }
    }

    #[test]
    fn test_next_tab_cycles() {
        assert_eq!(
            next_tab(ContextKind::Project, "Dashboard"),
            "Quick Builds"
        );
        assert_eq!(
            next_tab(ContextKind::Project, "Quick Builds"),
            "Workflows"
        );
        assert_eq!(next_tab(ContextKind::Project, "Workflows"), "Dashboard");
    }

    #[test]
    fn test_next_tab_unknown_tab_falls_back_to_start() {
        assert_eq!(next_tab(ContextKind::Global, "Nope"), "Releases");
    }

    #[test]
    fn test_next_context_cycles_all() {
        let mut kind = ContextKind::Global;
        let mut seen = vec![kind];
        for _ in 0..2 {
            kind = next_context(kind);
            seen.push(kind);
        }
        assert_eq!(
            seen,
            [
                ContextKind::Global,
                ContextKind::Personal,
                ContextKind::Project
            ]
        );
        assert_eq!(next_context(kind), ContextKind::Global);
    }

    #[test]
    fn test_content_resolution() {
        assert_eq!(
            ContentView::resolve(ContextKind::Global, "Project Explorer"),
            ContentView::Explorer
        );
        assert_eq!(
            ContentView::resolve(ContextKind::Project, "Quick Builds"),
            ContentView::WorkflowRun
        );
        assert_eq!(
            ContentView::resolve(ContextKind::Project, "Workflows"),
            ContentView::WorkflowRun
        );
        assert_eq!(
            ContentView::resolve(ContextKind::Project, "Dashboard"),
            ContentView::Placeholder
        );
        assert_eq!(
            ContentView::resolve(ContextKind::Global, "Releases"),
            ContentView::Placeholder
        );
    }
}
