//! Navigation context and per-context tab history.
//!
//! Each context (global, personal, a concrete project, or the project
//! browser) remembers its own last-active tab; switching contexts restores
//! the remembered tab exactly. Keys are a structured enum rather than
//! assembled strings, so a project id can never collide with a reserved
//! context name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which top-level context the sidebar points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Global,
    Personal,
    Project,
}

/// Structured tab-history key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    Global,
    Personal,
    Project(String),
    /// Project context with no project selected yet.
    ProjectBrowser,
}

impl ContextKey {
    /// Default tab when a context is first visited.
    pub fn default_tab(&self) -> &'static str {
        match self {
            ContextKey::Global => "Project Explorer",
            ContextKey::Personal => "Dashboard",
            ContextKey::Project(_) | ContextKey::ProjectBrowser => "Dashboard",
        }
    }
}

/// Last-viewed position inside one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    pub active_tab: String,
    pub scroll_position: u16,
}

impl TabState {
    fn initial(key: &ContextKey) -> Self {
        Self {
            active_tab: key.default_tab().to_string(),
            scroll_position: 0,
        }
    }
}

/// Per-context tab memory.
#[derive(Debug, Clone, Default)]
pub struct TabHistory {
    entries: HashMap<ContextKey, TabState>,
}

impl TabHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key`, lazily initialized with the context default.
    /// Other entries are never touched.
    pub fn entry(&mut self, key: &ContextKey) -> &mut TabState {
        self.entries
            .entry(key.clone())
            .or_insert_with(|| TabState::initial(key))
    }

    pub fn get(&self, key: &ContextKey) -> Option<&TabState> {
        self.entries.get(key)
    }

    pub fn set_active_tab(&mut self, key: &ContextKey, tab: impl Into<String>) {
        self.entry(key).active_tab = tab.into();
    }

    /// Active tab for `key`, falling back to the context default when the
    /// context has not been visited yet.
    ///
    /// The returned slice borrows from the history, never from `key`, so a
    /// temporary key works.
    pub fn active_tab<'a>(&'a self, key: &ContextKey) -> &'a str {
        self.entries
            .get(key)
            .map(|state| state.active_tab.as_str())
            .unwrap_or_else(|| key.default_tab())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Top-level navigation state of the dashboard.
#[derive(Debug, Clone)]
pub struct NavigationState {
    active_context: ContextKind,
    active_project_id: Option<String>,
    sidebar_expanded: bool,
    history: TabHistory,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            active_context: ContextKind::Project,
            active_project_id: None,
            sidebar_expanded: true,
            history: TabHistory::new(),
        }
    }

    pub fn active_context(&self) -> ContextKind {
        self.active_context
    }

    pub fn active_project_id(&self) -> Option<&str> {
        self.active_project_id.as_deref()
    }

    pub fn sidebar_expanded(&self) -> bool {
        self.sidebar_expanded
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_expanded = !self.sidebar_expanded;
    }

    /// History key for the current context.
    pub fn current_key(&self) -> ContextKey {
        match self.active_context {
            ContextKind::Global => ContextKey::Global,
            ContextKind::Personal => ContextKey::Personal,
            ContextKind::Project => match &self.active_project_id {
                Some(id) => ContextKey::Project(id.clone()),
                None => ContextKey::ProjectBrowser,
            },
        }
    }

    /// Active tab of the current context.
    pub fn active_tab(&self) -> &str {
        self.history.active_tab(&self.current_key())
    }

    pub fn set_context(&mut self, kind: ContextKind) {
        self.active_context = kind;
        let key = self.current_key();
        self.history.entry(&key);
    }

    /// Remember `tab` as the current context's active tab.
    pub fn set_active_tab(&mut self, tab: impl Into<String>) {
        let key = self.current_key();
        self.history.set_active_tab(&key, tab);
    }

    /// Select a project, initializing its tab history entry on first visit
    /// and leaving every other entry untouched.
    pub fn select_project(&mut self, project_id: impl Into<String>) {
        self.active_context = ContextKind::Project;
        self.active_project_id = Some(project_id.into());
        let key = self.current_key();
        self.history.entry(&key);
    }

    pub fn deselect_project(&mut self) {
        self.active_project_id = None;
    }

    pub fn history(&self) -> &TabHistory {
        &self.history
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
