pub mod commands;
pub mod completion;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod nav;
pub mod output;
pub mod phase;
pub mod signal;
pub mod ticker;
pub mod viewmodel;

pub use config::Config;
pub use dataset::Dataset;
pub use error::{FwdashError, Result};
pub use nav::{ContextKey, ContextKind, NavigationState, TabHistory};
pub use phase::{ExecutionPhase, Outcome, PhaseState, StepKind};
pub use ticker::ElapsedTicker;
