//! Ratatui frontend for feedback-survey.
//!
//! ```rust,ignore
//! use feedback_survey::{FileStore, RunnerConfig, SurveyRunner, catalog};
//! use feedback_survey_ratatui::RatatuiFrontend;
//!
//! let store = FileStore::open("survey-store.json")?;
//! let mut runner = SurveyRunner::mount(catalog::default_survey(), store, RunnerConfig::default())?;
//! let submissions = RatatuiFrontend::new().with_title("Customer Survey").run(&mut runner)?;
//! ```

mod backend;
pub use backend::{RatatuiError, RatatuiFrontend, Theme};

mod input;
pub use input::{Control, UiState};

mod view;
pub use view::draw;
