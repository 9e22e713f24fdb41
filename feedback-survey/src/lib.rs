//! # feedback-survey
//!
//! Run a fixed customer feedback survey. Frontend-agnostic.
//!
//! The [`SurveyRunner`] owns the whole survey lifecycle:
//! welcome, the question loop, confirmation, thank-you and the automatic
//! return to the welcome screen. Progress is mirrored to a [`KeyValueStore`]
//! after every change and restored when the runner is mounted.
//!
//! ## Usage
//!
//! ```rust
//! use feedback_survey::{AnswerValue, MemoryStore, Phase, RunnerConfig, SurveyRunner, catalog};
//!
//! let mut runner = SurveyRunner::mount(
//!     catalog::default_survey(),
//!     MemoryStore::new(),
//!     RunnerConfig::default(),
//! )?;
//!
//! runner.start()?;
//! runner.answer(AnswerValue::Rating(5))?;
//! assert_eq!(runner.current_index(), 1);
//! assert_eq!(runner.phase(), Phase::InProgress);
//! # Ok::<(), feedback_survey::RunnerError>(())
//! ```
//!
//! ## Frontends
//!
//! Frontends drive the runner through its operations and call
//! [`SurveyRunner::tick`] so that scheduled resets fire:
//! - `feedback-survey-ratatui` - terminal UI

// Re-export all types from feedback-survey-types
pub use feedback_survey_types::*;

pub mod catalog;

mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod error;
pub use error::{RunnerError, StoreError};

pub mod progress;

mod runner;
pub use runner::{Phase, RunnerConfig, Submission, SurveyRunner};

mod schedule;
pub use schedule::{PendingReset, ResetCause};

mod store;
pub use store::{FileStore, KeyValueStore, MemoryStore};
