//! Core types for the feedback-survey crate.
//!
//! This crate provides the foundational types for describing a survey:
//! - `SurveyDefinition` - The ordered question list plus welcome/thank-you texts
//! - `Question` and `QuestionKind` - Individual rating or free-text questions
//! - `Answer`, `AnswerValue` and `Answers` - Collected data, in the order it was given
//! - `QuestionIndex` - A cursor into the question list that cannot leave its bounds

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{Answer, AnswerPolicy, Answers};

mod question;
pub use question::{Question, QuestionId, QuestionKind};

mod question_index;
pub use question_index::QuestionIndex;

mod survey_definition;
pub use survey_definition::SurveyDefinition;

mod error;
pub use error::DefinitionError;
