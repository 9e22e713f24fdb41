use std::collections::HashSet;

use crate::{DefinitionError, Question, QuestionId, QuestionKind};

/// The top-level structure containing all questions and screen texts for a survey.
///
/// A definition is built once and never changes while a survey runs.
#[derive(Debug, Clone, Default)]
pub struct SurveyDefinition {
    /// Optional message shown on the welcome screen.
    pub welcome: Option<String>,

    /// All questions in the survey, in the order they are asked.
    pub questions: Vec<Question>,

    /// Optional message shown after a submission.
    pub thank_you: Option<String>,
}

impl SurveyDefinition {
    /// Create a new survey definition with the given questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            welcome: None,
            questions,
            thank_you: None,
        }
    }

    /// Set the welcome message.
    pub fn with_welcome(mut self, welcome: impl Into<String>) -> Self {
        self.welcome = Some(welcome.into());
        self
    }

    /// Set the thank-you message.
    pub fn with_thank_you(mut self, thank_you: impl Into<String>) -> Self {
        self.thank_you = Some(thank_you.into());
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Find a question by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Check if the survey has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check the definition can be run: at least one question, unique ids,
    /// and every rating question offers at least one option.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.questions.is_empty() {
            return Err(DefinitionError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id()) {
                return Err(DefinitionError::DuplicateId(question.id()));
            }
            if let QuestionKind::Rating { options } = question.kind()
                && options.is_empty()
            {
                return Err(DefinitionError::NoOptions(question.id()));
            }
        }

        Ok(())
    }
}
