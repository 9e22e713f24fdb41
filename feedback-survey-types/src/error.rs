use crate::QuestionId;

/// Error type for malformed survey definitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// A survey needs at least one question to have a valid index.
    #[error("Survey has no questions")]
    Empty,

    /// Two questions share the same id.
    #[error("Duplicate question id: {0}")]
    DuplicateId(QuestionId),

    /// A rating question offers nothing to pick.
    #[error("Rating question {0} has no options")]
    NoOptions(QuestionId),
}

impl DefinitionError {
    /// The id of the offending question, if the error is about a single question.
    pub fn question_id(&self) -> Option<QuestionId> {
        match self {
            Self::Empty => None,
            Self::DuplicateId(id) | Self::NoOptions(id) => Some(*id),
        }
    }
}
