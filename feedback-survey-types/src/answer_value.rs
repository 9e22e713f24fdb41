use serde::{Deserialize, Serialize};

/// A single answer value collected from a survey.
///
/// Serialized untagged: a rating is a plain JSON number and a text answer is
/// a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// The chosen option of a rating question.
    Rating(i64),

    /// Free text typed for a text question.
    Text(String),
}

impl AnswerValue {
    /// Try to get this value as a rating.
    pub fn as_rating(&self) -> Option<i64> {
        match self {
            Self::Rating(r) => Some(*r),
            Self::Text(_) => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Rating(_) => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rating(_) => "Rating",
            Self::Text(_) => "Text",
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rating(r) => write!(f, "{r}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(i: i64) -> Self {
        Self::Rating(i)
    }
}

impl From<i32> for AnswerValue {
    fn from(i: i32) -> Self {
        Self::Rating(i64::from(i))
    }
}
