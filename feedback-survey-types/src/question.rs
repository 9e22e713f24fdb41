use crate::AnswerValue;

/// Identifier of a question, unique within a survey.
pub type QuestionId = u32;

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Unique id, also the key answers are stored under.
    id: QuestionId,

    /// The prompt text shown to the user.
    text: String,

    /// The kind of question (determines how it is answered).
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(id: QuestionId, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
        }
    }

    /// Create a rating question offering the given options, in order.
    pub fn rating(
        id: QuestionId,
        text: impl Into<String>,
        options: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self::new(id, text, QuestionKind::rating(options))
    }

    /// Create a free-text question.
    pub fn text(id: QuestionId, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::Text)
    }

    /// Get the question id.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get the selectable options of a rating question.
    ///
    /// Text questions have none.
    pub fn options(&self) -> &[i64] {
        match &self.kind {
            QuestionKind::Rating { options } => options.as_slice(),
            QuestionKind::Text => &[],
        }
    }

    pub fn is_rating(&self) -> bool {
        matches!(self.kind, QuestionKind::Rating { .. })
    }

    pub fn is_text(&self) -> bool {
        self.kind == QuestionKind::Text
    }

    /// Check whether a value has the shape this question expects.
    ///
    /// Only the variant is checked. A rating outside the declared options is
    /// still accepted, the frontend only ever offers declared options.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        matches!(
            (&self.kind, value),
            (QuestionKind::Rating { .. }, AnswerValue::Rating(_))
                | (QuestionKind::Text, AnswerValue::Text(_))
        )
    }
}

/// The kind of question, determining how it is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Pick one of a small, ordered set of integers.
    Rating { options: Vec<i64> },

    /// Free-form text.
    Text,
}

impl QuestionKind {
    /// Create a rating kind from any sequence of options.
    pub fn rating(options: impl IntoIterator<Item = i64>) -> Self {
        Self::Rating {
            options: options.into_iter().collect(),
        }
    }

    /// Short lowercase name, used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rating { .. } => "rating",
            Self::Text => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_question_exposes_options_in_order() {
        let question = Question::rating(4, "Recommend us?", 1..=10);
        assert!(question.is_rating());
        assert_eq!(question.options().len(), 10);
        assert_eq!(question.options().first(), Some(&1));
        assert_eq!(question.options().last(), Some(&10));
    }

    #[test]
    fn text_question_has_no_options() {
        let question = Question::text(5, "Improvements?");
        assert!(question.is_text());
        assert!(question.options().is_empty());
        assert_eq!(question.kind().name(), "text");
    }

    #[test]
    fn accepts_checks_value_shape_only() {
        let rating = Question::rating(1, "Satisfied?", 1..=5);
        assert!(rating.accepts(&AnswerValue::Rating(3)));
        assert!(rating.accepts(&AnswerValue::Rating(42)));
        assert!(!rating.accepts(&AnswerValue::Text("3".into())));

        let text = Question::text(2, "Anything else?");
        assert!(text.accepts(&AnswerValue::Text(String::new())));
        assert!(!text.accepts(&AnswerValue::Rating(1)));
    }
}
