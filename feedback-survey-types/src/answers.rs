use serde::{Deserialize, Serialize};

use crate::{AnswerValue, QuestionId};

/// One recorded answer.
///
/// The JSON field names match the persisted progress format:
/// `{"questionId": 1, "answer": 5}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "questionId")]
    pub question_id: QuestionId,

    #[serde(rename = "answer")]
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: QuestionId, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id,
            value: value.into(),
        }
    }
}

/// How a new answer for an already answered question is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerPolicy {
    /// Always append. Revisiting a question and answering it again leaves
    /// both answers in the log.
    #[default]
    Append,

    /// Replace the earlier answer for the same question, keeping its position.
    Upsert,
}

/// Collected answers, in the order they were given.
///
/// Entries are only ever appended (or replaced whole under
/// [`AnswerPolicy::Upsert`]) and cleared wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    entries: Vec<Answer>,
}

impl Answers {
    /// Create a new empty answer log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an answer according to the given policy.
    pub fn record(&mut self, answer: Answer, policy: AnswerPolicy) {
        match policy {
            AnswerPolicy::Append => self.entries.push(answer),
            AnswerPolicy::Upsert => {
                match self
                    .entries
                    .iter_mut()
                    .find(|existing| existing.question_id == answer.question_id)
                {
                    Some(existing) => *existing = answer,
                    None => self.entries.push(answer),
                }
            }
        }
    }

    /// Remove every answer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The most recent answer given for a question.
    pub fn latest_for(&self, question_id: QuestionId) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .rev()
            .find(|answer| answer.question_id == question_id)
            .map(|answer| &answer.value)
    }

    /// Check whether a question has been answered at least once.
    pub fn contains(&self, question_id: QuestionId) -> bool {
        self.entries
            .iter()
            .any(|answer| answer.question_id == question_id)
    }

    /// Drop every answer given for a question.
    pub fn remove(&mut self, question_id: QuestionId) {
        self.entries.retain(|answer| answer.question_id != question_id);
    }

    /// Get an iterator over all answers, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.entries.iter()
    }

    /// Get the answers as a slice.
    pub fn as_slice(&self) -> &[Answer] {
        &self.entries
    }

    /// Get the number of recorded answers, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Answer>> for Answers {
    fn from(entries: Vec<Answer>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for Answers {
    type Item = Answer;
    type IntoIter = std::vec::IntoIter<Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
