/// Position of the current question, always within `[0, last]`.
///
/// Stepping past either end is a no-op, so no caller can move the index
/// outside the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionIndex {
    current: usize,
    last: usize,
}

impl QuestionIndex {
    /// Create an index at the first of `len` questions.
    ///
    /// Returns `None` for an empty list, which has no valid index.
    pub fn new(len: usize) -> Option<Self> {
        let last = len.checked_sub(1)?;
        Some(Self { current: 0, last })
    }

    pub fn get(&self) -> usize {
        self.current
    }

    pub fn last(&self) -> usize {
        self.last
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last
    }

    /// Move one question back. Returns `false` if already at the first question.
    pub fn step_back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move one question forward. Returns `false` if already at the last question.
    pub fn step_forward(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Return to the first question.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_index() {
        assert_eq!(QuestionIndex::new(0), None);
    }

    #[test]
    fn single_question_is_first_and_last() {
        let mut index = QuestionIndex::new(1).unwrap();
        assert!(index.is_first());
        assert!(index.is_last());
        assert!(!index.step_forward());
        assert!(!index.step_back());
        assert_eq!(index.get(), 0);
    }

    #[test]
    fn steps_clamp_at_both_ends() {
        let mut index = QuestionIndex::new(3).unwrap();
        assert!(!index.step_back());
        assert!(index.step_forward());
        assert!(index.step_forward());
        assert!(!index.step_forward());
        assert_eq!(index.get(), 2);
    }

    #[test]
    fn back_then_forward_restores_position() {
        let mut index = QuestionIndex::new(5).unwrap();
        for _ in 0..3 {
            index.step_forward();
        }
        index.step_back();
        index.step_forward();
        assert_eq!(index.get(), 3);
    }

    #[test]
    fn reset_returns_to_first() {
        let mut index = QuestionIndex::new(5).unwrap();
        while index.step_forward() {}
        assert_eq!(index.get(), index.last());
        index.reset();
        assert!(index.is_first());
    }
}
