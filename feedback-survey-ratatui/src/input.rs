//! Keyboard handling: maps key presses to runner operations and keeps the
//! screen-local state (selected rating, text being typed) in step with the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use feedback_survey::{
    AnswerValue, Clock, KeyValueStore, Phase, QuestionKind, RunnerError, Submission, SurveyRunner,
};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Screen-local state that is not part of the survey itself.
#[derive(Debug, Default)]
pub struct UiState {
    /// Highlighted option of the current rating question.
    selected_option: usize,
    /// Text typed into the current text question.
    input: String,
    /// Cursor position in `input`, in chars.
    cursor_pos: usize,
    /// Screen and question index the state was last synced to.
    shown: Option<(Phase, usize)>,
    /// Submissions confirmed during this session.
    submissions: Vec<Submission>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the state for whatever the runner currently shows.
    pub fn for_runner<S: KeyValueStore, C: Clock>(runner: &SurveyRunner<S, C>) -> Self {
        let mut state = Self::new();
        state.sync(runner);
        state
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn take_submissions(&mut self) -> Vec<Submission> {
        std::mem::take(&mut self.submissions)
    }

    /// Re-seed the selection and text buffer when the runner moved to
    /// another screen or question.
    ///
    /// A revisited rating question highlights its latest answer; a text
    /// question shows the staged text, or else its latest answer.
    pub fn sync<S: KeyValueStore, C: Clock>(&mut self, runner: &SurveyRunner<S, C>) {
        let shown = (runner.phase(), runner.current_index());
        if self.shown == Some(shown) {
            return;
        }
        self.shown = Some(shown);

        let question = runner.current_question();
        let latest = runner.answers().latest_for(question.id());
        match question.kind() {
            QuestionKind::Rating { options } => {
                self.selected_option = latest
                    .and_then(AnswerValue::as_rating)
                    .and_then(|rating| options.iter().position(|option| *option == rating))
                    .unwrap_or(0);
                self.input.clear();
            }
            QuestionKind::Text => {
                self.selected_option = 0;
                self.input = if runner.feedback_text().is_empty() {
                    latest
                        .and_then(AnswerValue::as_text)
                        .unwrap_or_default()
                        .to_string()
                } else {
                    runner.feedback_text().to_string()
                };
            }
        }
        self.cursor_pos = self.input.chars().count();
    }

    /// Apply one key press to the runner.
    ///
    /// Keys that do not apply on the current screen are ignored. Only store
    /// failures are returned as errors.
    pub fn handle_key<S: KeyValueStore, C: Clock>(
        &mut self,
        runner: &mut SurveyRunner<S, C>,
        key: KeyEvent,
    ) -> Result<Control, RunnerError> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let outcome = match (key.code, ctrl) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), true) => return Ok(Control::Quit),
            (KeyCode::Char('r'), true) => runner.restart(),
            (KeyCode::Char('s'), true) => runner.skip(),
            (KeyCode::Tab, _) => runner.go_next().map(drop),
            (KeyCode::BackTab, _) => runner.go_previous().map(drop),
            (_, true) => Ok(()),
            _ => self.handle_screen_key(runner, key.code),
        };

        match outcome {
            Ok(()) => {}
            Err(err) if err.is_rejected() => tracing::debug!(error = %err, "key ignored"),
            Err(err) => return Err(err),
        }
        self.sync(runner);
        Ok(Control::Continue)
    }

    fn handle_screen_key<S: KeyValueStore, C: Clock>(
        &mut self,
        runner: &mut SurveyRunner<S, C>,
        code: KeyCode,
    ) -> Result<(), RunnerError> {
        match runner.phase() {
            Phase::Welcome => match code {
                KeyCode::Enter => runner.start(),
                _ => Ok(()),
            },
            Phase::ThankYou | Phase::ComeBackLater => Ok(()),
            Phase::InProgress | Phase::Confirming => {
                let question = runner.current_question().clone();
                let confirm = code == KeyCode::Enter
                    || (matches!(code, KeyCode::Char('y' | 'Y')) && !question.is_text());
                if runner.phase() == Phase::Confirming && confirm {
                    let submission = runner.confirm_submit()?;
                    self.submissions.push(submission);
                    self.shown = None;
                    return Ok(());
                }

                match question.kind() {
                    QuestionKind::Rating { options } => self.rating_key(runner, options, code),
                    QuestionKind::Text => self.text_key(runner, code),
                }
            }
        }
    }

    fn rating_key<S: KeyValueStore, C: Clock>(
        &mut self,
        runner: &mut SurveyRunner<S, C>,
        options: &[i64],
        code: KeyCode,
    ) -> Result<(), RunnerError> {
        match code {
            KeyCode::Left => {
                self.selected_option = self.selected_option.saturating_sub(1);
                Ok(())
            }
            KeyCode::Right => {
                if self.selected_option + 1 < options.len() {
                    self.selected_option += 1;
                }
                Ok(())
            }
            KeyCode::Enter => match options.get(self.selected_option) {
                Some(option) => runner.answer(AnswerValue::Rating(*option)),
                None => Ok(()),
            },
            // Digits pick an option directly; 0 stands for 10.
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let value = match c.to_digit(10) {
                    Some(0) => 10,
                    Some(d) => i64::from(d),
                    None => return Ok(()),
                };
                match options.iter().position(|option| *option == value) {
                    Some(position) => {
                        self.selected_option = position;
                        runner.answer(AnswerValue::Rating(value))
                    }
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    fn text_key<S: KeyValueStore, C: Clock>(
        &mut self,
        runner: &mut SurveyRunner<S, C>,
        code: KeyCode,
    ) -> Result<(), RunnerError> {
        match code {
            KeyCode::Char(c) => {
                let at = self.byte_offset(self.cursor_pos);
                self.input.insert(at, c);
                self.cursor_pos += 1;
                runner.type_feedback(self.input.clone())
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let at = self.byte_offset(self.cursor_pos);
                    self.input.remove(at);
                    runner.type_feedback(self.input.clone())?;
                }
                Ok(())
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.input.chars().count() {
                    let at = self.byte_offset(self.cursor_pos);
                    self.input.remove(at);
                    runner.type_feedback(self.input.clone())?;
                }
                Ok(())
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                Ok(())
            }
            KeyCode::Right => {
                if self.cursor_pos < self.input.chars().count() {
                    self.cursor_pos += 1;
                }
                Ok(())
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                Ok(())
            }
            KeyCode::End => {
                self.cursor_pos = self.input.chars().count();
                Ok(())
            }
            // Nothing typed is not an answer; Ctrl+S skips instead.
            KeyCode::Enter if self.input.is_empty() => Ok(()),
            KeyCode::Enter => runner.answer(AnswerValue::Text(self.input.clone())),
            _ => Ok(()),
        }
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map_or(self.input.len(), |(offset, _)| offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_survey::{ManualClock, MemoryStore, RunnerConfig, catalog};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn cursor_edits_respect_multibyte_chars() {
        let mut runner = SurveyRunner::mount_with_clock(
            catalog::default_survey(),
            MemoryStore::new(),
            RunnerConfig::default(),
            ManualClock::new(),
        )
        .unwrap();
        runner.start().unwrap();
        for _ in 0..4 {
            runner.skip().unwrap();
        }

        let mut ui = UiState::for_runner(&runner);
        for c in "héé".chars() {
            ui.handle_key(&mut runner, press(KeyCode::Char(c))).unwrap();
        }
        ui.handle_key(&mut runner, press(KeyCode::Left)).unwrap();
        ui.handle_key(&mut runner, press(KeyCode::Backspace)).unwrap();

        assert_eq!(ui.input(), "hé");
        assert_eq!(ui.cursor_pos(), 1);
        assert_eq!(runner.feedback_text(), "hé");
    }
}
