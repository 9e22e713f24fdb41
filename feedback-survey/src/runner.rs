use std::time::Duration;

use crate::progress;
use crate::schedule::ResetSlot;
use crate::{
    Answer, AnswerPolicy, AnswerValue, Answers, Clock, DefinitionError, KeyValueStore,
    PendingReset, Question, QuestionId, QuestionIndex, ResetCause, RunnerError, SurveyDefinition,
    SystemClock,
};

/// Delay before the thank-you and come-back-later screens reset.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// Which screen the survey is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start prompt.
    Welcome,
    /// Answering questions.
    InProgress,
    /// The last question was answered or skipped; waiting for the user to submit.
    Confirming,
    /// Submitted; returns to `Welcome` once the reset fires.
    ThankYou,
    /// The store said the survey was already completed at mount.
    ComeBackLater,
}

impl Phase {
    /// Short lowercase name, used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::InProgress => "in progress",
            Self::Confirming => "confirming",
            Self::ThankYou => "thank you",
            Self::ComeBackLater => "come back later",
        }
    }
}

/// Runner settings.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Delay before the thank-you and come-back-later screens reset.
    pub reset_delay: Duration,

    /// How a repeated answer to the same question is recorded.
    pub answer_policy: AnswerPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            answer_policy: AnswerPolicy::Append,
        }
    }
}

impl RunnerConfig {
    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    pub fn with_answer_policy(mut self, answer_policy: AnswerPolicy) -> Self {
        self.answer_policy = answer_policy;
        self
    }
}

/// The answers handed over by a confirmed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Every recorded answer in order. Staged feedback text replaces the
    /// recorded answers to its question and comes last.
    pub answers: Vec<Answer>,
}

/// Text typed into a text question, not yet recorded as an answer.
#[derive(Debug, Clone)]
struct StagedFeedback {
    question_id: QuestionId,
    text: String,
}

/// Drives one survey from welcome to thank-you and back.
///
/// Every change to the answer log is written to the store as a full
/// overwrite. At most one reset is pending at any time; dropping the runner
/// drops it.
pub struct SurveyRunner<S, C = SystemClock> {
    definition: SurveyDefinition,
    store: S,
    clock: C,
    config: RunnerConfig,
    phase: Phase,
    index: QuestionIndex,
    answers: Answers,
    staged: Option<StagedFeedback>,
    reset: ResetSlot,
}

impl<S: KeyValueStore> SurveyRunner<S, SystemClock> {
    /// Mount a runner on the real clock.
    pub fn mount(
        definition: SurveyDefinition,
        store: S,
        config: RunnerConfig,
    ) -> Result<Self, RunnerError> {
        Self::mount_with_clock(definition, store, config, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> SurveyRunner<S, C> {
    /// Mount a runner: validate the definition, restore stored answers, and
    /// apply the stale-completion guard.
    pub fn mount_with_clock(
        definition: SurveyDefinition,
        store: S,
        config: RunnerConfig,
        clock: C,
    ) -> Result<Self, RunnerError> {
        definition.validate().inspect_err(|err| {
            tracing::error!(
                question_id = ?err.question_id(),
                error = %err,
                "invalid survey definition"
            );
        })?;
        let index = QuestionIndex::new(definition.len()).ok_or(DefinitionError::Empty)?;
        let answers = progress::load_answers(&store)?;
        let already_completed = progress::is_completed(&store)?;

        let mut runner = Self {
            definition,
            store,
            clock,
            config,
            phase: Phase::Welcome,
            index,
            answers,
            staged: None,
            reset: ResetSlot::default(),
        };

        if already_completed {
            tracing::info!("survey already completed, showing come-back-later screen");
            runner.phase = Phase::ComeBackLater;
            runner.schedule_reset(ResetCause::StaleCompletion);
        }

        tracing::info!(
            questions = runner.definition.len(),
            restored_answers = runner.answers.len(),
            "survey mounted"
        );
        Ok(runner)
    }

    /// Leave the welcome screen and show the current question.
    pub fn start(&mut self) -> Result<(), RunnerError> {
        self.require(Phase::Welcome, "start")?;
        self.phase = Phase::InProgress;
        tracing::info!(index = self.index.get(), "survey started");
        Ok(())
    }

    /// Record an answer for the current question, then advance.
    ///
    /// Rating values are not checked against the declared options; only the
    /// value's kind must match the question.
    pub fn answer(&mut self, value: AnswerValue) -> Result<(), RunnerError> {
        self.require(Phase::InProgress, "answer")?;
        let question_id = self.current_question().id();
        if !self.current_question().accepts(&value) {
            return Err(RunnerError::WrongKind {
                operation: "answer",
                question_id,
            });
        }

        let mut answers = self.answers.clone();
        answers.record(Answer::new(question_id, value), self.config.answer_policy);
        self.commit_answers(answers)?;
        tracing::debug!(question_id, "answer recorded");

        // An explicit answer supersedes text staged earlier for the same question.
        if self
            .staged
            .as_ref()
            .is_some_and(|staged| staged.question_id == question_id)
        {
            self.staged = None;
        }
        self.advance();
        Ok(())
    }

    /// Advance without recording anything.
    pub fn skip(&mut self) -> Result<(), RunnerError> {
        self.require(Phase::InProgress, "skip")?;
        tracing::debug!(question_id = self.current_question().id(), "question skipped");
        self.advance();
        Ok(())
    }

    /// Step back one question. Returns whether the index moved.
    ///
    /// From the confirmation prompt this also withdraws the prompt.
    pub fn go_previous(&mut self) -> Result<bool, RunnerError> {
        match self.phase {
            Phase::InProgress => {}
            Phase::Confirming => self.phase = Phase::InProgress,
            other => {
                return Err(RunnerError::WrongPhase {
                    operation: "go to the previous question",
                    phase: other.name(),
                });
            }
        }
        let moved = self.index.step_back();
        tracing::debug!(index = self.index.get(), moved, "previous question");
        Ok(moved)
    }

    /// Step forward one question without recording. Returns whether the index moved.
    pub fn go_next(&mut self) -> Result<bool, RunnerError> {
        self.require(Phase::InProgress, "go to the next question")?;
        let moved = self.index.step_forward();
        tracing::debug!(index = self.index.get(), moved, "next question");
        Ok(moved)
    }

    /// Stage text typed into the current text question.
    ///
    /// On the last question this brings up the confirmation prompt. The text
    /// is not appended to the answer log; it is included in the submission.
    pub fn type_feedback(&mut self, text: impl Into<String>) -> Result<(), RunnerError> {
        if !matches!(self.phase, Phase::InProgress | Phase::Confirming) {
            return Err(RunnerError::WrongPhase {
                operation: "type feedback",
                phase: self.phase.name(),
            });
        }
        let question_id = self.current_question().id();
        if !self.current_question().is_text() {
            return Err(RunnerError::WrongKind {
                operation: "type feedback",
                question_id,
            });
        }

        self.staged = Some(StagedFeedback {
            question_id,
            text: text.into(),
        });
        if self.phase == Phase::InProgress && self.index.is_last() {
            self.phase = Phase::Confirming;
        }
        Ok(())
    }

    /// Submit: clear the answer log, mark the survey completed in the store,
    /// show the thank-you screen and schedule the return to welcome.
    ///
    /// Staged feedback is what the user typed last, so it replaces any
    /// recorded answer to the same question. Staged text that was cleared
    /// back to empty withdraws that answer.
    ///
    /// Nothing changes in memory unless both store writes succeed.
    pub fn confirm_submit(&mut self) -> Result<Submission, RunnerError> {
        self.require(Phase::Confirming, "submit")?;

        let mut submitted = self.answers.clone();
        if let Some(staged) = &self.staged {
            submitted.remove(staged.question_id);
            if !staged.text.is_empty() {
                submitted.record(
                    Answer::new(staged.question_id, staged.text.clone()),
                    AnswerPolicy::Append,
                );
            }
        }

        progress::save_answers(&mut self.store, &Answers::new())?;
        progress::mark_completed(&mut self.store)?;

        self.answers.clear();
        self.staged = None;
        let answers: Vec<Answer> = submitted.into_iter().collect();

        self.index.reset();
        self.phase = Phase::ThankYou;
        self.schedule_reset(ResetCause::ThankYou);

        tracing::info!(answers = answers.len(), "survey submitted");
        Ok(Submission { answers })
    }

    /// Withdraw the confirmation prompt, go back to the first question and
    /// drop all answers. The completion marker in the store is left alone.
    pub fn restart(&mut self) -> Result<(), RunnerError> {
        self.commit_answers(Answers::new())?;
        if self.phase == Phase::Confirming {
            self.phase = Phase::InProgress;
        }
        self.index.reset();
        self.staged = None;
        tracing::info!(phase = self.phase.name(), "survey restarted");
        Ok(())
    }

    /// Fire the pending reset if its deadline has passed.
    ///
    /// Returns the cause of the reset that fired, if any.
    pub fn tick(&mut self) -> Result<Option<ResetCause>, RunnerError> {
        let Some(reset) = self.reset.take_due(self.clock.now()) else {
            return Ok(None);
        };

        match reset.cause() {
            ResetCause::ThankYou => {
                progress::clear_completed(&mut self.store)?;
                self.phase = Phase::Welcome;
            }
            ResetCause::StaleCompletion => {
                progress::clear_completed(&mut self.store)?;
                self.restart()?;
                self.phase = Phase::Welcome;
            }
        }
        tracing::info!(cause = ?reset.cause(), "survey reset to welcome");
        Ok(Some(reset.cause()))
    }

    /// Time until the pending reset fires, if one is pending.
    pub fn time_until_reset(&self) -> Option<Duration> {
        self.reset
            .pending()
            .map(|reset| reset.remaining(self.clock.now()))
    }

    pub fn pending_reset(&self) -> Option<&PendingReset> {
        self.reset.pending()
    }

    /// Drop the pending reset without firing it.
    pub fn cancel_reset(&mut self) -> Option<PendingReset> {
        self.reset.cancel()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn definition(&self) -> &SurveyDefinition {
        &self.definition
    }

    pub fn current_index(&self) -> usize {
        self.index.get()
    }

    pub fn current_question(&self) -> &Question {
        // `index` is built from the definition's length and never leaves its bounds.
        &self.definition.questions()[self.index.get()]
    }

    pub fn is_first(&self) -> bool {
        self.index.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.index.is_last()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Text staged for the current text question, empty if none.
    pub fn feedback_text(&self) -> &str {
        self.staged
            .as_ref()
            .filter(|staged| staged.question_id == self.current_question().id())
            .map_or("", |staged| staged.text.as_str())
    }

    pub fn show_welcome(&self) -> bool {
        self.phase == Phase::Welcome
    }

    pub fn survey_completed(&self) -> bool {
        self.phase == Phase::Confirming
    }

    pub fn show_thank_you(&self) -> bool {
        self.phase == Phase::ThankYou
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), RunnerError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(RunnerError::WrongPhase {
                operation,
                phase: self.phase.name(),
            })
        }
    }

    fn advance(&mut self) {
        if self.index.is_last() {
            self.phase = Phase::Confirming;
            tracing::debug!("last question reached, confirming");
        } else {
            self.index.step_forward();
        }
    }

    fn schedule_reset(&mut self, cause: ResetCause) {
        let reset = PendingReset::new(self.clock.now(), self.config.reset_delay, cause);
        self.reset.schedule(reset);
    }

    /// Write `answers` to the store, then adopt them. A failed write leaves
    /// the in-memory log as it was.
    fn commit_answers(&mut self, answers: Answers) -> Result<(), RunnerError> {
        progress::save_answers(&mut self.store, &answers)?;
        self.answers = answers;
        Ok(())
    }
}

impl<S, C> Drop for SurveyRunner<S, C> {
    fn drop(&mut self) {
        if let Some(reset) = self.reset.cancel() {
            tracing::debug!(cause = ?reset.cause(), "dropping pending reset");
        }
    }
}
