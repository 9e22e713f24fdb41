//! Ratatui terminal frontend for `SurveyRunner`.
//!
//! Provides a terminal UI with a progress bar, rating buttons, a feedback
//! text box and keyboard navigation. The event loop wakes up in time for the
//! runner's pending reset, so the thank-you screen leaves on schedule even
//! without a key press.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use feedback_survey::{Clock, KeyValueStore, RunnerError, Submission, SurveyRunner};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use thiserror::Error;

use crate::{Control, UiState, draw};

/// How long to wait for input when no reset is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Error type for the Ratatui frontend.
#[derive(Debug, Error)]
pub enum RatatuiError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The runner failed to persist or restore progress.
    #[error("Survey error: {0}")]
    Runner(#[from] RunnerError),
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

/// Ratatui-based terminal frontend.
///
/// Presents one question at a time, with the confirmation, thank-you and
/// come-back-later screens in between runs. Runs until the user quits.
#[derive(Debug, Clone)]
pub struct RatatuiFrontend {
    /// Title shown at the top of every question screen.
    title: String,
    /// Color theme for the UI.
    theme: Theme,
}

impl Default for RatatuiFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiFrontend {
    /// Create a new frontend with default settings.
    pub fn new() -> Self {
        Self {
            title: "Survey".to_string(),
            theme: Theme::default(),
        }
    }

    /// Set the title shown at the top of the screen.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Run the survey until the user quits.
    ///
    /// Returns every submission confirmed during the session. The terminal
    /// is restored even if the loop fails.
    pub fn run<S: KeyValueStore, C: Clock>(
        &self,
        runner: &mut SurveyRunner<S, C>,
    ) -> Result<Vec<Submission>, RatatuiError> {
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, runner);
        self.restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop<S: KeyValueStore, C: Clock>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        runner: &mut SurveyRunner<S, C>,
    ) -> Result<Vec<Submission>, RatatuiError> {
        let mut ui = UiState::for_runner(runner);

        loop {
            terminal.draw(|frame| draw(frame, &*runner, &ui, &self.theme, &self.title))?;

            let timeout = runner.time_until_reset().unwrap_or(IDLE_POLL);
            if event::poll(timeout)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && ui.handle_key(runner, key)? == Control::Quit
            {
                break;
            }

            if let Some(cause) = runner.tick()? {
                tracing::debug!(?cause, "reset fired");
                ui.sync(runner);
            }
        }

        Ok(ui.take_submissions())
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
