//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use feedback_survey::{AnswerPolicy, RunnerConfig};

/// Customer feedback survey in the terminal
#[derive(Parser, Debug)]
#[command(name = "feedback-survey-tui", version, about)]
pub struct Cli {
    /// File holding saved progress and the completion marker
    #[arg(long, env = "FEEDBACK_SURVEY_STORE", default_value = "survey-store.json")]
    pub store: PathBuf,

    /// Seconds before the thank-you screen returns to the welcome screen
    #[arg(long, default_value_t = 5)]
    pub reset_delay_secs: u64,

    /// How a second answer to the same question is recorded
    #[arg(long, value_enum, default_value = "append")]
    pub answer_policy: PolicyArg,

    /// Title shown at the top of the screen
    #[arg(long, default_value = "Customer Survey")]
    pub title: String,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, default_value = "feedback-survey.log")]
    pub log_file: PathBuf,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

/// Answer policy as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Keep every answer, duplicates included
    Append,
    /// Replace the earlier answer to the same question
    Upsert,
}

impl From<PolicyArg> for AnswerPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Append => Self::Append,
            PolicyArg::Upsert => Self::Upsert,
        }
    }
}

impl Cli {
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::default()
            .with_reset_delay(Duration::from_secs(self.reset_delay_secs))
            .with_answer_policy(self.answer_policy.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["feedback-survey-tui"]).unwrap();
        assert_eq!(cli.store, PathBuf::from("survey-store.json"));
        assert_eq!(cli.log_level, tracing::Level::INFO);

        let config = cli.runner_config();
        assert_eq!(config.reset_delay, Duration::from_secs(5));
        assert_eq!(config.answer_policy, AnswerPolicy::Append);
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "feedback-survey-tui",
            "--store",
            "/tmp/progress.json",
            "--reset-delay-secs",
            "1",
            "--answer-policy",
            "upsert",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.store, PathBuf::from("/tmp/progress.json"));
        assert_eq!(cli.log_level, tracing::Level::DEBUG);
        let config = cli.runner_config();
        assert_eq!(config.reset_delay, Duration::from_secs(1));
        assert_eq!(config.answer_policy, AnswerPolicy::Upsert);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["feedback-survey-tui", "--answer-policy", "merge"]).is_err());
    }
}
