//! The built-in customer feedback survey.

use crate::{Question, SurveyDefinition};

pub const WELCOME: &str = "Welcome to the Survey";
pub const THANK_YOU: &str = "Thank you for your time!";
pub const COME_BACK_LATER: &str = "Thank you! Please come back later.";

/// The five questions every run asks: four ratings and one free-text question.
pub fn default_survey() -> SurveyDefinition {
    SurveyDefinition::new(vec![
        Question::rating(1, "How satisfied are you with our products?", 1..=5),
        Question::rating(
            2,
            "How fair are the prices compared to similar retailers?",
            1..=5,
        ),
        Question::rating(
            3,
            "How satisfied are you with the value for money of your purchase?",
            1..=5,
        ),
        Question::rating(
            4,
            "On a scale of 1-10, how would you recommend us to your friends and family?",
            1..=10,
        ),
        Question::text(5, "What could we do to improve our service?"),
    ])
    .with_welcome(WELCOME)
    .with_thank_you(THANK_YOU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_survey_is_valid() {
        let survey = default_survey();
        assert!(survey.validate().is_ok());
        assert_eq!(survey.len(), 5);
        assert_eq!(survey.questions().iter().filter(|q| q.is_rating()).count(), 4);
        assert!(survey.questions()[4].is_text());
        assert_eq!(survey.questions()[3].options(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }
}
