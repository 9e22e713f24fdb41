//! Typed access to the two progress keys.
//!
//! `surveyAnswers` holds the answer log as a JSON array and is overwritten
//! whole after every change. `surveyStatus` holds `"COMPLETED"` between a
//! submission and the next reset.

use crate::{Answers, KeyValueStore, StoreError};

/// Key holding the serialized answer log.
pub const ANSWERS_KEY: &str = "surveyAnswers";

/// Key holding the completion marker.
pub const STATUS_KEY: &str = "surveyStatus";

/// The only value ever written under [`STATUS_KEY`].
pub const COMPLETED: &str = "COMPLETED";

/// Load the stored answer log.
///
/// A missing key is an empty log. A value that does not parse is logged and
/// treated as empty, so a corrupted entry never blocks the survey.
pub fn load_answers(store: &impl KeyValueStore) -> Result<Answers, StoreError> {
    let Some(raw) = store.get(ANSWERS_KEY)? else {
        return Ok(Answers::new());
    };

    match serde_json::from_str(&raw) {
        Ok(answers) => Ok(answers),
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed stored answers");
            Ok(Answers::new())
        }
    }
}

/// Overwrite the stored answer log.
pub fn save_answers(store: &mut impl KeyValueStore, answers: &Answers) -> Result<(), StoreError> {
    let raw = serde_json::to_string(answers).map_err(StoreError::other)?;
    store.set(ANSWERS_KEY, &raw)
}

/// Check whether the completion marker is set.
pub fn is_completed(store: &impl KeyValueStore) -> Result<bool, StoreError> {
    Ok(store.get(STATUS_KEY)?.as_deref() == Some(COMPLETED))
}

pub fn mark_completed(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
    store.set(STATUS_KEY, COMPLETED)
}

pub fn clear_completed(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
    store.remove(STATUS_KEY)
}
