use std::fmt;

use crate::*;

/// Problem found in a restored objective snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyId,
    KeyMismatch { kind: &'static str, key: String, found: String },
    InvalidState { id: String, context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyId => write!(f, "objective with an empty id"),
            ValidationError::KeyMismatch { kind, key, found } => {
                write!(f, "{kind} stored under '{key}' identifies itself as '{found}'")
            },
            ValidationError::InvalidState { id, context } => {
                write!(f, "objective '{id}' is in an invalid state ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check the structural invariants of a set of keyed objectives.
///
/// ```
/// use memo_data::{Objective, validate_objectives};
///
/// let quest = Objective::new("q1", "Find the key", "Explore the dungeon");
/// let entries = [("q1", &quest)];
/// assert!(validate_objectives(entries.iter().map(|(k, o)| (*k, *o))).is_empty());
/// ```
pub fn validate_objectives<'a>(entries: impl IntoIterator<Item = (&'a str, &'a Objective)>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (key, objective) in entries {
        if objective.id.trim().is_empty() {
            errors.push(ValidationError::EmptyId);
        }
        if key != objective.id {
            errors.push(ValidationError::KeyMismatch {
                kind: "objective",
                key: key.to_string(),
                found: objective.id.clone(),
            });
        }
        if objective.active && objective.successful {
            errors.push(ValidationError::InvalidState {
                id: objective.id.clone(),
                context: "marked successful while still active".to_string(),
            });
        }
        for (alias, sub) in &objective.sub_objectives {
            if alias != &sub.alias {
                errors.push(ValidationError::KeyMismatch {
                    kind: "sub-objective",
                    key: format!("{}/{alias}", objective.id),
                    found: sub.alias.clone(),
                });
            }
        }
    }

    errors
}
