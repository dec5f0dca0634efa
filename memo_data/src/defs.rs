use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Stable, caller-assigned objective identifier.
pub type Id = String;

/// Glyph appended to completed text on success.
pub const GLYPH_SUCCESS: &str = " \u{2713}"; // ✓
/// Glyph appended to completed text on failure.
pub const GLYPH_FAILURE: &str = " \u{2717}"; // ✗

/// How an objective or sub-objective was finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn from_fail(fail: bool) -> Self {
        if fail { Outcome::Failure } else { Outcome::Success }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// Status glyph appended to the finished text.
    pub fn glyph(self) -> &'static str {
        match self {
            Outcome::Success => GLYPH_SUCCESS,
            Outcome::Failure => GLYPH_FAILURE,
        }
    }
}

/// Selects which objectives a listing should include.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectiveFilter {
    Current,
    Completed,
    All,
}

impl ObjectiveFilter {
    /// True if `objective` belongs in a listing with this filter.
    ///
    /// Objectives whose stored description is empty are never listed. A
    /// completed objective carries its status glyph, so it always has one.
    pub fn matches(self, objective: &Objective) -> bool {
        if objective.description.is_empty() {
            return false;
        }
        match self {
            ObjectiveFilter::Current => objective.active,
            ObjectiveFilter::Completed => !objective.active,
            ObjectiveFilter::All => true,
        }
    }

    /// Parse a filter keyword typed by a user or a host script.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "current" | "active" => Some(ObjectiveFilter::Current),
            "completed" | "done" => Some(ObjectiveFilter::Completed),
            "all" => Some(ObjectiveFilter::All),
            _ => None,
        }
    }
}

/// Whether completing a parent objective also completes its sub-objectives.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Sub-objectives are left untouched.
    #[default]
    Never,
    /// Only a failed parent completion is pushed onto active sub-objectives.
    OnFailure,
    /// Every parent completion is pushed onto active sub-objectives.
    Always,
}

impl CascadePolicy {
    pub fn applies_to(self, outcome: Outcome) -> bool {
        match self {
            CascadePolicy::Never => false,
            CascadePolicy::OnFailure => outcome == Outcome::Failure,
            CascadePolicy::Always => true,
        }
    }
}

/// A nested task under one objective, keyed by an alias unique to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubObjective {
    pub alias: String,
    pub data: String,
    pub active: bool,
}

impl SubObjective {
    pub fn new(alias: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            data: data.into(),
            active: true,
        }
    }

    /// Finish this sub-objective. Returns false if it was already finished.
    pub fn complete(&mut self, outcome: Outcome) -> bool {
        if !self.active {
            return false;
        }
        self.data.push_str(outcome.glyph());
        self.active = false;
        true
    }
}

/// A main quest entry tracked by a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: Id,
    pub alias: String,
    pub description: String,
    pub active: bool,
    /// Only meaningful once `active` is false.
    pub successful: bool,
    #[serde(default)]
    pub sub_objectives: IndexMap<String, SubObjective>,
}

impl Objective {
    pub fn new(id: impl Into<Id>, alias: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: alias.into(),
            description: description.into(),
            active: true,
            successful: false,
            sub_objectives: IndexMap::new(),
        }
    }

    /// Finish this objective. Returns false if it was already finished.
    pub fn complete(&mut self, outcome: Outcome) -> bool {
        if !self.active {
            return false;
        }
        self.description.push_str(outcome.glyph());
        self.successful = outcome.is_success();
        self.active = false;
        true
    }

    /// Outcome of a finished objective, `None` while still active.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.active {
            None
        } else if self.successful {
            Some(Outcome::Success)
        } else {
            Some(Outcome::Failure)
        }
    }

    pub fn sub_objective(&self, alias: &str) -> Option<&SubObjective> {
        self.sub_objectives.get(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_twice_keeps_first_outcome() {
        let mut objective = Objective::new("q1", "Find the key", "Explore the dungeon");
        assert!(objective.complete(Outcome::Failure));
        assert!(!objective.complete(Outcome::Success));
        assert_eq!(objective.description, "Explore the dungeon \u{2717}");
        assert_eq!(objective.outcome(), Some(Outcome::Failure));
    }

    #[test]
    fn filters_hide_empty_descriptions() {
        let blank = Objective::new("q0", "Blank", "");
        for filter in [ObjectiveFilter::Current, ObjectiveFilter::Completed, ObjectiveFilter::All] {
            assert!(!filter.matches(&blank));
        }
    }

    #[test]
    fn completed_blank_matches_by_its_glyph() {
        let mut blank = Objective::new("q0", "Blank", "");
        blank.complete(Outcome::Success);
        assert!(ObjectiveFilter::Completed.matches(&blank));
        assert!(ObjectiveFilter::All.matches(&blank));
        assert!(!ObjectiveFilter::Current.matches(&blank));
    }

    #[test]
    fn filter_keywords() {
        assert_eq!(ObjectiveFilter::from_keyword("DONE"), Some(ObjectiveFilter::Completed));
        assert_eq!(ObjectiveFilter::from_keyword(" all "), Some(ObjectiveFilter::All));
        assert_eq!(ObjectiveFilter::from_keyword("maybe"), None);
    }

    #[test]
    fn cascade_policy_matrix() {
        assert!(!CascadePolicy::Never.applies_to(Outcome::Failure));
        assert!(CascadePolicy::OnFailure.applies_to(Outcome::Failure));
        assert!(!CascadePolicy::OnFailure.applies_to(Outcome::Success));
        assert!(CascadePolicy::Always.applies_to(Outcome::Success));
    }

    #[test]
    fn cascade_policy_serde_shape() {
        let json = serde_json::to_string(&CascadePolicy::OnFailure).unwrap();
        assert_eq!(json, "\"on_failure\"");
        let back: CascadePolicy = serde_json::from_str("\"always\"").unwrap();
        assert_eq!(back, CascadePolicy::Always);
    }
}
