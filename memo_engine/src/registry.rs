//! Objective registry.
//!
//! [`ObjectiveRegistry`] owns every [`Objective`] and its sub-objectives and is
//! the only place they are mutated. Every operation is total: an unknown id or
//! alias, or a duplicate on create, is a silent no-op and never an error.
//! Mutations return `true` when they changed state so callers can react.

use indexmap::IndexMap;
use log::{debug, info};
use memo_data::{CascadePolicy, Id, Objective, ObjectiveFilter, Outcome, SubObjective, ValidationError};
use serde::{Deserialize, Serialize};

/// Insertion-ordered store of objectives keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveRegistry {
    objectives: IndexMap<Id, Objective>,
    #[serde(default)]
    cascade: CascadePolicy,
}

impl ObjectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cascade(cascade: CascadePolicy) -> Self {
        Self {
            objectives: IndexMap::new(),
            cascade,
        }
    }

    pub fn cascade(&self) -> CascadePolicy {
        self.cascade
    }

    pub fn set_cascade(&mut self, cascade: CascadePolicy) {
        self.cascade = cascade;
    }

    /// Create a new active objective unless `id` is already taken.
    pub fn add_objective(&mut self, id: &str, alias: &str, description: &str) -> bool {
        if self.objectives.contains_key(id) {
            debug!("objective '{id}' already exists, add ignored");
            return false;
        }
        self.objectives
            .insert(id.to_string(), Objective::new(id, alias, description));
        info!("objective '{id}' ({alias}) added");
        true
    }

    /// Append a sub-objective under `id` unless the parent is missing or `sub_alias` is taken.
    pub fn add_sub_objective(&mut self, id: &str, sub_alias: &str, data: &str) -> bool {
        let Some(objective) = self.lookup_mut(id) else {
            return false;
        };
        if objective.sub_objectives.contains_key(sub_alias) {
            debug!("sub-objective '{id}/{sub_alias}' already exists, add ignored");
            return false;
        }
        objective
            .sub_objectives
            .insert(sub_alias.to_string(), SubObjective::new(sub_alias, data));
        info!("sub-objective '{id}/{sub_alias}' added");
        true
    }

    /// Replace the alias and/or description of an objective. `None` leaves a field unchanged.
    pub fn set_objective(&mut self, id: &str, alias: Option<&str>, description: Option<&str>) -> bool {
        let Some(objective) = self.lookup_mut(id) else {
            return false;
        };
        let mut changed = false;
        if let Some(alias) = alias {
            changed |= objective.alias != alias;
            objective.alias = alias.to_string();
        }
        if let Some(description) = description {
            changed |= objective.description != description;
            objective.description = description.to_string();
        }
        if changed {
            info!("objective '{id}' updated");
        }
        changed
    }

    /// Replace the text of one sub-objective.
    pub fn set_sub_objective(&mut self, id: &str, sub_alias: &str, data: &str) -> bool {
        let Some(sub) = self.lookup_sub_mut(id, sub_alias) else {
            return false;
        };
        if sub.data == data {
            return false;
        }
        sub.data = data.to_string();
        info!("sub-objective '{id}/{sub_alias}' updated");
        true
    }

    /// Finish an active objective. Later calls keep the first outcome.
    ///
    /// Depending on the registry's [`CascadePolicy`], the outcome is also applied
    /// to every sub-objective that is still active.
    pub fn complete_objective(&mut self, id: &str, fail: bool) -> bool {
        let cascade = self.cascade;
        let Some(objective) = self.lookup_mut(id) else {
            return false;
        };
        let outcome = Outcome::from_fail(fail);
        if !objective.complete(outcome) {
            debug!("objective '{id}' already finished, completion ignored");
            return false;
        }
        info!("objective '{id}' finished: {outcome:?}");

        if cascade.applies_to(outcome) {
            for (alias, sub) in &mut objective.sub_objectives {
                if sub.complete(outcome) {
                    info!("sub-objective '{id}/{alias}' finished by cascade: {outcome:?}");
                }
            }
        }
        true
    }

    /// Finish one active sub-objective; the parent is left untouched.
    pub fn complete_sub_objective(&mut self, id: &str, sub_alias: &str, fail: bool) -> bool {
        let Some(sub) = self.lookup_sub_mut(id, sub_alias) else {
            return false;
        };
        let outcome = Outcome::from_fail(fail);
        if !sub.complete(outcome) {
            debug!("sub-objective '{id}/{sub_alias}' already finished, completion ignored");
            return false;
        }
        info!("sub-objective '{id}/{sub_alias}' finished: {outcome:?}");
        true
    }

    /// True if the objective exists and is still active.
    pub fn is_objective_active(&self, id: &str) -> bool {
        self.objectives.get(id).is_some_and(|objective| objective.active)
    }

    /// True if the sub-objective exists and is still active.
    pub fn is_sub_objective_active(&self, id: &str, sub_alias: &str) -> bool {
        self.sub_objective(id, sub_alias).is_some_and(|sub| sub.active)
    }

    /// True if the objective exists, is finished, and did not fail.
    pub fn is_objective_successful(&self, id: &str) -> bool {
        self.objectives
            .get(id)
            .is_some_and(|objective| !objective.active && objective.successful)
    }

    /// Objectives matching `filter`, most recently added first.
    pub fn list(&self, filter: ObjectiveFilter) -> Vec<&Objective> {
        self.objectives
            .values()
            .rev()
            .filter(|objective| filter.matches(objective))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Objective> {
        self.objectives.get(id)
    }

    pub fn sub_objective(&self, id: &str, sub_alias: &str) -> Option<&SubObjective> {
        self.objectives.get(id)?.sub_objective(sub_alias)
    }

    /// All objectives in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.values()
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Drop every objective, keeping the cascade policy.
    pub fn clear(&mut self) {
        self.objectives.clear();
    }

    /// Structural problems in the stored objectives (used after restoring a save).
    pub fn validate(&self) -> Vec<ValidationError> {
        memo_data::validate_objectives(self.objectives.iter().map(|(key, objective)| (key.as_str(), objective)))
    }

    fn lookup_mut(&mut self, id: &str) -> Option<&mut Objective> {
        let found = self.objectives.get_mut(id);
        if found.is_none() {
            debug!("no objective '{id}', operation ignored");
        }
        found
    }

    fn lookup_sub_mut(&mut self, id: &str, sub_alias: &str) -> Option<&mut SubObjective> {
        let found = self.lookup_mut(id)?.sub_objectives.get_mut(sub_alias);
        if found.is_none() {
            debug!("no sub-objective '{id}/{sub_alias}', operation ignored");
        }
        found
    }
}
