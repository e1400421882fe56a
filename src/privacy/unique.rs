//! Collision-free assignment of synthetic values.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::synthesizer::{Category, Synthesize};
use crate::config::UniquenessPolicy;
use crate::error::{AppError, Result};

/// Values handed out so far in this run, per category.
///
/// Lives for exactly one run; nothing is shared between runs.
#[derive(Debug, Default)]
pub struct History {
    assigned: HashMap<Category, HashSet<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.assigned
            .get(&category)
            .is_some_and(|values| values.contains(value))
    }

    /// Record a value; returns `false` if it was already taken.
    pub fn insert(&mut self, category: Category, value: String) -> bool {
        self.assigned.entry(category).or_default().insert(value)
    }

    pub fn len(&self, category: Category) -> usize {
        self.assigned.get(&category).map_or(0, HashSet::len)
    }
}

/// Wraps a [`Synthesize`] source with the history check.
#[derive(Debug)]
pub struct UniqueAssigner<S> {
    synthesizer: S,
    policy: UniquenessPolicy,
}

impl<S: Synthesize> UniqueAssigner<S> {
    pub fn new(synthesizer: S, policy: UniquenessPolicy) -> Self {
        Self {
            synthesizer,
            policy,
        }
    }

    pub fn synthesizer(&mut self) -> &mut S {
        &mut self.synthesizer
    }

    /// A value for `category`, checked against `history` when the category
    /// requires uniqueness.
    pub fn assign(&mut self, history: &mut History, category: Category) -> Result<String> {
        if category.requires_unique() {
            self.assign_unique(history, category)
        } else {
            Ok(self.synthesizer.synthesize(category))
        }
    }

    /// Draw candidates until one is not in `history`.
    ///
    /// The first `regenerate_attempts` candidates are used as generated; the
    /// next `suffix_attempts` get the suffix attempt number (0, 1, ...)
    /// appended. Fails with [`AppError::UniquenessExhausted`] once both budgets
    /// are spent.
    pub fn assign_unique(&mut self, history: &mut History, category: Category) -> Result<String> {
        let plain = self.policy.regenerate_attempts;
        for attempt in 0..self.policy.total_attempts() {
            let mut candidate = self.synthesizer.synthesize(category);
            if attempt >= plain {
                candidate = category.with_suffix(&candidate, attempt - plain);
            }
            if !history.contains(category, &candidate) {
                history.insert(category, candidate.clone());
                return Ok(candidate);
            }
            trace!(%category, attempt, "collision on {}", candidate);
        }

        Err(AppError::UniquenessExhausted {
            category,
            generator: std::any::type_name::<S>().to_string(),
            attempts: self.policy.total_attempts(),
        })
    }
}
