/*!
 * Per-Strategy Values
 * One value for each fitting strategy, addressed by `Strategy`
 */

use crate::memory::Strategy;
use serde::{Deserialize, Serialize};

/// A value per fitting strategy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerStrategy<T> {
    pub first_fit: T,
    pub best_fit: T,
    pub worst_fit: T,
}

impl<T> PerStrategy<T> {
    /// Build by evaluating `f` once per strategy, in reporting order
    pub fn from_fn(mut f: impl FnMut(Strategy) -> T) -> Self {
        Self {
            first_fit: f(Strategy::FirstFit),
            best_fit: f(Strategy::BestFit),
            worst_fit: f(Strategy::WorstFit),
        }
    }

    pub fn get(&self, strategy: Strategy) -> &T {
        match strategy {
            Strategy::FirstFit => &self.first_fit,
            Strategy::BestFit => &self.best_fit,
            Strategy::WorstFit => &self.worst_fit,
        }
    }

    pub fn get_mut(&mut self, strategy: Strategy) -> &mut T {
        match strategy {
            Strategy::FirstFit => &mut self.first_fit,
            Strategy::BestFit => &mut self.best_fit,
            Strategy::WorstFit => &mut self.worst_fit,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Strategy, &T)> {
        Strategy::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Strategy, &T) -> U) -> PerStrategy<U> {
        PerStrategy::from_fn(|s| f(s, self.get(s)))
    }

    /// Apply `f` to each value in reporting order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Strategy, &mut T)) {
        f(Strategy::FirstFit, &mut self.first_fit);
        f(Strategy::BestFit, &mut self.best_fit);
        f(Strategy::WorstFit, &mut self.worst_fit);
    }
}

impl<T: Clone> PerStrategy<T> {
    /// Same value for every strategy
    pub fn splat(value: T) -> Self {
        Self {
            first_fit: value.clone(),
            best_fit: value.clone(),
            worst_fit: value,
        }
    }
}
