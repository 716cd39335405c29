//! Probabilistic delta debugging: a sampling reducer driven by per-element
//! failure probabilities.

use log::debug;

use crate::algorithm::{test, Algorithm, Oracle};
use crate::cache::Cache;
use crate::configuration::Configuration;
use crate::error::Result;
use crate::input::Input;
use crate::outcome::Outcome;

const INITIAL_PROBABILITY: f64 = 0.1;
const CONVERGENCE_THRESHOLD: f64 = 0.8;

/// An ordered association list from retained index to estimated failure
/// probability, kept sorted by probability ascending.
///
/// Modeled as a `Vec` rather than a hash map (per the generic element
/// type's design notes): the sampling step's behavior depends on stable,
/// value-ordered traversal, which a language-native hash map does not
/// guarantee.
struct ProbabilityTable {
    entries: Vec<(usize, f64)>,
}

impl ProbabilityTable {
    fn new(indices: impl Iterator<Item = usize>) -> Self {
        ProbabilityTable {
            entries: indices.map(|i| (i, INITIAL_PROBABILITY)).collect(),
        }
    }

    fn sort_by_probability(&mut self) {
        self.entries
            .sort_by(|a, b| a.1.partial_cmp(&b.1).expect("probabilities are never NaN"));
    }

    fn probability(&self, index: usize) -> f64 {
        self.entries
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, p)| *p)
            .expect("index must be present in the probability table")
    }

    fn set_probability(&mut self, index: usize, probability: f64) {
        for entry in &mut self.entries {
            if entry.0 == index {
                entry.1 = probability;
                return;
            }
        }
    }

    fn all_converged(&self) -> bool {
        self.entries.iter().all(|&(_, p)| p >= CONVERGENCE_THRESHOLD)
    }

    fn is_resolved(&self) -> bool {
        self.entries.iter().all(|&(_, p)| p == 0.0)
            || self.entries.iter().all(|&(_, p)| p == 1.0)
            || self.entries.iter().all(|&(_, p)| p == 0.0 || p == 1.0)
    }

    /// Sample the deletion set from the lowest-probability prefix, per the
    /// monotone expected-retention-probability stopping rule. Assumes
    /// `self.entries` is already sorted ascending by probability.
    fn sample<E>(&self, input: &Input<E>) -> Vec<usize> {
        let mut last = 0.0f64;
        let mut i = 0usize;
        let mut k = 0usize;

        while i < self.entries.len() {
            let (_, p) = self.entries[i];
            if p == 0.0 {
                i += 1;
                k += 1;
                continue;
            }
            if p >= 1.0 {
                break;
            }

            let mut prob = 1.0f64;
            for &(_, pj) in &self.entries[k..=i] {
                prob *= 1.0 - pj;
            }
            prob *= (i - k + 1) as f64;
            if prob < last {
                break;
            }

            last = prob;
            i += 1;
        }

        let _ = input;
        let mut deleted = Vec::new();
        while i > k {
            i -= 1;
            deleted.push(self.entries[i].0);
        }
        deleted
    }

    /// `ratio := 1 / (1 - prod_{d in deleted, 0<p[d]<1}(1 - p[d]))`.
    fn ratio(&self, deleted: &[usize]) -> f64 {
        let mut product = 1.0f64;
        for &d in deleted {
            let p = self.probability(d);
            if p > 0.0 && p < 1.0 {
                product *= 1.0 - p;
            }
        }
        1.0 / (1.0 - product)
    }
}

/// `ProbDD`: maintains a per-index failure-probability estimate, repeatedly
/// samples a deletion set biased toward low-probability (likely
/// non-essential) indices, and updates the estimates based on whether the
/// resulting trial configuration still fails.
///
/// Does not guarantee 1-minimality; converges once every probability has
/// reached 0, 1, or the convergence threshold.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProbDd;

impl ProbDd {
    /// A new `ProbDd` instance. `ProbDd` holds no state between runs.
    pub fn new() -> Self {
        ProbDd
    }
}

impl<E> Algorithm<E> for ProbDd {
    fn name(&self) -> String {
        "ProbDD".to_string()
    }

    fn run(
        &self,
        input: &Input<E>,
        oracle: &mut Oracle<E>,
        mut cache: Option<&mut dyn Cache<E>>,
    ) -> Result<Configuration<E>> {
        debug!("starting ProbDD algorithm");

        let full = Configuration::from_input(input);
        let mut passed = full.clone();
        let mut table = ProbabilityTable::new(full.indices().iter().copied());

        loop {
            if table.is_resolved() || table.all_converged() {
                break;
            }

            table.sort_by_probability();
            debug!("current probability table has {} entries", table.entries.len());

            let deleted_indices = table.sample(input);
            let deleted = Configuration::from_unsorted(input.clone(), deleted_indices.clone());
            debug!("sampling configuration with {} deleted indices", deleted.len());

            let trial = passed.subtract(&deleted).expect("passed/deleted share an input");
            let outcome = test(oracle, &trial, cache.as_deref_mut())?;
            debug!("testing configuration with {} elements => {outcome:?}", trial.len());

            if outcome == Outcome::Fail {
                for &(index, _) in &table.entries {
                    if !trial.contains_index(index) {
                        table.set_probability(index, 0.0);
                    }
                }
                passed = trial;
                continue;
            }

            let ratio = table.ratio(&deleted_indices);
            for &(index, probability) in table.entries.clone().iter() {
                if !trial.contains_index(index) && probability != 0.0 && probability != 1.0 {
                    table.set_probability(index, probability + (ratio - 1.0) * probability);
                }
            }

            if deleted_indices.len() == 1 {
                table.set_probability(deleted_indices[0], 1.0);
            }
        }

        debug!("ProbDD algorithm completed with {} elements", passed.len());
        Ok(passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimizes_integers_to_the_six_essential_elements() {
        let input = Input::new((0..20).collect::<Vec<i32>>());
        let mut oracle = |c: &Configuration<i32>| {
            let data = c.data();
            let core = [3, 5, 7, 13, 15, 17];
            Ok(if core.iter().all(|x| data.contains(x)) {
                Outcome::Fail
            } else if [3, 5, 7].iter().all(|x| data.contains(x)) {
                Outcome::Unresolved
            } else {
                Outcome::Pass
            })
        };

        let result = ProbDd::new().run(&input, &mut oracle, None).unwrap();
        let mut data = result.data();
        data.sort_unstable();
        assert_eq!(data, vec![3, 5, 7, 13, 15, 17]);
    }
}
