//! A per-`Outcome` running tally, kept by a `Debugger` across a reduction.

use crate::outcome::Outcome;

/// Counts how many times each `Outcome` was observed while wrapping the
/// user's oracle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counter {
    pass_count: u64,
    fail_count: u64,
    unresolved_count: u64,
}

impl Counter {
    /// A counter with every tally at zero.
    pub fn new() -> Self {
        Counter::default()
    }

    /// Record one observation of `outcome`.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.pass_count += 1,
            Outcome::Fail => self.fail_count += 1,
            Outcome::Unresolved => self.unresolved_count += 1,
        }
    }

    /// How many times `Outcome::Pass` was recorded.
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    /// How many times `Outcome::Fail` was recorded.
    pub fn fail_count(&self) -> u64 {
        self.fail_count
    }

    /// How many times `Outcome::Unresolved` was recorded.
    pub fn unresolved_count(&self) -> u64 {
        self.unresolved_count
    }

    /// The total number of oracle invocations recorded.
    pub fn total(&self) -> u64 {
        self.pass_count + self.fail_count + self.unresolved_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_each_variant() {
        let mut counter = Counter::new();
        counter.record(Outcome::Pass);
        counter.record(Outcome::Fail);
        counter.record(Outcome::Fail);
        counter.record(Outcome::Unresolved);

        assert_eq!(counter.pass_count(), 1);
        assert_eq!(counter.fail_count(), 2);
        assert_eq!(counter.unresolved_count(), 1);
        assert_eq!(counter.total(), 4);
    }
}
