//! Orchestration: times a reduction, wires counters to the oracle, and
//! hands the work off to an [`Algorithm`].

use std::fmt;
use std::time::{Duration, Instant};

use crate::algorithm::Algorithm;
use crate::cache::Cache;
use crate::configuration::Configuration;
use crate::counter::Counter;
use crate::error::Result;
use crate::input::Input;
use crate::outcome::Outcome;

/// Runs a single delta-debugging reduction: builds the full `Configuration`
/// for an `Input`, drives `algorithm` with a counting wrapper around the
/// user's oracle, and records elapsed time and the result.
///
/// The oracle passed down to `algorithm` is this counting wrapper, not the
/// cache-consulting [`crate::algorithm::test`] helper -- caching is layered
/// on top of *that* independently, by each algorithm's own `test` calls.
pub struct Debugger<'a, E, A> {
    algorithm: A,
    oracle: Box<dyn FnMut(&Configuration<E>) -> Result<Outcome> + 'a>,
    cache: Option<Box<dyn Cache<E> + 'a>>,
    counter: Counter,
    elapsed: Duration,
    input: Option<Input<E>>,
    result: Option<Configuration<E>>,
}

impl<'a, E, A> Debugger<'a, E, A>
where
    A: Algorithm<E>,
{
    /// A debugger that reduces with `algorithm`, classifying candidates
    /// with `oracle` and consulting no cache.
    pub fn new(
        algorithm: A,
        oracle: impl FnMut(&Configuration<E>) -> Result<Outcome> + 'a,
    ) -> Self {
        Debugger {
            algorithm,
            oracle: Box::new(oracle),
            cache: None,
            counter: Counter::new(),
            elapsed: Duration::default(),
            input: None,
            result: None,
        }
    }

    /// Consult `cache` while reducing.
    pub fn with_cache(mut self, cache: impl Cache<E> + 'a) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// The algorithm this debugger drives.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// The per-outcome tally accumulated across every oracle invocation
    /// this debugger's `debug` call made.
    pub fn counter(&self) -> Counter {
        self.counter
    }

    /// How long the most recent `debug` call took.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The most recently produced reduction, if `debug` has run.
    pub fn result(&self) -> Option<&Configuration<E>> {
        self.result.as_ref()
    }

    /// Reduce `input`: build its full `Configuration`, run `algorithm`
    /// against the counting oracle wrapper (and cache, if any), and
    /// record timing and the result.
    pub fn debug(&mut self, input: Input<E>) -> Result<Configuration<E>> {
        let start = Instant::now();

        let algorithm = &self.algorithm;
        let counter = &mut self.counter;
        let user_oracle = &mut self.oracle;
        let mut wrapped = move |config: &Configuration<E>| -> Result<Outcome> {
            let outcome = (user_oracle)(config)?;
            counter.record(outcome);
            Ok(outcome)
        };

        let cache = self.cache.as_deref_mut();
        let result = algorithm.run(&input, &mut wrapped, cache)?;

        self.elapsed = start.elapsed();
        self.input = Some(input);
        self.result = Some(result.clone());
        Ok(result)
    }
}

impl<'a, E, A> fmt::Debug for Debugger<'a, E, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Debugger")
            .field("counter", &self.counter)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

impl<'a, E, A> fmt::Display for Debugger<'a, E, A>
where
    A: Algorithm<E>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Delta debugging using {}", self.algorithm.name())?;

        let (Some(input), Some(result)) = (&self.input, &self.result) else {
            return write!(f, "Debugger has not been run yet.");
        };

        let before = input.len();
        let after = result.len();
        let ratio = if before == 0 {
            0.0
        } else {
            (before - after) as f64 / before as f64
        };
        writeln!(f, "Reduced configuration length from {before} to {after}")?;
        writeln!(f, "Reduction ratio: {:.2}%", ratio * 100.0)?;
        write!(f, "Total time: {:.2} seconds", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::DdMin;

    #[test]
    fn debug_reduces_and_records_counters() {
        let input = Input::new((0..10).collect::<Vec<i32>>());
        let oracle = |c: &Configuration<i32>| {
            let data = c.data();
            Ok(if data.contains(&3) && data.contains(&5) && data.contains(&7) {
                Outcome::Fail
            } else {
                Outcome::Pass
            })
        };

        let mut debugger = Debugger::new(DdMin::new(), oracle);
        let result = debugger.debug(input).unwrap();

        assert_eq!(result.data(), vec![3, 5, 7]);
        assert_eq!(debugger.counter().fail_count() + debugger.counter().pass_count(), debugger.counter().total());
        assert!(debugger.counter().total() > 0);
        assert_eq!(debugger.result().unwrap().data(), vec![3, 5, 7]);
    }

    #[test]
    fn display_before_run_says_so() {
        let oracle = |_: &Configuration<i32>| Ok(Outcome::Pass);
        let debugger = Debugger::new(DdMin::new(), oracle);
        assert_eq!(debugger.to_string(), "Delta debugging using ddmin\nDebugger has not been run yet.");
    }

    #[test]
    fn display_after_run_reports_sizes() {
        let input = Input::new((0..10).collect::<Vec<i32>>());
        let oracle = |c: &Configuration<i32>| {
            let data = c.data();
            Ok(if data.contains(&3) && data.contains(&5) && data.contains(&7) {
                Outcome::Fail
            } else {
                Outcome::Pass
            })
        };

        let mut debugger = Debugger::new(DdMin::new(), oracle);
        debugger.debug(input).unwrap();
        let rendered = debugger.to_string();
        assert!(rendered.contains("Reduced configuration length from 10 to 3"));
        assert!(rendered.contains("Total time"));
    }

    #[test]
    fn with_cache_reuses_stored_outcomes() {
        use crate::cache::HashCache;
        use std::cell::Cell;

        let input = Input::new((0..10).collect::<Vec<i32>>());
        let calls = Cell::new(0u32);
        let oracle = |c: &Configuration<i32>| {
            calls.set(calls.get() + 1);
            let data = c.data();
            Ok(if data.contains(&3) && data.contains(&5) && data.contains(&7) {
                Outcome::Fail
            } else {
                Outcome::Pass
            })
        };

        let mut debugger = Debugger::new(DdMin::new(), oracle).with_cache(HashCache::new());
        let result = debugger.debug(input).unwrap();
        assert_eq!(result.data(), vec![3, 5, 7]);
    }
}
