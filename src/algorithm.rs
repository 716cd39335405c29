//! The `Algorithm` trait every reducer implements, and the shared
//! cache-consulting oracle wrapper they're built on.

use log::error;

use crate::cache::Cache;
use crate::configuration::Configuration;
use crate::error::Result;
use crate::input::Input;
use crate::outcome::Outcome;

/// The oracle contract every algorithm drives: classify a configuration,
/// fallibly.
///
/// The oracle is fallible (rather than returning a bare `Outcome`) so that
/// a failure while evaluating the user's test — a panic caught at the
/// boundary, a subprocess that could not be spawned, and so on — has a
/// first-class representation (`Error::OracleFailure`) that `?` propagates
/// straight out of `run`, instead of being a second, ad hoc failure
/// channel layered on top of `Outcome`.
pub type Oracle<'a, E> = dyn FnMut(&Configuration<E>) -> Result<Outcome> + 'a;

/// A reduction algorithm: given an `Input` and an oracle, produces a
/// `Configuration` whose outcome is `Fail` and which satisfies whatever
/// minimality property the algorithm promises (see each algorithm's own
/// documentation).
///
/// # Examples
///
/// ```
/// use delta_debugging::{Algorithm, DdMin, Input, Outcome};
///
/// let input = Input::new((0..10).collect::<Vec<_>>());
/// let mut oracle = |c: &delta_debugging::Configuration<i32>| {
///     let data = c.data();
///     Ok(if data.contains(&3) && data.contains(&5) && data.contains(&7) {
///         Outcome::Fail
///     } else {
///         Outcome::Pass
///     })
/// };
///
/// let result = DdMin::new().run(&input, &mut oracle, None).unwrap();
/// assert_eq!(result.data(), vec![3, 5, 7]);
/// ```
pub trait Algorithm<E> {
    /// A short, human-readable name for this algorithm, for reporting.
    fn name(&self) -> String;

    /// Run this algorithm over `input`, consulting `cache` (if present) and
    /// invoking `oracle` to classify candidate configurations.
    fn run(
        &self,
        input: &Input<E>,
        oracle: &mut Oracle<E>,
        cache: Option<&mut dyn Cache<E>>,
    ) -> Result<Configuration<E>>;
}

/// Test `config` with `oracle`, consulting and populating `cache` first.
///
/// If `cache` is present and already has a stored outcome for `config`,
/// that outcome is returned without invoking the oracle. Otherwise the
/// oracle is invoked and, if `cache` is present, the result is stored
/// before being returned. Oracle failures propagate unchanged.
pub fn test<E>(
    oracle: &mut Oracle<E>,
    config: &Configuration<E>,
    mut cache: Option<&mut dyn Cache<E>>,
) -> Result<Outcome> {
    if let Some(ref mut c) = cache {
        if c.contains(config)? {
            return c.get(config);
        }
    }

    let outcome = oracle(config).map_err(|e| {
        error!("error during oracle evaluation");
        e
    })?;

    if let Some(c) = cache {
        c.put(config.clone(), outcome)?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::HashCache;

    fn algorithm_is_object_safe(_: &dyn Algorithm<u8>) {}

    struct Noop;

    impl Algorithm<u8> for Noop {
        fn name(&self) -> String {
            "noop".to_string()
        }

        fn run(
            &self,
            input: &Input<u8>,
            _oracle: &mut Oracle<u8>,
            _cache: Option<&mut dyn Cache<u8>>,
        ) -> Result<Configuration<u8>> {
            Ok(Configuration::from_input(input))
        }
    }

    #[test]
    fn algorithm_trait_is_object_safe() {
        algorithm_is_object_safe(&Noop);
    }

    #[test]
    fn test_consults_cache_before_oracle() {
        let input = Input::new(vec![1u8, 2, 3]);
        let config = Configuration::from_input(&input);
        let mut cache = HashCache::new();
        cache.put(config.clone(), Outcome::Fail).unwrap();

        let mut calls = 0;
        let mut oracle = |_: &Configuration<u8>| {
            calls += 1;
            Ok(Outcome::Pass)
        };

        let outcome = test(&mut oracle, &config, Some(&mut cache)).unwrap();
        assert_eq!(outcome, Outcome::Fail);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_invokes_oracle_and_populates_cache() {
        let input = Input::new(vec![1u8, 2, 3]);
        let config = Configuration::from_input(&input);
        let mut cache = HashCache::new();

        let mut oracle = |_: &Configuration<u8>| Ok(Outcome::Fail);
        let outcome = test(&mut oracle, &config, Some(&mut cache)).unwrap();
        assert_eq!(outcome, Outcome::Fail);
        assert_eq!(cache.get(&config).unwrap(), Outcome::Fail);
    }
}
