//! The oracle cache abstraction and its two disciplines.
//!
//! A cache maps a `Configuration` to the `Outcome` last observed for it.
//! Every algorithm's `test` helper consults the cache (if one is supplied)
//! before invoking the oracle, and stores the result afterwards.
//!
//! Two conforming implementations are provided: [`HashCache`], a flat hash
//! table, and [`TreeCache`], a prefix trie that additionally prunes FAIL
//! subtrees. Both can be used interchangeably wherever `Algorithm::run`
//! accepts `Option<&mut dyn Cache<E>>`, with the caveat that `TreeCache`
//! may "forget" a previously-stored FAIL configuration's supersets.

mod hash;
mod tree;

pub use hash::HashCache;
pub use tree::TreeCache;

use crate::configuration::Configuration;
use crate::error::Result;
use crate::outcome::Outcome;

/// A mapping from `Configuration` to the `Outcome` last observed for it.
///
/// Implementations must agree with `Configuration`'s own equality: two
/// configurations with the same `Input` identity and the same index
/// sequence must be treated as the same key.
///
/// # Examples
///
/// ```
/// use delta_debugging::{Configuration, HashCache, Input, Outcome, cache::Cache};
///
/// let input = Input::new(vec![1, 2, 3]);
/// let config = Configuration::from_input(&input);
///
/// let mut cache = HashCache::new();
/// cache.put(config.clone(), Outcome::Fail).unwrap();
/// assert!(cache.contains(&config).unwrap());
/// assert_eq!(cache.get(&config).unwrap(), Outcome::Fail);
/// ```
pub trait Cache<E> {
    /// Look up the stored outcome for `config`.
    ///
    /// # Errors
    ///
    /// `Error::KeyMissing` if there is no stored outcome for `config`.
    /// `Error::InputMismatch` if `config` is bound to a different `Input`
    /// than previously-stored configurations.
    fn get(&self, config: &Configuration<E>) -> Result<Outcome>;

    /// Store `outcome` for `config`.
    ///
    /// # Errors
    ///
    /// `Error::InputMismatch` if `config` is bound to a different `Input`
    /// than previously-stored configurations.
    fn put(&mut self, config: Configuration<E>, outcome: Outcome) -> Result<()>;

    /// Whether an outcome is stored for `config`.
    ///
    /// # Errors
    ///
    /// `Error::InputMismatch` if `config` is bound to a different `Input`
    /// than previously-stored configurations.
    fn contains(&self, config: &Configuration<E>) -> Result<bool>;

    /// Remove the stored outcome for `config`, if any.
    ///
    /// # Errors
    ///
    /// `Error::KeyMissing` if there is no stored outcome for `config`.
    /// `Error::InputMismatch` if `config` is bound to a different `Input`
    /// than previously-stored configurations.
    fn delete(&mut self, config: &Configuration<E>) -> Result<()>;

    /// All configurations with a stored outcome.
    fn configurations(&self) -> Vec<Configuration<E>>;

    /// The number of configurations with a stored outcome.
    fn len(&self) -> usize;

    /// Whether no configuration has a stored outcome.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard every stored outcome.
    fn clear(&mut self);
}
