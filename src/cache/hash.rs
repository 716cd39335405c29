//! A flat hash-table-backed cache.

use std::collections::HashMap;
use std::fmt;

use super::Cache;
use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::input::Input;
use crate::outcome::Outcome;

/// A `Cache` backed by a hash table keyed on the configuration's index
/// sequence. O(1) expected per operation.
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
/// assert_eq!(cache.get(&config).unwrap(), Outcome::Fail);
/// ```
pub struct HashCache<E> {
    data: HashMap<Configuration<E>, Outcome>,
    input: Option<Input<E>>,
}

impl<E> HashCache<E> {
    /// An empty cache bound to no `Input` yet.
    pub fn new() -> Self {
        HashCache {
            data: HashMap::new(),
            input: None,
        }
    }

    fn check_input(&mut self, config: &Configuration<E>) -> Result<()> {
        match &self.input {
            None => {
                self.input = Some(config.input().clone());
                Ok(())
            }
            Some(bound) if *bound == *config.input() => Ok(()),
            Some(_) => Err(Error::InputMismatch),
        }
    }

    fn check_input_ref(&self, config: &Configuration<E>) -> Result<()> {
        match &self.input {
            None => Ok(()),
            Some(bound) if *bound == *config.input() => Ok(()),
            Some(_) => Err(Error::InputMismatch),
        }
    }
}

impl<E> Default for HashCache<E> {
    fn default() -> Self {
        HashCache::new()
    }
}

impl<E> fmt::Debug for HashCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HashCache").field("len", &self.data.len()).finish()
    }
}

impl<E> Cache<E> for HashCache<E> {
    fn get(&self, config: &Configuration<E>) -> Result<Outcome> {
        self.check_input_ref(config)?;
        self.data.get(config).copied().ok_or(Error::KeyMissing)
    }

    fn put(&mut self, config: Configuration<E>, outcome: Outcome) -> Result<()> {
        self.check_input(&config)?;
        self.data.insert(config, outcome);
        Ok(())
    }

    fn contains(&self, config: &Configuration<E>) -> Result<bool> {
        if self.input.is_none() {
            return Ok(false);
        }
        self.check_input_ref(config)?;
        Ok(self.data.contains_key(config))
    }

    fn delete(&mut self, config: &Configuration<E>) -> Result<()> {
        self.check_input_ref(config)?;
        self.data.remove(config).ok_or(Error::KeyMissing)?;
        Ok(())
    }

    fn configurations(&self) -> Vec<Configuration<E>> {
        self.data.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        self.input = None;
        self.data.clear();
    }
}
