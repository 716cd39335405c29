//! A prefix-trie-backed cache with FAIL-subtree pruning.

use std::collections::HashMap;
use std::fmt;

use super::Cache;
use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::input::Input;
use crate::outcome::Outcome;

struct TrieNode {
    value: Option<Outcome>,
    children: HashMap<usize, TrieNode>,
}

impl TrieNode {
    fn new() -> Self {
        TrieNode {
            value: None,
            children: HashMap::new(),
        }
    }

    /// Count and discard every descendant that carries a stored outcome.
    fn clear_descendants(&mut self) -> usize {
        let mut removed = 0;
        for (_, mut child) in self.children.drain() {
            if child.value.is_some() {
                removed += 1;
            }
            removed += child.clear_descendants();
        }
        removed
    }
}

/// A `Cache` backed by a prefix trie where each edge is labeled with a
/// retained index.
///
/// Once a configuration is stored with outcome `Outcome::Fail`, every
/// strict superset reachable through its terminal node is pruned: existing
/// descendant entries are discarded immediately, and subsequent attempts
/// to store a superset of that configuration are silently dropped rather
/// than recreated. This encodes the monotonic heuristic that a superset of
/// a known-FAIL configuration is uninteresting for minimization, and bounds
/// the trie's memory.
///
/// # Examples
///
/// ```
/// use delta_debugging::{Configuration, Input, Outcome, TreeCache, cache::Cache};
///
/// let input = Input::new(vec![0u8, 1, 2, 3]);
/// let mut cache = TreeCache::new();
///
/// let small = Configuration::new(input.clone(), vec![0, 1, 2]).unwrap();
/// cache.put(small, Outcome::Fail).unwrap();
///
/// let bigger = Configuration::new(input, vec![0, 1, 2, 3]).unwrap();
/// cache.put(bigger.clone(), Outcome::Pass).unwrap();
/// assert!(!cache.contains(&bigger).unwrap());
/// ```
pub struct TreeCache<E> {
    root: TrieNode,
    length: usize,
    input: Option<Input<E>>,
}

impl<E> TreeCache<E> {
    /// An empty cache bound to no `Input` yet.
    pub fn new() -> Self {
        TreeCache {
            root: TrieNode::new(),
            length: 0,
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

impl<E> Default for TreeCache<E> {
    fn default() -> Self {
        TreeCache::new()
    }
}

impl<E> fmt::Debug for TreeCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TreeCache").field("len", &self.length).finish()
    }
}

impl<E> Cache<E> for TreeCache<E> {
    fn get(&self, config: &Configuration<E>) -> Result<Outcome> {
        self.check_input_ref(config)?;
        let mut node = &self.root;
        for &index in config.indices() {
            node = node.children.get(&index).ok_or(Error::KeyMissing)?;
        }
        node.value.ok_or(Error::KeyMissing)
    }

    fn put(&mut self, config: Configuration<E>, outcome: Outcome) -> Result<()> {
        self.check_input(&config)?;

        let mut node = &mut self.root;
        for &index in config.indices() {
            if node.value == Some(Outcome::Fail) {
                // Strict superset of an already-pruned FAIL configuration;
                // silently drop rather than recreate the subtree.
                return Ok(());
            }
            node = node.children.entry(index).or_insert_with(TrieNode::new);
        }

        if node.value.is_none() {
            self.length += 1;
        }
        node.value = Some(outcome);

        if outcome == Outcome::Fail {
            self.length -= node.clear_descendants();
        }

        Ok(())
    }

    fn contains(&self, config: &Configuration<E>) -> Result<bool> {
        if self.input.is_none() {
            return Ok(false);
        }
        self.check_input_ref(config)?;

        let mut node = &self.root;
        for &index in config.indices() {
            match node.children.get(&index) {
                Some(child) => node = child,
                None => return Ok(false),
            }
        }
        Ok(node.value.is_some())
    }

    fn delete(&mut self, config: &Configuration<E>) -> Result<()> {
        self.check_input_ref(config)?;

        let mut node = &mut self.root;
        for &index in config.indices() {
            node = node.children.get_mut(&index).ok_or(Error::KeyMissing)?;
        }
        if node.value.take().is_none() {
            return Err(Error::KeyMissing);
        }
        self.length -= 1;
        Ok(())
    }

    fn configurations(&self) -> Vec<Configuration<E>> {
        let Some(input) = &self.input else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut stack: Vec<(Vec<usize>, &TrieNode)> = self
            .root
            .children
            .iter()
            .map(|(&k, v)| (vec![k], v))
            .collect();
        while let Some((indices, node)) = stack.pop() {
            if node.value.is_some() {
                out.push(Configuration::new(input.clone(), indices.clone()).expect(
                    "trie paths are built from sorted ascending `put` index sequences",
                ));
            }
            for (&k, child) in node.children.iter() {
                let mut next = indices.clone();
                next.push(k);
                stack.push((next, child));
            }
        }
        out
    }

    fn len(&self) -> usize {
        self.length
    }

    fn clear(&mut self) {
        self.root = TrieNode::new();
        self.length = 0;
        self.input = None;
    }
}
