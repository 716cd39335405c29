//! `Configuration`: a sorted, duplicate-free set of indices into one
//! `Input`, and its algebra.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops;

use crate::error::{Error, Result};
use crate::input::Input;

/// An ordered set of indices into an `Input`, with the add/subtract/concat
/// algebra described in the data model.
///
/// `Configuration` never requires `E: Clone + Eq + Hash` to exist, move, or
/// compare — only `data()` (which materializes the selected elements)
/// needs `E: Clone`. This keeps, e.g., `Configuration<Configuration<u8>>`
/// (as used internally by HDD) cheap to construct and compare without
/// forcing the inner `Configuration<u8>` to implement anything beyond what
/// `Input`/`Configuration` already provide unconditionally.
pub struct Configuration<E> {
    input: Input<E>,
    indices: Vec<usize>,
}

impl<E> Configuration<E> {
    /// Build a configuration from an already sorted, duplicate-free,
    /// in-bounds index sequence. Returns `Error::BadIndices` otherwise.
    pub fn new(input: Input<E>, indices: Vec<usize>) -> Result<Self> {
        if !is_sorted_unique(&indices) || indices.iter().any(|&i| i >= input.len()) {
            return Err(Error::BadIndices);
        }
        Ok(Configuration { input, indices })
    }

    /// Build a configuration from an arbitrary index sequence, sorting and
    /// deduplicating it first. Used internally by algorithms (ProbDD's
    /// sampling, HDD's subset construction) that build index sets
    /// incrementally and don't already know they're sorted.
    pub(crate) fn from_unsorted(input: Input<E>, mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Configuration { input, indices }
    }

    /// The full configuration `[0, 1, ..., |input|-1]`.
    pub fn from_input(input: &Input<E>) -> Self {
        Configuration {
            input: input.clone(),
            indices: (0..input.len()).collect(),
        }
    }

    /// The empty configuration over `input`.
    pub fn empty(input: &Input<E>) -> Self {
        Configuration {
            input: input.clone(),
            indices: Vec::new(),
        }
    }

    /// The `Input` this configuration selects indices into.
    pub fn input(&self) -> &Input<E> {
        &self.input
    }

    /// The number of indices retained.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no indices are retained.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The retained indices, in ascending order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Whether `index` (an index into the backing `Input`, not a position
    /// in this configuration) is retained.
    pub fn contains_index(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// A configuration over the sub-slice of indices at positions
    /// `range` (positions into the sorted index list, not index values).
    pub fn slice(&self, range: ops::Range<usize>) -> Self {
        Configuration {
            input: self.input.clone(),
            indices: self.indices[range].to_vec(),
        }
    }

    /// The configuration with its last retained index removed.
    ///
    /// Returns `self` unchanged if already empty.
    pub fn drop_last(&self) -> Self {
        if self.indices.is_empty() {
            self.clone()
        } else {
            self.slice(0..self.indices.len() - 1)
        }
    }

    /// The sorted union of `self` and `other`'s indices.
    ///
    /// # Errors
    ///
    /// `Error::InputMismatch` if the two configurations are bound to
    /// different `Input`s.
    pub fn union(&self, other: &Self) -> Result<Self> {
        if self.input != other.input {
            return Err(Error::InputMismatch);
        }
        Ok(Configuration {
            input: self.input.clone(),
            indices: merge_sorted_unique(&self.indices, &other.indices),
        })
    }

    /// The indices of `self` that are not present in `other`.
    ///
    /// # Errors
    ///
    /// `Error::InputMismatch` if the two configurations are bound to
    /// different `Input`s.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        if self.input != other.input {
            return Err(Error::InputMismatch);
        }
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|i| other.indices.binary_search(i).is_err())
            .collect();
        Ok(Configuration {
            input: self.input.clone(),
            indices,
        })
    }

    /// The n-way sorted union of `self` and `others`.
    ///
    /// # Errors
    ///
    /// `Error::InputMismatch` if any configuration is bound to a
    /// different `Input` than `self`.
    pub fn concat<'a, I>(&self, others: I) -> Result<Self>
    where
        E: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        let mut indices = self.indices.clone();
        for other in others {
            if self.input != other.input {
                return Err(Error::InputMismatch);
            }
            indices.extend_from_slice(&other.indices);
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(Configuration {
            input: self.input.clone(),
            indices,
        })
    }

    /// Materialize the selected elements.
    pub fn data(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.indices
            .iter()
            .map(|&i| self.input.get(i).clone())
            .collect()
    }
}

fn is_sorted_unique(indices: &[usize]) -> bool {
    indices.windows(2).all(|w| w[0] < w[1])
}

fn merge_sorted_unique(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

impl<E> Clone for Configuration<E> {
    fn clone(&self) -> Self {
        Configuration {
            input: self.input.clone(),
            indices: self.indices.clone(),
        }
    }
}

impl<E> PartialEq for Configuration<E> {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input && self.indices == other.indices
    }
}

impl<E> Eq for Configuration<E> {}

impl<E> Hash for Configuration<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.indices.hash(state);
    }
}

impl<E> fmt::Debug for Configuration<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("input_id", &self.input.id())
            .field("indices", &self.indices)
            .finish()
    }
}

/// Sugar for `union`, panicking on `Error::InputMismatch`.
///
/// Within a single algorithm run every configuration is provably drawn
/// from the same `Input`; a mismatch there is a programming error, not a
/// runtime condition the algorithm needs to recover from.
impl<E> ops::Add for Configuration<E> {
    type Output = Configuration<E>;

    fn add(self, rhs: Configuration<E>) -> Configuration<E> {
        self.union(&rhs).expect("Configuration::add: input mismatch")
    }
}

impl<E> ops::Add<&Configuration<E>> for Configuration<E> {
    type Output = Configuration<E>;

    fn add(self, rhs: &Configuration<E>) -> Configuration<E> {
        self.union(rhs).expect("Configuration::add: input mismatch")
    }
}

/// Sugar for `subtract`, panicking on `Error::InputMismatch`.
impl<E> ops::Sub for Configuration<E> {
    type Output = Configuration<E>;

    fn sub(self, rhs: Configuration<E>) -> Configuration<E> {
        self.subtract(&rhs)
            .expect("Configuration::sub: input mismatch")
    }
}

impl<E> ops::Sub<&Configuration<E>> for Configuration<E> {
    type Output = Configuration<E>;

    fn sub(self, rhs: &Configuration<E>) -> Configuration<E> {
        self.subtract(rhs)
            .expect("Configuration::sub: input mismatch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Input<i32> {
        Input::new(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9])
    }

    #[test]
    fn from_input_is_full() {
        let input = fixture();
        let c = Configuration::from_input(&input);
        assert_eq!(c.indices(), &(0..10).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn empty_has_no_indices() {
        let input = fixture();
        let c = Configuration::empty(&input);
        assert!(c.is_empty());
    }

    #[test]
    fn new_rejects_unsorted_or_duplicate() {
        let input = fixture();
        assert!(Configuration::new(input.clone(), vec![2, 1]).is_err());
        assert!(Configuration::new(input.clone(), vec![1, 1]).is_err());
        assert!(Configuration::new(input, vec![1, 2, 3]).is_ok());
    }

    #[test]
    fn union_merges_sorted_unique() {
        let input = fixture();
        let a = Configuration::new(input.clone(), vec![0, 2, 4]).unwrap();
        let b = Configuration::new(input, vec![2, 3, 4]).unwrap();
        let u = a.union(&b).unwrap();
        assert_eq!(u.indices(), &[0, 2, 3, 4]);
    }

    #[test]
    fn subtract_removes_shared_indices() {
        let input = fixture();
        let a = Configuration::new(input.clone(), vec![0, 2, 4]).unwrap();
        let b = Configuration::new(input, vec![2]).unwrap();
        let d = a.subtract(&b).unwrap();
        assert_eq!(d.indices(), &[0, 4]);
    }

    #[test]
    fn concat_is_n_way_union() {
        let input = fixture();
        let a = Configuration::new(input.clone(), vec![0]).unwrap();
        let b = Configuration::new(input.clone(), vec![1]).unwrap();
        let c = Configuration::new(input.clone(), vec![1, 2]).unwrap();
        let r = a.concat([&b, &c]).unwrap();
        assert_eq!(r.indices(), &[0, 1, 2]);
    }

    #[test]
    fn algebra_laws() {
        let input = fixture();
        let a = Configuration::new(input.clone(), vec![0, 1]).unwrap();
        let b = Configuration::new(input.clone(), vec![1, 2]).unwrap();
        let c = Configuration::new(input.clone(), vec![2, 3]).unwrap();

        assert_eq!(
            a.clone().union(&b).unwrap().union(&c).unwrap(),
            a.clone()
                .union(&b.union(&c).unwrap())
                .unwrap()
        );
        assert_eq!(a.clone().union(&a).unwrap(), a);
        let empty = Configuration::empty(&input);
        assert_eq!(a.clone().subtract(&a).unwrap(), empty);
        assert_eq!(a.clone().union(&empty).unwrap(), a);
    }

    #[test]
    fn input_mismatch_is_an_error() {
        let a = Configuration::from_input(&fixture());
        let b = Configuration::from_input(&fixture());
        assert!(matches!(a.union(&b), Err(Error::InputMismatch)));
    }

    #[test]
    fn data_materializes_elements() {
        let input = fixture();
        let c = Configuration::new(input, vec![0, 2]).unwrap();
        assert_eq!(c.data(), vec![0, 2]);
    }
}
