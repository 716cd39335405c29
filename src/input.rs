//! The immutable backing sequence a `Configuration` selects indices into.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// An immutable, reference-counted, generic-over-`E` failure-inducing
/// input.
///
/// Two `Input`s constructed from equal data are still distinct identities;
/// a `Configuration` is bound to exactly one `Input` by that identity, not
/// by structural equality of its contents. `E` is never required to be
/// `Eq`/`Hash`/`Debug` by `Input` itself so that identity-only comparisons
/// (cheap, and all `Configuration` needs) don't force those bounds onto
/// callers who never inspect the elements.
pub struct Input<E> {
    id: u64,
    data: Arc<Vec<E>>,
}

impl<E> Input<E> {
    /// Wrap `data` as a new `Input` with a fresh, process-unique identity.
    pub fn new(data: Vec<E>) -> Self {
        Input {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            data: Arc::new(data),
        }
    }

    /// This input's process-unique identity.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The number of elements in this input.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this input has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> &E {
        &self.data[index]
    }

    /// Borrow the full backing slice.
    pub fn as_slice(&self) -> &[E] {
        &self.data
    }
}

impl<E> Clone for Input<E> {
    fn clone(&self) -> Self {
        Input {
            id: self.id,
            data: Arc::clone(&self.data),
        }
    }
}

impl<E> PartialEq for Input<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for Input<E> {}

impl<E> Hash for Input<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<E> fmt::Debug for Input<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Input")
            .field("id", &self.id)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_identity_even_if_equal_content() {
        let a = Input::new(vec![1, 2, 3]);
        let b = Input::new(vec![1, 2, 3]);
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clone_shares_identity() {
        let a = Input::new(vec![1, 2, 3]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn get_and_len() {
        let input = Input::new(vec!['a', 'b', 'c']);
        assert_eq!(input.len(), 3);
        assert_eq!(*input.get(1), 'b');
        assert!(!input.is_empty());
    }
}
