//! The ternary verdict an oracle returns for a configuration.

use serde_derive::{Deserialize, Serialize};

/// The result of testing a `Configuration` against the failure condition
/// under investigation.
///
/// `Unresolved` is treated identically to `Pass` for the purpose of
/// driving reduction: the target outcome an algorithm searches for is
/// always `Fail`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The configuration does not induce the failure.
    Pass,
    /// The configuration induces the failure.
    Fail,
    /// The test did not reproduce in a well-defined way and must be
    /// discarded.
    Unresolved,
}

impl Outcome {
    /// Whether this outcome should drive the algorithm to keep retaining
    /// the tested configuration.
    pub fn is_fail(self) -> bool {
        self == Outcome::Fail
    }
}
