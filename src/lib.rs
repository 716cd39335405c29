//! A generic delta-debugging core: configuration algebra, oracle caches,
//! and the DDMin/ZipMin/ProbDD/HDD minimization algorithms.
//!
//! Given a failure-inducing [`Input`] and an oracle that classifies
//! [`Configuration`]s as [`Outcome::Pass`]/[`Outcome::Fail`]/
//! [`Outcome::Unresolved`], an [`Algorithm`] produces a locally minimal
//! sub-configuration that still induces `Fail`. [`Debugger`] wires an
//! algorithm and an oracle together and orchestrates a single run.
//!
//! Concrete parsers, subprocess-backed oracles, and CLI/reporting
//! front-ends are external collaborators and out of scope for this crate
//! -- it depends only on the [`hdd::Parser`] trait and a plain
//! `FnMut(&Configuration<E>) -> Result<Outcome>` closure.

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod algorithm;
pub mod algorithms;
pub mod cache;
pub mod configuration;
pub mod counter;
pub mod debugger;
pub mod error;
pub mod hdd;
pub mod input;
pub mod load;
pub mod node;
pub mod outcome;

pub use algorithm::{test, Algorithm, Oracle};
pub use algorithms::{DdMin, ProbDd, ZipMin};
pub use cache::{Cache, HashCache, TreeCache};
pub use configuration::Configuration;
pub use counter::Counter;
pub use debugger::Debugger;
pub use error::{Error, Result};
pub use hdd::{Hdd, Parser};
pub use input::Input;
pub use node::Node;
pub use outcome::Outcome;
