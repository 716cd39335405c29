//! The three flat reduction algorithms: `DdMin`, `ZipMin`, and `ProbDd`.
//!
//! `Hdd` (the fourth algorithm, which lifts any of these to a parse tree)
//! lives in [`crate::hdd`] instead, since it additionally depends on the
//! [`crate::node::Node`]/[`crate::hdd::Parser`] abstractions.

mod ddmin;
mod probdd;
mod zipmin;

pub use ddmin::DdMin;
pub use probdd::ProbDd;
pub use zipmin::ZipMin;
