//! Zeller's minimizing delta debugging.

use log::debug;

use crate::algorithm::{test, Algorithm, Oracle};
use crate::cache::Cache;
use crate::configuration::Configuration;
use crate::error::Result;
use crate::input::Input;
use crate::outcome::Outcome;

/// Zeller's `ddmin`: partitions the current configuration into
/// `granularity` nearly-equal contiguous chunks, tests each chunk's
/// complement, and on the first FAIL restarts from that complement with a
/// coarser granularity. When no complement fails, granularity doubles.
///
/// Guarantees 1-minimality: for every single-element subset of the
/// result, removing it yields a non-FAIL outcome.
#[derive(Copy, Clone, Debug, Default)]
pub struct DdMin;

impl DdMin {
    /// A new `DdMin` instance. `DdMin` holds no state between runs.
    pub fn new() -> Self {
        DdMin
    }

    /// The `granularity` complements of `config`: for `i` in
    /// `0..granularity`, the configuration with the `i`th of `granularity`
    /// nearly-equal contiguous chunks removed.
    fn complements<E>(config: &Configuration<E>, granularity: usize) -> Vec<Configuration<E>> {
        let len = config.len();
        let mut out = Vec::with_capacity(granularity);
        let mut start = 0;
        for i in 0..granularity {
            let end = start + (len - start) / (granularity - i);
            let pre = config.slice(0..start);
            let post = config.slice(end..len);
            let complement = pre
                .concat([&post])
                .expect("complement halves share config's input");
            out.push(complement);
            start = end;
        }
        out
    }
}

impl<E> Algorithm<E> for DdMin {
    fn name(&self) -> String {
        "ddmin".to_string()
    }

    fn run(
        &self,
        input: &Input<E>,
        oracle: &mut Oracle<E>,
        mut cache: Option<&mut dyn Cache<E>>,
    ) -> Result<Configuration<E>> {
        debug!("starting ddmin algorithm");

        let mut config = Configuration::from_input(input);
        let mut granularity = 2usize;

        while config.len() >= 2 {
            let mut reducible = false;

            for complement in Self::complements(&config, granularity) {
                let outcome = test(oracle, &complement, cache.as_deref_mut())?;
                debug!(
                    "testing complement with granularity {granularity}: {} elements => {outcome:?}",
                    complement.len()
                );
                if outcome == Outcome::Fail {
                    config = complement;
                    granularity = (granularity - 1).max(2);
                    reducible = true;
                    break;
                }
            }

            if reducible {
                continue;
            }

            if granularity < config.len() {
                granularity = (granularity * 2).min(config.len());
            } else {
                break;
            }
        }

        debug!("ddmin algorithm completed with {} elements", config.len());
        Ok(config)
    }
}
