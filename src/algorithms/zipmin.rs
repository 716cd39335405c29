//! A coarse-to-fine byte/element reducer with post-pass single-element
//! trimming.

use log::debug;

use crate::algorithm::{test, Algorithm, Oracle};
use crate::cache::Cache;
use crate::configuration::Configuration;
use crate::error::Result;
use crate::input::Input;
use crate::outcome::Outcome;

/// `ZipMin`: alternates a fragment-removal phase (tries dropping
/// contiguous chunks of decreasing size) with a single-element trim phase
/// that mops up the chunk phase's `deficit` — fragments that were
/// individually essential even though the chunk as a whole was dropped.
///
/// Does not guarantee 1-minimality (see `DdMin` for that); designed for
/// byte-oriented inputs where a chunked, phase-based search converges
/// faster than element-at-a-time search.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZipMin;

impl ZipMin {
    /// A new `ZipMin` instance. `ZipMin` holds no state between runs.
    pub fn new() -> Self {
        ZipMin
    }

    /// Test removing the last element of `config`. Returns the updated
    /// `(pre, config, post)` triple: on FAIL the element stays removed; on
    /// non-FAIL it's moved into `post` instead.
    #[allow(clippy::type_complexity)]
    fn remove_last_element<E>(
        oracle: &mut Oracle<E>,
        pre: &Configuration<E>,
        config: &Configuration<E>,
        post: &Configuration<E>,
        cache: Option<&mut dyn Cache<E>>,
    ) -> Result<(Configuration<E>, Configuration<E>, Configuration<E>)> {
        let trimmed = config.drop_last();
        let candidate = pre
            .concat([&trimmed, post])
            .expect("pre/config/post share an input");
        let outcome = test(oracle, &candidate, cache)?;
        debug!("testing configuration by removing last element => {outcome:?}");

        if outcome == Outcome::Fail {
            Ok((pre.clone(), trimmed, post.clone()))
        } else {
            let last = config.slice(config.len() - 1..config.len());
            let new_post = last
                .concat([post])
                .expect("last element and post share an input");
            Ok((pre.clone(), trimmed, new_post))
        }
    }

    /// Walk `config` in fragments of `length`, testing whether each
    /// fragment can be dropped. Returns the surviving configuration and
    /// the deficit: how many fragments were dropped beyond what the final
    /// size reduction accounts for (fragments whose *individual* elements
    /// turned out to matter, once recombined with later fragments).
    fn remove_check_each_fragment<E>(
        oracle: &mut Oracle<E>,
        pre: &Configuration<E>,
        config: &Configuration<E>,
        post: &Configuration<E>,
        length: usize,
        mut cache: Option<&mut dyn Cache<E>>,
    ) -> Result<(Configuration<E>, usize)> {
        let mut kept = Configuration::empty(config.input());
        let mut removed_count = 0usize;
        let len = config.len();

        let mut i = 0;
        while i < len {
            let end = (i + length).min(len);
            let remaining = config.slice(end..len);
            let candidate = pre
                .concat([&kept, &remaining, post])
                .expect("pre/kept/remaining/post share an input");
            let outcome = test(oracle, &candidate, cache.as_deref_mut())?;
            debug!("testing configuration by removing fragment [{i}, {end}) => {outcome:?}");

            if outcome != Outcome::Fail {
                let fragment = config.slice(i..end);
                kept = kept.concat([&fragment]).expect("kept/fragment share an input");
            } else {
                removed_count += 1;
            }

            i += length;
        }

        let deficit = removed_count.saturating_sub(len - kept.len());
        Ok((kept, deficit))
    }
}

impl<E> Algorithm<E> for ZipMin {
    fn name(&self) -> String {
        "zipmin".to_string()
    }

    fn run(
        &self,
        input: &Input<E>,
        oracle: &mut Oracle<E>,
        mut cache: Option<&mut dyn Cache<E>>,
    ) -> Result<Configuration<E>> {
        debug!("starting zipmin algorithm");

        let mut config = Configuration::from_input(input);
        let mut length = config.len() / 2;
        let mut fragment_phase = true;
        let mut deficit = 0usize;
        let mut pre = Configuration::empty(input);
        let mut post = Configuration::empty(input);

        while length > 0 && !config.is_empty() {
            if fragment_phase {
                let (kept, new_deficit) = Self::remove_check_each_fragment(
                    oracle,
                    &pre,
                    &config,
                    &post,
                    length,
                    cache.as_deref_mut(),
                )?;
                if kept == config {
                    length /= 2;
                }
                deficit = new_deficit;
                config = kept;
            } else {
                for _ in 0..deficit {
                    let (new_pre, new_config, new_post) = Self::remove_last_element(
                        oracle,
                        &pre,
                        &config,
                        &post,
                        cache.as_deref_mut(),
                    )?;
                    pre = new_pre;
                    config = new_config;
                    post = new_post;
                }
                deficit = 0;
            }
            fragment_phase = !fragment_phase;
        }

        let result = pre
            .concat([&config, &post])
            .expect("pre/config/post share an input");
        debug!("zipmin algorithm completed with {} elements", result.len());
        Ok(result)
    }
}
