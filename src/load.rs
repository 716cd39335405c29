//! File-loading helpers for building an initial `Input`/`Configuration`
//! pair from disk.
//!
//! A collaborator, not a core type -- nothing in the rest of this crate
//! depends on this module.

use std::fs;
use std::path::Path;

use crate::configuration::Configuration;
use crate::error::Result;
use crate::input::Input;

/// Load `path`'s full contents as a byte `Input`, plus the full
/// `Configuration` over it.
pub fn load_binary(path: impl AsRef<Path>) -> Result<(Input<u8>, Configuration<u8>)> {
    let bytes = fs::read(path)?;
    let input = Input::new(bytes);
    let config = Configuration::from_input(&input);
    Ok((input, config))
}

/// Load `path`'s full contents as a `char` `Input` (decoded as UTF-8),
/// plus the full `Configuration` over it.
pub fn load_text(path: impl AsRef<Path>) -> Result<(Input<char>, Configuration<char>)> {
    let text = fs::read_to_string(path)?;
    let input = Input::new(text.chars().collect());
    let config = Configuration::from_input(&input);
    Ok((input, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path(name: &str) -> std::path::PathBuf {
        let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("delta-debugging-load-test-{name}-{unique}"))
    }

    #[test]
    fn load_binary_reads_full_contents() {
        let path = temp_path("binary");
        fs::write(&path, b"\x00\x01\xffhello").unwrap();

        let (input, config) = load_binary(&path).unwrap();
        assert_eq!(input.len(), 8);
        assert_eq!(config.len(), 8);
        assert_eq!(config.data(), b"\x00\x01\xffhello".to_vec());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_text_reads_full_contents() {
        let path = temp_path("text");
        fs::write(&path, "hello world").unwrap();

        let (input, config) = load_text(&path).unwrap();
        assert_eq!(input.len(), 11);
        assert_eq!(config.data().into_iter().collect::<String>(), "hello world");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_binary_missing_file_errors() {
        let path = temp_path("missing");
        assert!(load_binary(&path).is_err());
    }
}
