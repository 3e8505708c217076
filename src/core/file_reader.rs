//! Markdown input reading
//!
//! Provides consistent handling for:
//! - Files and stdin
//! - Non-UTF-8 input
//! - Oversized input
//! - Binary files

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default maximum input size in bytes (8 MB)
pub const DEFAULT_MAX_BYTES: usize = 8 * 1024 * 1024;

/// Strategy for handling non-UTF-8 content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingStrategy {
    /// Replace invalid bytes with U+FFFD
    #[default]
    Lossy,
    /// Fail on invalid UTF-8
    Strict,
}

/// Strategy for handling oversized input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeStrategy {
    /// Keep the first max_bytes and mark as truncated
    #[default]
    Truncate,
    /// Fail when input exceeds max_bytes
    Reject,
}

/// Configuration for input reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_bytes: usize,
    pub size_strategy: SizeStrategy,
    pub encoding_strategy: EncodingStrategy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            size_strategy: SizeStrategy::Truncate,
            encoding_strategy: EncodingStrategy::Lossy,
        }
    }
}

/// Where markdown comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `None` and `-` mean stdin
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => InputSource::File(path.to_path_buf()),
            _ => InputSource::Stdin,
        }
    }

    /// Display name used in errors and logs
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Errors raised while reading input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {0}")]
    NotFound(String),

    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{name} exceeds the {limit} byte input limit")]
    TooLarge { name: String, limit: usize },

    #[error("{name} looks like a binary file")]
    Binary { name: String },

    #[error("{name} is not valid UTF-8 (first invalid byte at offset {offset})")]
    InvalidUtf8 { name: String, offset: usize },
}

/// Markdown text read from an input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText {
    pub content: String,

    /// Whether the content was cut at max_bytes
    pub truncated: bool,

    /// Whether invalid bytes were replaced
    pub lossy_conversion: bool,
}

/// Read markdown from a file or stdin
pub fn read_input(source: &InputSource, config: &InputConfig) -> Result<InputText, InputError> {
    let name = source.name();
    match source {
        InputSource::Stdin => read_from(io::stdin().lock(), &name, config),
        InputSource::File(path) => {
            let file = File::open(path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => InputError::NotFound(name.clone()),
                _ => InputError::Io {
                    name: name.clone(),
                    source: e,
                },
            })?;
            read_from(file, &name, config)
        }
    }
}

/// Read markdown from any reader
pub fn read_from<R: Read>(
    reader: R,
    name: &str,
    config: &InputConfig,
) -> Result<InputText, InputError> {
    let mut bytes = Vec::new();
    reader
        .take((config.max_bytes as u64).saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| InputError::Io {
            name: name.to_string(),
            source: e,
        })?;

    let truncated = bytes.len() > config.max_bytes;
    if truncated {
        if config.size_strategy == SizeStrategy::Reject {
            return Err(InputError::TooLarge {
                name: name.to_string(),
                limit: config.max_bytes,
            });
        }
        bytes.truncate(config.max_bytes);
        log::debug!("{} truncated to {} bytes", name, config.max_bytes);
    }

    if crate::core::util::looks_binary(&bytes) {
        return Err(InputError::Binary {
            name: name.to_string(),
        });
    }

    let (content, lossy_conversion) = decode(bytes, name, truncated, config.encoding_strategy)?;

    Ok(InputText {
        content,
        truncated,
        lossy_conversion,
    })
}

fn decode(
    bytes: Vec<u8>,
    name: &str,
    truncated: bool,
    strategy: EncodingStrategy,
) -> Result<(String, bool), InputError> {
    let err = match String::from_utf8(bytes) {
        Ok(content) => return Ok((content, false)),
        Err(err) => err,
    };

    let utf8_error = err.utf8_error();
    let valid_up_to = utf8_error.valid_up_to();
    let bytes = err.into_bytes();

    // A character cut in half by truncation is dropped, not treated as invalid
    if truncated && utf8_error.error_len().is_none() {
        let content = String::from_utf8_lossy(&bytes[..valid_up_to]).into_owned();
        return Ok((content, false));
    }

    match strategy {
        EncodingStrategy::Strict => Err(InputError::InvalidUtf8 {
            name: name.to_string(),
            offset: valid_up_to,
        }),
        EncodingStrategy::Lossy => {
            log::warn!("{} is not valid UTF-8; invalid bytes replaced", name);
            Ok((String::from_utf8_lossy(&bytes).into_owned(), true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config(max_bytes: usize) -> InputConfig {
        InputConfig {
            max_bytes,
            ..InputConfig::default()
        }
    }

    #[test]
    fn test_input_source_from_arg() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some(Path::new("-"))), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some(Path::new("a.md"))),
            InputSource::File(PathBuf::from("a.md"))
        );
    }

    #[test]
    fn test_read_from_plain() {
        let text = read_from("# Hi\n".as_bytes(), "t", &InputConfig::default()).unwrap();
        assert_eq!(text.content, "# Hi\n");
        assert!(!text.truncated);
        assert!(!text.lossy_conversion);
    }

    #[test]
    fn test_read_from_truncates() {
        let text = read_from("abcdef".as_bytes(), "t", &config(4)).unwrap();
        assert_eq!(text.content, "abcd");
        assert!(text.truncated);
    }

    #[test]
    fn test_read_from_exact_limit_not_truncated() {
        let text = read_from("abcd".as_bytes(), "t", &config(4)).unwrap();
        assert_eq!(text.content, "abcd");
        assert!(!text.truncated);
    }

    #[test]
    fn test_truncation_drops_split_character() {
        let text = read_from("ab你".as_bytes(), "t", &config(3)).unwrap();
        assert_eq!(text.content, "ab");
        assert!(!text.lossy_conversion);
    }

    #[test]
    fn test_read_from_rejects_oversized() {
        let cfg = InputConfig {
            max_bytes: 2,
            size_strategy: SizeStrategy::Reject,
            ..InputConfig::default()
        };
        let err = read_from("abc".as_bytes(), "big.md", &cfg).unwrap_err();
        assert!(matches!(err, InputError::TooLarge { limit: 2, .. }));
        assert!(err.to_string().contains("big.md"));
    }

    #[test]
    fn test_read_from_lossy() {
        let text = read_from(&b"ok \xff done"[..], "t", &InputConfig::default()).unwrap();
        assert!(text.lossy_conversion);
        assert_eq!(text.content, "ok \u{FFFD} done");
    }

    #[test]
    fn test_read_from_strict_utf8() {
        let cfg = InputConfig {
            encoding_strategy: EncodingStrategy::Strict,
            ..InputConfig::default()
        };
        let err = read_from(&b"ok \xff"[..], "t", &cfg).unwrap_err();
        assert!(matches!(err, InputError::InvalidUtf8 { offset: 3, .. }));
    }

    #[test]
    fn test_read_from_binary() {
        let err = read_from(&b"\x00\x01\x02"[..], "blob", &InputConfig::default()).unwrap_err();
        assert!(matches!(err, InputError::Binary { .. }));
    }

    #[test]
    fn test_read_input_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "- item").unwrap();
        let source = InputSource::File(file.path().to_path_buf());
        let text = read_input(&source, &InputConfig::default()).unwrap();
        assert_eq!(text.content, "- item");
    }

    #[test]
    fn test_read_input_missing_file() {
        let source = InputSource::File(PathBuf::from("/definitely/not/here.md"));
        let err = read_input(&source, &InputConfig::default()).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
    }
}
