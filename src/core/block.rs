//! Block tokenizer
//!
//! Scans markdown line by line and emits a flat list of block tokens.
//!
//! Supported blocks, checked in this order for every line that starts a block:
//! - fenced code (```lang ... ```), unterminated fences are flushed at end of input
//! - ATX headers (`#` to `######` followed by whitespace)
//! - blockquotes (`>`), consecutive lines merged
//! - unordered (`-`/`*`) and ordered (`1.`) list items, one token per line
//! - blank lines, which only separate blocks
//! - paragraphs, consecutive plain lines merged

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::BlockToken;

/// Static regex for a fence opener: ``` optionally followed by a language word
pub static FENCE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(\w*)$").expect("Invalid FENCE_OPEN_RE regex"));

/// Static regex for a bare fence closer
pub static FENCE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```$").expect("Invalid FENCE_CLOSE_RE regex"));

/// Static regex for headers: 1-6 hashes, whitespace, content
pub static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").expect("Invalid HEADER_RE regex"));

/// Static regex for blockquote lines
pub static BLOCKQUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^>\s?(.*)$").expect("Invalid BLOCKQUOTE_RE regex"));

/// Static regex for unordered list items: indent, `-` or `*`, spaces, content
pub static UNORDERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)[-*] +(.+)$").expect("Invalid UNORDERED_RE regex"));

/// Static regex for ordered list items: indent, digits, `.`, spaces, content
pub static ORDERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(\d+)\. +(.+)$").expect("Invalid ORDERED_RE regex"));

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    FenceOpen {
        language: &'a str,
    },
    Header {
        level: u8,
        content: &'a str,
    },
    Blockquote {
        content: &'a str,
    },
    ListItem {
        indent: usize,
        ordered: bool,
        number: Option<u64>,
        content: &'a str,
    },
    Blank,
    Text,
}

/// Classify a line by the fixed dispatch priority
fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = FENCE_OPEN_RE.captures(line) {
        return Line::FenceOpen {
            language: caps.get(1).map(|m| m.as_str()).unwrap_or(""),
        };
    }

    if let Some(caps) = HEADER_RE.captures(line) {
        let level = caps.get(1).map(|m| m.as_str().len()).unwrap_or(1) as u8;
        return Line::Header {
            level,
            content: caps.get(2).map(|m| m.as_str().trim()).unwrap_or(""),
        };
    }

    if let Some(caps) = BLOCKQUOTE_RE.captures(line) {
        return Line::Blockquote {
            content: caps.get(1).map(|m| m.as_str()).unwrap_or(""),
        };
    }

    if let Some(caps) = UNORDERED_RE.captures(line) {
        return Line::ListItem {
            indent: caps.get(1).map(|m| m.as_str().chars().count()).unwrap_or(0),
            ordered: false,
            number: None,
            content: caps.get(2).map(|m| m.as_str()).unwrap_or(""),
        };
    }

    if let Some(caps) = ORDERED_RE.captures(line) {
        return Line::ListItem {
            indent: caps.get(1).map(|m| m.as_str().chars().count()).unwrap_or(0),
            ordered: true,
            number: caps.get(2).and_then(|m| m.as_str().parse().ok()),
            content: caps.get(3).map(|m| m.as_str()).unwrap_or(""),
        };
    }

    if line.trim().is_empty() {
        return Line::Blank;
    }

    Line::Text
}

/// Tokenize markdown into block tokens
///
/// Never fails: anything unrecognized becomes paragraph text. Empty input
/// yields an empty list.
pub fn tokenize(text: &str) -> Vec<BlockToken> {
    let lines: Vec<&str> = text.lines().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match classify(lines[i]) {
            Line::FenceOpen { language } => {
                i += 1;
                let start = i;
                while i < lines.len() && !FENCE_CLOSE_RE.is_match(lines[i]) {
                    i += 1;
                }
                let code = lines[start..i].join("\n");
                if i < lines.len() {
                    // Skip the closing fence
                    i += 1;
                } else {
                    log::trace!(
                        "unterminated code fence flushed at end of input ({} lines)",
                        i - start
                    );
                }
                tokens.push(BlockToken::code_block(code, Some(language)));
            }
            Line::Header { level, content } => {
                tokens.push(BlockToken::header(level, content));
                i += 1;
            }
            Line::Blockquote { .. } => {
                let mut quoted = Vec::new();
                while i < lines.len() {
                    match BLOCKQUOTE_RE.captures(lines[i]) {
                        Some(caps) => quoted.push(caps.get(1).map(|m| m.as_str()).unwrap_or("")),
                        None => break,
                    }
                    i += 1;
                }
                tokens.push(BlockToken::blockquote(quoted.join("\n")));
            }
            Line::ListItem {
                indent,
                ordered,
                number,
                content,
            } => {
                tokens.push(BlockToken::list_item(content, indent, ordered, number));
                i += 1;
            }
            Line::Blank => i += 1,
            Line::Text => {
                let start = i;
                while i < lines.len() && classify(lines[i]) == Line::Text {
                    i += 1;
                }
                tokens.push(BlockToken::paragraph(lines[start..i].join("\n")));
            }
        }
    }

    tokens
}
