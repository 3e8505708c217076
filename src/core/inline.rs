//! Inline content resolver
//!
//! Finds inline constructs inside a block's text and orders them without overlaps.
//!
//! Every construct type produces its own list of candidates. Candidates are then
//! accepted in fixed precedence order (inline code, link, bold, italic): a candidate
//! whose span intersects an already accepted span is dropped. The accepted set is
//! sorted by start once, and the gaps between matches become text tokens.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::{InlineKind, InlineToken};

/// Static regex for inline code: `code`
pub static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("Invalid CODE_RE regex"));

/// Static regex for links: [text](url)
pub static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\n]+)\)").expect("Invalid LINK_RE regex"));

/// Static regex for bold: **text** or __text__
pub static BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("Invalid BOLD_RE regex")
});

/// Construct types in precedence order
const PRECEDENCE: [InlineKind; 4] = [
    InlineKind::InlineCode,
    InlineKind::Link,
    InlineKind::Bold,
    InlineKind::Italic,
];

/// A candidate match: byte span in the source plus the captured payload
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    start: usize,
    end: usize,
    kind: InlineKind,
    content: String,
    url: Option<String>,
}

impl Candidate {
    fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }

    fn into_token(self) -> InlineToken {
        match self.url {
            Some(url) => InlineToken::link(self.content, url),
            None => InlineToken {
                kind: self.kind,
                content: self.content,
                metadata: None,
            },
        }
    }
}

/// Parse the inline constructs of a block's text
///
/// Returns an empty list for an empty string and a single text token for a
/// string without inline markup.
pub fn parse_inline(text: &str) -> Vec<InlineToken> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut accepted: Vec<Candidate> = Vec::new();
    for kind in PRECEDENCE {
        for candidate in find_candidates(text, kind) {
            if !accepted.iter().any(|a| a.overlaps(&candidate)) {
                accepted.push(candidate);
            }
        }
    }
    accepted.sort_by_key(|c| c.start);

    let mut tokens = Vec::with_capacity(accepted.len() * 2 + 1);
    let mut cursor = 0;
    for candidate in accepted {
        if candidate.start > cursor {
            tokens.push(InlineToken::text(&text[cursor..candidate.start]));
        }
        cursor = candidate.end;
        tokens.push(candidate.into_token());
    }
    if cursor < text.len() {
        tokens.push(InlineToken::text(&text[cursor..]));
    }

    tokens
}

/// Collect all non-overlapping candidates of one construct type
fn find_candidates(text: &str, kind: InlineKind) -> Vec<Candidate> {
    match kind {
        InlineKind::InlineCode => CODE_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(Candidate {
                    start: whole.start(),
                    end: whole.end(),
                    kind,
                    content: caps.get(1)?.as_str().to_string(),
                    url: None,
                })
            })
            .collect(),
        InlineKind::Link => LINK_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(Candidate {
                    start: whole.start(),
                    end: whole.end(),
                    kind,
                    content: caps.get(1)?.as_str().to_string(),
                    url: Some(caps.get(2)?.as_str().to_string()),
                })
            })
            .collect(),
        InlineKind::Bold => BOLD_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let inner = caps.get(1).or_else(|| caps.get(2))?;
                Some(Candidate {
                    start: whole.start(),
                    end: whole.end(),
                    kind,
                    content: inner.as_str().to_string(),
                    url: None,
                })
            })
            .collect(),
        InlineKind::Italic => find_italics(text),
        InlineKind::Text => Vec::new(),
    }
}

#[inline]
fn is_emphasis_delimiter(c: char) -> bool {
    c == '*' || c == '_'
}

/// Scan for *text* and _text_ spans
///
/// A delimiter only counts when it is a lone `*` or `_`: neither neighbour may be
/// another emphasis delimiter. The closer is the first lone delimiter of the same
/// character after a non-empty body on the same line.
fn find_italics(text: &str) -> Vec<Candidate> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let is_lone = |i: usize| {
        let before = i.checked_sub(1).map(|p| chars[p].1);
        let after = chars.get(i + 1).map(|&(_, c)| c);
        is_emphasis_delimiter(chars[i].1)
            && !before.is_some_and(is_emphasis_delimiter)
            && !after.is_some_and(is_emphasis_delimiter)
    };

    let mut candidates = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (open_at, delimiter) = chars[i];
        if !is_lone(i) {
            i += 1;
            continue;
        }

        let mut closer = None;
        let mut j = i + 1;
        while j < chars.len() && chars[j].1 != '\n' {
            if chars[j].1 == delimiter && j > i + 1 && is_lone(j) {
                closer = Some(j);
                break;
            }
            j += 1;
        }

        match closer {
            Some(j) => {
                let body_start = open_at + delimiter.len_utf8();
                let close_at = chars[j].0;
                candidates.push(Candidate {
                    start: open_at,
                    end: close_at + delimiter.len_utf8(),
                    kind: InlineKind::Italic,
                    content: text[body_start..close_at].to_string(),
                    url: None,
                });
                i = j + 1;
            }
            None => i += 1,
        }
    }

    candidates
}
