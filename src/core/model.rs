//! Token Model
//!
//! Block and inline tokens produced by the tokenizer and consumed by the renderer.
//! Both are plain, immutable values created fresh for every call.

use serde::{Deserialize, Serialize};

use crate::core::inline::parse_inline;

/// The kind of a block token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Header,
    CodeBlock,
    ListItem,
    Blockquote,
    Paragraph,
}

impl BlockKind {
    /// Whether blocks of this kind carry inline children
    pub fn is_inline_eligible(&self) -> bool {
        !matches!(self, BlockKind::CodeBlock)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Header => "header",
            BlockKind::CodeBlock => "code_block",
            BlockKind::ListItem => "list_item",
            BlockKind::Blockquote => "blockquote",
            BlockKind::Paragraph => "paragraph",
        }
    }
}

/// The kind of an inline token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKind {
    Text,
    Bold,
    Italic,
    InlineCode,
    Link,
}

impl InlineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InlineKind::Text => "text",
            InlineKind::Bold => "bold",
            InlineKind::Italic => "italic",
            InlineKind::InlineCode => "inline_code",
            InlineKind::Link => "link",
        }
    }
}

/// Kind-specific block metadata
///
/// Blockquotes and paragraphs carry none, and a code block without a
/// language tag carries none either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockMetadata {
    Header {
        level: u8,
    },
    CodeBlock {
        language: String,
    },
    ListItem {
        /// Raw count of leading whitespace characters
        indent: usize,
        ordered: bool,
        /// Item number for ordered items (None if it does not fit in a u64)
        number: Option<u64>,
    },
}

/// Link target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub url: String,
}

/// One inline span within a block's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineToken {
    pub kind: InlineKind,

    /// Displayed text (the link text for links)
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LinkMetadata>,
}

impl InlineToken {
    /// Create a plain text token
    pub fn text(content: impl Into<String>) -> Self {
        Self::styled(InlineKind::Text, content)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(InlineKind::Bold, content)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::styled(InlineKind::Italic, content)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::styled(InlineKind::InlineCode, content)
    }

    /// Create a link token; the URL goes into metadata
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: InlineKind::Link,
            content: content.into(),
            metadata: Some(LinkMetadata { url: url.into() }),
        }
    }

    fn styled(kind: InlineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            metadata: None,
        }
    }

    /// Link URL, if this is a link
    pub fn url(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.url.as_str())
    }
}

/// One top-level markdown element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockToken {
    pub kind: BlockKind,

    /// Raw source text of the block, before inline parsing
    pub content: String,

    /// Inline children; absent for code blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<InlineToken>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BlockMetadata>,
}

impl BlockToken {
    /// Create a header token (level is clamped to 1..=6)
    pub fn header(level: u8, content: impl Into<String>) -> Self {
        Self::with_inline(
            BlockKind::Header,
            content.into(),
            Some(BlockMetadata::Header {
                level: level.clamp(1, 6),
            }),
        )
    }

    /// Create a code block token; an empty language means no metadata
    pub fn code_block(content: impl Into<String>, language: Option<&str>) -> Self {
        let metadata = language
            .filter(|lang| !lang.is_empty())
            .map(|lang| BlockMetadata::CodeBlock {
                language: lang.to_string(),
            });
        Self {
            kind: BlockKind::CodeBlock,
            content: content.into(),
            children: None,
            metadata,
        }
    }

    /// Create a list item token
    pub fn list_item(
        content: impl Into<String>,
        indent: usize,
        ordered: bool,
        number: Option<u64>,
    ) -> Self {
        Self::with_inline(
            BlockKind::ListItem,
            content.into(),
            Some(BlockMetadata::ListItem {
                indent,
                ordered,
                number: if ordered { number } else { None },
            }),
        )
    }

    pub fn blockquote(content: impl Into<String>) -> Self {
        Self::with_inline(BlockKind::Blockquote, content.into(), None)
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::with_inline(BlockKind::Paragraph, content.into(), None)
    }

    fn with_inline(kind: BlockKind, content: String, metadata: Option<BlockMetadata>) -> Self {
        let children = parse_inline(&content);
        Self {
            kind,
            content,
            children: Some(children),
            metadata,
        }
    }

    /// Header level, if this is a header
    pub fn level(&self) -> Option<u8> {
        match self.metadata {
            Some(BlockMetadata::Header { level }) => Some(level),
            _ => None,
        }
    }

    /// Code block language tag, if any
    pub fn language(&self) -> Option<&str> {
        match &self.metadata {
            Some(BlockMetadata::CodeBlock { language }) => Some(language),
            _ => None,
        }
    }

    /// Inline children, or an empty slice for code blocks
    pub fn children(&self) -> &[InlineToken] {
        self.children.as_deref().unwrap_or(&[])
    }
}
