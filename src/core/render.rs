//! Renderer module
//!
//! Renders block tokens to a styled string for terminal display.
//!
//! Styling is requested through `colored`; whether escape sequences are actually
//! emitted is up to `colored`'s environment detection or an override installed by
//! the caller.

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::core::block::tokenize;
use crate::core::model::{BlockKind, BlockMetadata, BlockToken, InlineKind, InlineToken};

/// Default number of spaces before each code block line
pub const DEFAULT_CODE_INDENT: usize = 2;

/// Default number of raw indent characters per list nesting level
pub const DEFAULT_LIST_INDENT_WIDTH: usize = 2;

/// Render configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Spaces placed before every code block line
    pub code_indent: usize,

    /// Raw indent characters that make up one list nesting level
    pub list_indent_width: usize,

    /// Append ` (url)` after link text
    pub show_link_urls: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            code_indent: DEFAULT_CODE_INDENT,
            list_indent_width: DEFAULT_LIST_INDENT_WIDTH,
            show_link_urls: true,
        }
    }
}

/// Extra emphasis layered over inline styles (used for headers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Emphasis {
    bold: bool,
    underline: bool,
    dimmed: bool,
}

impl Emphasis {
    /// Header style table
    fn for_level(level: u8) -> Self {
        match level {
            1 => Self {
                bold: true,
                underline: true,
                dimmed: false,
            },
            2 => Self {
                bold: true,
                ..Self::default()
            },
            3 => Self {
                bold: true,
                dimmed: true,
                ..Self::default()
            },
            _ => Self {
                dimmed: true,
                ..Self::default()
            },
        }
    }

    fn apply(self, mut styled: ColoredString) -> ColoredString {
        if self.bold {
            styled = styled.bold();
        }
        if self.underline {
            styled = styled.underline();
        }
        if self.dimmed {
            styled = styled.dimmed();
        }
        styled
    }
}

/// Renderer for markdown text
///
/// Holds only its configuration; every call tokenizes afresh.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render markdown text to a styled string
    pub fn render(&self, text: &str) -> String {
        self.render_tokens(&tokenize(text))
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, text: &str, mut writer: W) -> std::io::Result<()> {
        let output = self.render(text);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render already tokenized blocks
    pub fn render_tokens(&self, tokens: &[BlockToken]) -> String {
        let mut output = String::new();

        for (idx, token) in tokens.iter().enumerate() {
            output.push_str(&self.render_block(token));

            let next_kind = tokens.get(idx + 1).map(|t| t.kind);
            match (token.kind, next_kind) {
                (BlockKind::ListItem, Some(BlockKind::ListItem)) => output.push('\n'),
                _ => output.push_str("\n\n"),
            }
        }

        output.trim_end().to_string()
    }

    fn render_block(&self, token: &BlockToken) -> String {
        match token.kind {
            BlockKind::Header => {
                let emphasis = Emphasis::for_level(token.level().unwrap_or(1));
                self.render_inline(token.children(), emphasis)
            }
            BlockKind::CodeBlock => self.render_code_block(token),
            BlockKind::ListItem => self.render_list_item(token),
            BlockKind::Blockquote => {
                let body = self.render_inline(token.children(), Emphasis::default());
                body.split('\n')
                    .map(|line| {
                        if line.is_empty() {
                            "│".dimmed().to_string()
                        } else {
                            format!("{}{}", "│ ".dimmed(), line)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            BlockKind::Paragraph => self.render_inline(token.children(), Emphasis::default()),
        }
    }

    fn render_code_block(&self, token: &BlockToken) -> String {
        let indent = " ".repeat(self.config.code_indent);
        let mut lines = Vec::new();

        if let Some(language) = token.language() {
            lines.push(format!("[{}]", language).dimmed().to_string());
        }
        let body = if token.content.is_empty() {
            Vec::new()
        } else {
            token.content.split('\n').collect()
        };
        for line in body {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}{}", indent, line.bright_black()));
            }
        }

        lines.join("\n")
    }

    fn render_list_item(&self, token: &BlockToken) -> String {
        let (indent, marker) = match &token.metadata {
            Some(BlockMetadata::ListItem {
                indent,
                ordered: true,
                number: Some(number),
            }) => (*indent, format!("{}.", number)),
            Some(BlockMetadata::ListItem { indent, .. }) => (*indent, "-".to_string()),
            _ => (0, "-".to_string()),
        };
        let depth = indent / self.config.list_indent_width.max(1);

        format!(
            "{}{} {}",
            "  ".repeat(depth),
            marker,
            self.render_inline(token.children(), Emphasis::default())
        )
    }

    /// Render inline tokens, styling each source line separately
    fn render_inline(&self, children: &[InlineToken], emphasis: Emphasis) -> String {
        let mut output = String::new();

        for token in children {
            for (idx, piece) in token.content.split('\n').enumerate() {
                if idx > 0 {
                    output.push('\n');
                }
                if !piece.is_empty() {
                    output.push_str(&emphasis.apply(style_inline(token.kind, piece)).to_string());
                }
            }

            if let (true, Some(url)) = (self.config.show_link_urls, token.url()) {
                output.push(' ');
                output.push_str(&emphasis.apply(format!("({})", url).dimmed()).to_string());
            }
        }

        output
    }
}

/// Base style for one inline token kind
fn style_inline(kind: InlineKind, text: &str) -> ColoredString {
    match kind {
        InlineKind::Text => text.normal(),
        InlineKind::Bold => text.bold(),
        InlineKind::Italic => text.italic(),
        InlineKind::InlineCode => text.cyan(),
        InlineKind::Link => text.blue().underline(),
    }
}

/// Render markdown text with the default configuration
pub fn render(text: &str) -> String {
    Renderer::new().render(text)
}
