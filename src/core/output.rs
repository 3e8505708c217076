//! Structured token output
//!
//! Writes block or inline tokens as jsonl, json or a readable outline.

use serde::Serialize;

use crate::core::model::{BlockMetadata, BlockToken, InlineToken};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Outline,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "outline" | "tree" => Ok(OutputFormat::Outline),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Output configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new output config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Writer for token lists
pub struct TokenWriter {
    config: OutputConfig,
}

impl TokenWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: OutputConfig::new(format),
        }
    }

    pub fn with_config(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Format block tokens
    pub fn blocks(&self, tokens: &[BlockToken]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(tokens),
            OutputFormat::Json => self.json(tokens),
            OutputFormat::Outline => {
                let mut output = String::new();
                for token in tokens {
                    outline_block(&mut output, token);
                }
                output.trim_end().to_string()
            }
        }
    }

    /// Format inline tokens
    pub fn inlines(&self, tokens: &[InlineToken]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(tokens),
            OutputFormat::Json => self.json(tokens),
            OutputFormat::Outline => {
                let mut output = String::new();
                for token in tokens {
                    outline_inline(&mut output, token, 0);
                }
                output.trim_end().to_string()
            }
        }
    }

    /// One JSON object per line
    fn jsonl<T: Serialize>(&self, items: &[T]) -> String {
        items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// A single JSON array
    fn json<T: Serialize>(&self, items: &[T]) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

fn outline_block(output: &mut String, token: &BlockToken) {
    output.push_str(token.kind.as_str());
    match &token.metadata {
        Some(BlockMetadata::Header { level }) => output.push_str(&format!(" [level={}]", level)),
        Some(BlockMetadata::CodeBlock { language }) => {
            output.push_str(&format!(" [language={}]", language))
        }
        Some(BlockMetadata::ListItem {
            indent,
            ordered,
            number,
        }) => {
            output.push_str(&format!(" [indent={} ordered={}", indent, ordered));
            if let Some(number) = number {
                output.push_str(&format!(" number={}", number));
            }
            output.push(']');
        }
        None => {}
    }
    output.push_str(&format!(": {:?}\n", token.content));

    for child in token.children() {
        outline_inline(output, child, 1);
    }
}

fn outline_inline(output: &mut String, token: &InlineToken, depth: usize) {
    output.push_str(&"  ".repeat(depth));
    output.push_str(token.kind.as_str());
    if let Some(url) = token.url() {
        output.push_str(&format!(" [url={}]", url));
    }
    output.push_str(&format!(": {:?}\n", token.content));
}
