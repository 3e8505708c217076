//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use mdterm::core::block::tokenize;
use mdterm::core::file_reader::{
    read_input, EncodingStrategy, InputConfig, InputSource, SizeStrategy, DEFAULT_MAX_BYTES,
};
use mdterm::core::inline::parse_inline;
use mdterm::core::output::{OutputConfig, OutputFormat, TokenWriter};
use mdterm::core::render::{
    RenderConfig, Renderer, DEFAULT_CODE_INDENT, DEFAULT_LIST_INDENT_WIDTH,
};

/// mdterm - render markdown for the terminal.
#[derive(Parser, Debug)]
#[command(name = "mdterm")]
#[command(
    author,
    version,
    about,
    long_about = r#"mdterm tokenizes markdown and renders it as styled terminal text.

It supports a fixed subset of markdown: ATX headers, fenced code blocks,
blockquotes, flat list items, paragraphs, and inline code, links, bold and italic.

Examples:
    mdterm render README.md
    cat notes.md | mdterm render
    mdterm tokens README.md --format outline
    mdterm inline 'Use `**code**` and [links](https://example.com)'
"#
)]
pub struct Cli {
    /// When to emit terminal styling (auto/always/never).
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ColorChoice::Auto,
        env = "MDTERM_COLOR",
        value_name = "WHEN",
        long_help = "When to emit terminal styling escape sequences.\n\n\
auto (default) follows NO_COLOR, CLICOLOR, CLICOLOR_FORCE and whether stdout is a terminal.\n\
always and never override that detection."
    )]
    pub color: ColorChoice,

    /// Disable colored output (same as --color never).
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG takes precedence when set."
    )]
    pub verbose: bool,

    /// Maximum number of input bytes to read.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_BYTES,
        env = "MDTERM_MAX_BYTES",
        value_name = "N",
        long_help = "Maximum number of input bytes to read. Larger input is truncated on a\n\
character boundary, or rejected with --strict-input."
    )]
    pub max_bytes: usize,

    /// Reject oversized or non-UTF-8 input instead of degrading it.
    #[arg(long, global = true)]
    pub strict_input: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color emission policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render markdown as styled terminal text.
    #[command(long_about = "Render markdown from FILE (or stdin when FILE is omitted or '-')\n\
as styled terminal text.\n\n\
Examples:\n\
  mdterm render README.md\n\
  mdterm render --code-indent 4 --no-link-urls notes.md\n")]
    Render {
        /// Markdown file ('-' or omitted for stdin).
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Spaces before each code block line.
        #[arg(long, default_value_t = DEFAULT_CODE_INDENT, value_name = "N")]
        code_indent: usize,

        /// Raw indent characters per list nesting level.
        #[arg(long, default_value_t = DEFAULT_LIST_INDENT_WIDTH, value_name = "N")]
        list_indent_width: usize,

        /// Do not print the URL after link text.
        #[arg(long)]
        no_link_urls: bool,
    },

    /// Print the block tokens of a markdown document.
    #[command(long_about = "Tokenize markdown from FILE (or stdin) and print the block tokens\n\
with their inline children.\n\n\
Formats:\n\
- jsonl: one JSON object per block (default)\n\
- json: a single JSON array\n\
- outline: an indented, human-readable tree\n")]
    Tokens {
        /// Markdown file ('-' or omitted for stdin).
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output format (jsonl/json/outline).
        #[arg(long, default_value = "jsonl", value_name = "FORMAT")]
        format: String,

        /// Pretty-print JSON/JSONL output with indentation.
        #[arg(long)]
        pretty: bool,
    },

    /// Print the inline tokens of a single string.
    Inline {
        /// Text to resolve.
        #[arg(value_name = "TEXT")]
        text: String,

        /// Output format (jsonl/json/outline).
        #[arg(long, default_value = "jsonl", value_name = "FORMAT")]
        format: String,

        /// Pretty-print JSON/JSONL output with indentation.
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    /// Log level implied by -q / -v
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }

    fn color_choice(&self) -> ColorChoice {
        if self.no_color {
            ColorChoice::Never
        } else {
            self.color
        }
    }

    fn input_config(&self) -> InputConfig {
        if self.strict_input {
            InputConfig {
                max_bytes: self.max_bytes,
                size_strategy: SizeStrategy::Reject,
                encoding_strategy: EncodingStrategy::Strict,
            }
        } else {
            InputConfig {
                max_bytes: self.max_bytes,
                ..InputConfig::default()
            }
        }
    }
}

fn read_markdown(file: Option<&std::path::Path>, config: &InputConfig) -> Result<String> {
    let source = InputSource::from_arg(file);
    let input = read_input(&source, config)
        .with_context(|| format!("Failed to read markdown from {}", source.name()))?;
    if input.truncated {
        log::warn!(
            "{} exceeded {} bytes; rendering the truncated prefix",
            source.name(),
            config.max_bytes
        );
    }
    Ok(input.content)
}

fn write_stdout(output: &str) -> Result<()> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output).context("Failed to write to stdout")
}

fn output_config(format: &str, pretty: bool) -> Result<OutputConfig> {
    let format: OutputFormat = format.parse().map_err(anyhow::Error::msg)?;
    Ok(OutputConfig::with_pretty(format, pretty))
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.color_choice() {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
    let input_config = cli.input_config();

    match cli.command {
        Commands::Render {
            file,
            code_indent,
            list_indent_width,
            no_link_urls,
        } => {
            let markdown = read_markdown(file.as_deref(), &input_config)?;
            let renderer = Renderer::with_config(RenderConfig {
                code_indent,
                list_indent_width,
                show_link_urls: !no_link_urls,
            });
            log::debug!("rendering {} bytes with {:?}", markdown.len(), renderer.config());
            renderer
                .render_to(&markdown, std::io::stdout().lock())
                .context("Failed to write to stdout")
        }
        Commands::Tokens {
            file,
            format,
            pretty,
        } => {
            let config = output_config(&format, pretty)?;
            let markdown = read_markdown(file.as_deref(), &input_config)?;
            let tokens = tokenize(&markdown);
            log::debug!("tokenized {} block tokens", tokens.len());
            write_stdout(&TokenWriter::with_config(config).blocks(&tokens))
        }
        Commands::Inline {
            text,
            format,
            pretty,
        } => {
            let config = output_config(&format, pretty)?;
            let tokens = parse_inline(&text);
            write_stdout(&TokenWriter::with_config(config).inlines(&tokens))
        }
    }
}
