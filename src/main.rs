//! mdterm - Render markdown as styled terminal text
//!
//! mdterm provides:
//! - A block tokenizer for a fixed markdown subset
//! - Inline resolution of code, links, bold and italic with fixed precedence
//! - Terminal rendering with header, code, list and quote styling
//! - Structured token output (jsonl/json/outline)

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    cli::run(cli)
}
