//! mdterm - Render markdown for the terminal
//!
//! Three stages, each feeding the next:
//! - `tokenize` turns markdown into a flat list of block tokens
//! - `parse_inline` resolves inline code, links, bold and italic inside a block
//! - `render` maps the tokens to a styled string
//!
//! ```
//! let styled = mdterm::render("# Results\n\nFound **3** matches");
//! assert!(styled.contains("Results"));
//! ```

pub mod core;

pub use crate::core::block::tokenize;
pub use crate::core::inline::parse_inline;
pub use crate::core::model::{
    BlockKind, BlockMetadata, BlockToken, InlineKind, InlineToken, LinkMetadata,
};
pub use crate::core::render::{render, RenderConfig, Renderer};
