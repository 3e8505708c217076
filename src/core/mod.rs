//! Core module - Tokenizing and rendering markdown
//!
//! This module provides:
//! - Block and inline token model
//! - Block tokenizer
//! - Inline content resolver
//! - Terminal renderer
//! - Structured token output (jsonl/json/outline)
//! - Input reading strategies

pub mod block;
pub mod file_reader;
pub mod inline;
pub mod model;
pub mod output;
pub mod render;
pub mod util;
