//! Position-preserving JSON text handling.
//!
//! This module contains the tolerant parsing layer:
//! - [`scanner`] - lexical scanning with byte spans
//! - [`parser`] - recovering parser producing a [`SyntaxNode`] tree
//! - [`position`] - byte-offset to line/column conversion

pub mod parser;
pub mod position;
pub mod scanner;

pub use parser::{NodeKind, ParseError, ParseOutcome, SyntaxNode, parse};
pub use position::LineIndex;
