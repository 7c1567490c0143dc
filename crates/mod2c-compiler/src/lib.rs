//! mod2c front-end: scanner/parser pipeline for the Modula-2 bootstrap
//! subset.
//!
//! - `source` - character cursor with two-character lookahead and digest
//! - `token` - token kinds, tokens, and token sets
//! - `reswords` - reserved-word and bindable-identifier recognition
//! - `lexer` - token production with one-token lookahead
//! - `ast` - typed fixed-arity syntax tree
//! - `parser` - recursive descent with resync-set error recovery
//! - `deps` - import-prelude walker producing dependency lists
//! - `diagnostics` - error and warning collection
//! - `compilation` - facade tying one pipeline run together

pub mod ast;
pub mod compilation;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod reswords;
pub mod source;
pub mod token;

mod deps;

#[cfg(test)]
pub(crate) mod test_utils;

pub use ast::{Arity, AstError, Node, NodeKind, Value};
pub use compilation::{Compilation, CompileOptions, Parsed};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Position, Severity};

/// Fatal conditions. Everything else is collected in [`Diagnostics`] and
/// recovered from.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open source file: {0}")]
    SourceOpen(#[from] std::io::Error),

    #[error("end of file inside block comment opened at {pos}")]
    EofInBlockComment { pos: Position },

    #[error("end of file inside pragma opened at {pos}")]
    EofInPragma { pos: Position },
}

pub type Result<T> = std::result::Result<T, Error>;
