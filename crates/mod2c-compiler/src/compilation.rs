//! High-level facade over the front-end pipeline.
//!
//! A [`Compilation`] binds a string pool, the pre-interned lexeme table,
//! and the option set; each `parse_*`/`dependencies_*` call runs one
//! single-threaded reader → lexer → parser pipeline over one source.

use std::path::Path;

use mod2c_core::{DependencyList, Pool};

use crate::Error;
use crate::ast::Node;
use crate::deps;
use crate::diagnostics::Diagnostics;
use crate::lexer::{Lexer, LexerOptions};
use crate::parser::Parser;
use crate::reswords::LexemeTable;
use crate::source::SourceReader;

/// Capability and diagnostic switches for one compilation.
#[derive(Clone, Copy, Debug)]
pub struct CompileOptions {
    pub lowline_identifiers: bool,
    pub dollar_identifiers: bool,
    pub escaped_tab_and_newline: bool,
    pub errant_semicolons: bool,
    pub lexer_trace: bool,
    pub parser_trace: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            lowline_identifiers: false,
            dollar_identifiers: false,
            escaped_tab_and_newline: true,
            errant_semicolons: false,
            lexer_trace: false,
            parser_trace: false,
        }
    }
}

/// Result of parsing one compilation unit.
pub struct Parsed {
    /// The `FILE` root owning the whole tree.
    pub root: Node,
    pub diagnostics: Diagnostics,
    /// Fatal condition that aborted scanning, if any. Diagnostics
    /// collected up to that point are still present.
    pub fatal: Option<Error>,
    /// Rolling source digest, present when end-of-file was reached.
    pub digest: Option<u32>,
    /// Number of source lines read.
    pub lines: u32,
}

impl Parsed {
    /// Whether the compilation ended without errors (fatal or counted).
    pub fn is_valid(&self) -> bool {
        self.fatal.is_none() && !self.diagnostics.has_errors()
    }
}

pub struct Compilation<'p> {
    pool: &'p Pool,
    table: LexemeTable,
    options: CompileOptions,
}

impl<'p> Compilation<'p> {
    pub fn new(pool: &'p Pool) -> Self {
        Self::with_options(pool, CompileOptions::default())
    }

    pub fn with_options(pool: &'p Pool, options: CompileOptions) -> Self {
        Self {
            pool,
            table: LexemeTable::new(pool),
            options,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    fn lexer_options(&self) -> LexerOptions {
        LexerOptions {
            lowline_identifiers: self.options.lowline_identifiers,
            dollar_identifiers: self.options.dollar_identifiers,
            escaped_tab_and_newline: self.options.escaped_tab_and_newline,
            trace: self.options.lexer_trace,
        }
    }

    /// Parse a compilation unit from a file.
    pub fn parse_file(&self, path: &Path) -> Result<Parsed, Error> {
        let reader = SourceReader::open(path)?;
        Ok(self.parse_reader(reader))
    }

    /// Parse a compilation unit from in-memory text.
    pub fn parse_text(&self, text: &str) -> Parsed {
        self.parse_reader(SourceReader::from_str(text))
    }

    fn parse_reader(&self, reader: SourceReader) -> Parsed {
        let lexer = Lexer::new(reader, self.pool, &self.table, self.lexer_options());
        let parser = Parser::new(
            lexer,
            self.pool,
            &self.table,
            self.options.errant_semicolons,
            self.options.parser_trace,
        );
        let outcome = parser.parse();
        Parsed {
            root: outcome.root,
            diagnostics: outcome.diagnostics,
            fatal: outcome.fatal,
            digest: outcome.digest,
            lines: outcome.lines,
        }
    }

    /// Produce the module dependency list of a file without an AST.
    pub fn dependencies_file(
        &self,
        path: &Path,
    ) -> Result<(DependencyList, Diagnostics, Option<Error>), Error> {
        let reader = SourceReader::open(path)?;
        Ok(self.dependencies_reader(reader))
    }

    /// Dependency list from in-memory text.
    pub fn dependencies_text(&self, text: &str) -> (DependencyList, Diagnostics, Option<Error>) {
        self.dependencies_reader(SourceReader::from_str(text))
    }

    fn dependencies_reader(
        &self,
        reader: SourceReader,
    ) -> (DependencyList, Diagnostics, Option<Error>) {
        let lexer = Lexer::new(reader, self.pool, &self.table, self.lexer_options());
        deps::collect(lexer, self.pool)
    }
}
