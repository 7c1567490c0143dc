//! Predictive recursive-descent parser with one-token lookahead.
//!
//! Each grammar production is a routine that dispatches on the current
//! token, consumes what it expects, descends, and assembles an AST node
//! bottom-up. Two helpers carry the error-recovery contract everywhere:
//!
//! - [`Parser::match_token`]: consume the expected kind, or report and
//!   skip ahead until the current token is in the production's resync set.
//! - [`Parser::match_set`]: accept when the current token is in a FIRST
//!   set, or report and resync likewise.
//!
//! Resync sets are named constants in [`sets`], derived from the
//! grammar's FOLLOW relation. Routines continue from the resync point
//! instead of aborting, so one run reports many errors and always
//! terminates.

mod grammar;
pub(crate) mod sets;

#[cfg(test)]
mod tests;

use mod2c_core::{Pool, Symbol};

use crate::Error;
use crate::ast::{Node, NodeKind};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Position};
use crate::lexer::Lexer;
use crate::reswords::LexemeTable;
use crate::token::{Token, TokenKind, TokenSet};

pub struct Parser<'p> {
    lexer: Lexer<'p>,
    pool: &'p Pool,
    table: &'p LexemeTable,
    /// Warn about redundant semicolons.
    errant_semicolons: bool,
    /// Print each entered production to stderr.
    trace: bool,
    depth: usize,
}

/// Everything a finished parse hands back to the facade.
pub struct ParseOutcome {
    pub root: Node,
    pub diagnostics: Diagnostics,
    pub fatal: Option<Error>,
    pub digest: Option<u32>,
    pub lines: u32,
}

impl<'p> Parser<'p> {
    pub fn new(
        lexer: Lexer<'p>,
        pool: &'p Pool,
        table: &'p LexemeTable,
        errant_semicolons: bool,
        trace: bool,
    ) -> Self {
        let mut parser = Self {
            lexer,
            pool,
            table,
            errant_semicolons,
            trace,
            depth: 0,
        };
        parser.skip_pragmas();
        parser
    }

    /// Parse one compilation unit and tear down.
    pub fn parse(mut self) -> ParseOutcome {
        let root = self.parse_compilation_unit();
        let (diagnostics, fatal, digest, lines) = self.lexer.finish();
        ParseOutcome {
            root,
            diagnostics,
            fatal,
            digest,
            lines,
        }
    }

    // --- token plumbing -------------------------------------------------

    pub(crate) fn current(&self) -> &Token {
        self.lexer.current()
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.lexer.current().kind
    }

    pub(crate) fn current_pos(&self) -> Position {
        self.lexer.current().pos
    }

    pub(crate) fn lookahead_kind(&self) -> TokenKind {
        self.lexer.lookahead().kind
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.current_kind())
    }

    pub(crate) fn bump(&mut self) -> Token {
        let consumed = self.lexer.bump();
        self.skip_pragmas();
        consumed
    }

    /// Pragmas may appear between any two symbols; the grammar does not
    /// mention them, so the parser sees right through them. Their
    /// interpretation belongs to later phases.
    fn skip_pragmas(&mut self) {
        while self.lexer.current().kind == TokenKind::Pragma {
            self.lexer.bump();
        }
    }

    /// The current token's lexeme, or the empty handle.
    pub(crate) fn lexeme_or_empty(&mut self, token: &Token) -> Symbol {
        match token.lexeme {
            Some(sym) => sym,
            None => self.pool.intern(""),
        }
    }

    pub(crate) fn diags(&mut self) -> &mut Diagnostics {
        self.lexer.diagnostics()
    }

    // --- error recovery -------------------------------------------------

    /// Skip tokens until the current one is in `resync` or end of file.
    pub(crate) fn skip_to(&mut self, resync: TokenSet) {
        while !self.at_set(resync) && !self.at(TokenKind::Eof) {
            self.bump();
        }
    }

    /// Matched consume: take the expected token, or report and resync.
    ///
    /// Returns whether the expected token was actually consumed; either
    /// way the caller continues from the resulting lookahead.
    pub(crate) fn match_token(&mut self, expected: TokenKind, resync: TokenSet) -> bool {
        if self.at(expected) {
            self.bump();
            return true;
        }
        let found = self.current_kind();
        let pos = self.current_pos();
        let lexeme = self.current().lexeme;
        self.diags()
            .report_with_lexeme(DiagnosticKind::UnexpectedToken { expected, found }, pos, lexeme);
        self.skip_to(resync);
        false
    }

    /// Matched-set consume: accept (without consuming) when the current
    /// token is in `first`, else report and resync.
    pub(crate) fn match_set(&mut self, first: TokenSet, resync: TokenSet) -> bool {
        if self.at_set(first) {
            return true;
        }
        let found = self.current_kind();
        let pos = self.current_pos();
        let lexeme = self.current().lexeme;
        self.diags()
            .report_with_lexeme(DiagnosticKind::UnexpectedSymbol { found }, pos, lexeme);
        self.skip_to(resync);
        self.at_set(first)
    }

    // --- node assembly --------------------------------------------------

    /// Build a fixed-arity node. Arities are static facts of the grammar
    /// routines, so a mismatch is a parser bug, not an input error.
    pub(crate) fn node(&self, kind: NodeKind, children: Vec<Node>) -> Node {
        Node::branch(kind, children)
            .unwrap_or_else(|e| panic!("parser assembled a malformed node: {e}"))
    }

    /// Build a list node from one or more collected children.
    pub(crate) fn list(&self, kind: NodeKind, children: Vec<Node>) -> Node {
        Node::list(kind, children)
            .unwrap_or_else(|e| panic!("parser assembled a malformed list: {e}"))
    }

    /// A list node, or `EMPTY` when nothing was collected.
    pub(crate) fn list_or_empty(&self, kind: NodeKind, children: Vec<Node>) -> Node {
        if children.is_empty() {
            Node::empty()
        } else {
            self.list(kind, children)
        }
    }

    /// Consume an identifier into an `IDENT` leaf, or resync to `EMPTY`.
    pub(crate) fn expect_ident(&mut self, resync: TokenSet) -> Node {
        if self.at(TokenKind::Ident) {
            let token = self.bump();
            let sym = self.lexeme_or_empty(&token);
            Node::leaf(crate::ast::Value::Ident(sym))
        } else {
            self.match_token(TokenKind::Ident, resync);
            Node::empty()
        }
    }

    /// Consume a quoted string into a `QUOTEDVAL` leaf, or resync.
    pub(crate) fn expect_quoted(&mut self, resync: TokenSet) -> Node {
        if self.at(TokenKind::QuotedString) {
            let token = self.bump();
            let sym = self.lexeme_or_empty(&token);
            Node::leaf(crate::ast::Value::Quoted(sym))
        } else {
            self.match_token(TokenKind::QuotedString, resync);
            Node::empty()
        }
    }

    /// Consume a semicolon; when resynchronization lands exactly on a
    /// semicolon, consume that one so iteration can continue.
    pub(crate) fn expect_semicolon(&mut self, resync: TokenSet) {
        if !self.match_token(TokenKind::Semicolon, resync.with(TokenKind::Semicolon))
            && self.at(TokenKind::Semicolon)
        {
            self.bump();
        }
    }

    // --- tracing --------------------------------------------------------

    pub(crate) fn enter(&mut self, rule: &str) {
        if self.trace {
            eprintln!(
                "parser: {:indent$}{rule} at {}",
                "",
                self.current_pos(),
                indent = self.depth * 2
            );
        }
        self.depth += 1;
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn errant_semicolons(&self) -> bool {
        self.errant_semicolons
    }

    pub(crate) fn pool(&self) -> &'p Pool {
        self.pool
    }

    pub(crate) fn table(&self) -> &'p LexemeTable {
        self.table
    }

    /// Digest of the source, once the lexer has read through it.
    pub(crate) fn digest(&self) -> Option<u32> {
        self.lexer.digest()
    }
}
