//! Error and warning collection.
//!
//! Lexical and syntactic problems never unwind: they are reported into a
//! [`Diagnostics`] sink and the producing component recovers locally. The
//! parser observes the lexer's reports through the same sink, and the CLI
//! surfaces the final counts as the exit status.

use mod2c_core::{Colors, Pool, Symbol};

use crate::token::TokenKind;

/// A 1-based source position, sampled at the first character of a lexeme.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    Error,
    Warning,
}

/// What went wrong. Lexical kinds come from the lexer, syntactic kinds
/// from the parser; each kind has a fixed severity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DiagnosticKind {
    /// A character outside the source character set.
    IllegalChar { ch: char },
    /// A control character other than tab or newline.
    IllegalCtrlChar { code: u8 },
    /// A real-number literal with a missing exponent.
    MalformedReal,
    /// A string literal terminated by newline or end of file.
    MalformedString,
    /// A backslash sequence other than `\n`, `\t`, `\\`.
    IllegalEscape { ch: char },
    /// A `?<` ... `>?` region was skipped.
    DisabledCodeSection { first_line: u32, last_line: u32 },
    /// Expected one specific token, found another.
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    /// The current token can start none of the alternatives here.
    UnexpectedSymbol { found: TokenKind },
    /// Tail identifier does not repeat the declared name (module or
    /// procedure).
    TailMismatch,
    /// A semicolon directly before END, ELSE, ELSIF, UNTIL or `|`.
    ErrantSemicolon,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::DisabledCodeSection { .. }
            | DiagnosticKind::TailMismatch
            | DiagnosticKind::ErrantSemicolon => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// One reported problem: kind, position, and the offending lexeme when
/// one exists (identifiers, literals, reserved words).
#[derive(Clone, Copy, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub pos: Position,
    pub lexeme: Option<Symbol>,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    fn message(&self, pool: &Pool) -> String {
        let lexeme = self
            .lexeme
            .and_then(|sym| pool.resolve(sym))
            .unwrap_or_default();
        match self.kind {
            DiagnosticKind::IllegalChar { ch } => {
                format!("illegal character {ch:?}")
            }
            DiagnosticKind::IllegalCtrlChar { code } => {
                format!("illegal control character 0x{code:02X}")
            }
            DiagnosticKind::MalformedReal => {
                format!("malformed real-number literal '{lexeme}' (missing exponent digits)")
            }
            DiagnosticKind::MalformedString => {
                format!("string literal '{lexeme}' not terminated before end of line")
            }
            DiagnosticKind::IllegalEscape { ch } => {
                format!("illegal escape sequence '\\{ch}'")
            }
            DiagnosticKind::DisabledCodeSection {
                first_line,
                last_line,
            } => {
                format!("disabled code section skipped (lines {first_line}-{last_line})")
            }
            DiagnosticKind::UnexpectedToken { expected, found } => {
                if lexeme.is_empty() {
                    format!("expected {expected} but found {found}")
                } else {
                    format!("expected {expected} but found {found} '{lexeme}'")
                }
            }
            DiagnosticKind::UnexpectedSymbol { found } => {
                if lexeme.is_empty() {
                    format!("unexpected {found}")
                } else {
                    format!("unexpected {found} '{lexeme}'")
                }
            }
            DiagnosticKind::TailMismatch => {
                format!("tail identifier '{lexeme}' does not repeat the declared name")
            }
            DiagnosticKind::ErrantSemicolon => "redundant semicolon".to_owned(),
        }
    }
}

/// Collector for non-fatal problems of one compilation.
#[derive(Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    errors: u32,
    warnings: u32,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, pos: Position) {
        self.report_with_lexeme(kind, pos, None);
    }

    pub fn report_with_lexeme(
        &mut self,
        kind: DiagnosticKind,
        pos: Position,
        lexeme: Option<Symbol>,
    ) {
        match kind.severity() {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.items.push(Diagnostic { kind, pos, lexeme });
    }

    pub fn error_count(&self) -> u32 {
        self.errors
    }

    pub fn warning_count(&self) -> u32 {
        self.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Merge another sink's reports after this sink's own.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.items.extend(other.items);
    }

    /// Render all reports as one line each: `file:line:col: severity: msg`.
    pub fn render(&self, file: &str, pool: &Pool, colors: Colors) -> String {
        let mut out = String::new();
        for d in &self.items {
            let (tint, label) = match d.severity() {
                Severity::Error => (colors.red, "error"),
                Severity::Warning => (colors.yellow, "warning"),
            };
            out.push_str(&format!(
                "{dim}{file}:{pos}:{reset} {tint}{label}:{reset} {msg}\n",
                dim = colors.dim,
                pos = d.pos,
                reset = colors.reset,
                tint = tint,
                msg = d.message(pool),
            ));
        }
        out
    }
}
