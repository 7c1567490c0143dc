//! FIRST and resync sets, one named constant per production family.
//!
//! Resync sets are derived from the grammar's FOLLOW relation; `skip_to`
//! additionally stops at end-of-file, so EOF is not listed here.

use crate::token::TokenKind::*;
use crate::token::TokenSet;

/// First symbols of a compilation unit.
pub(crate) const UNIT_FIRST: TokenSet = TokenSet::new(&[Definition, Implementation, Module]);

/// Resynchronization for the module header. Includes the identifier and
/// semicolon so a dropped keyword still recovers the module name.
pub(crate) const HEADER_RESYNC: TokenSet = TokenSet::new(&[
    Ident, Semicolon, Import, Const, Type, Var, Procedure, Unqualified, To, Begin, End,
]);

/// Resynchronization for the import section: first symbols of what may
/// follow the imports.
pub(crate) const IMPORT_RESYNC: TokenSet =
    TokenSet::new(&[Const, Type, Var, Procedure, To, Begin, End]);

/// Where the dependency walker stops: first symbols after the import
/// prelude.
pub(crate) const POST_IMPORT_FIRST: TokenSet =
    TokenSet::new(&[Const, Type, Var, Procedure, To, Begin]);

/// First symbols of a definition (definition module).
pub(crate) const DEFINITION_FIRST: TokenSet =
    TokenSet::new(&[Const, Type, Procedure, Unqualified, To]);

/// Resynchronization inside the definition section.
pub(crate) const DEFINITION_RESYNC: TokenSet =
    TokenSet::new(&[Const, Type, Procedure, Unqualified, To, End, Semicolon]);

/// First symbols of a declaration (implementation/program block).
pub(crate) const DECLARATION_FIRST: TokenSet =
    TokenSet::new(&[Const, Type, Var, Procedure, Unqualified, To]);

/// Resynchronization inside the declaration section.
pub(crate) const DECLARATION_RESYNC: TokenSet =
    TokenSet::new(&[Const, Type, Var, Procedure, Unqualified, To, Begin, End, Semicolon]);

/// First symbols of a statement.
pub(crate) const STATEMENT_FIRST: TokenSet = TokenSet::new(&[
    Ident, Copy, Return, New, Retain, Release, If, Case, Loop, While, Repeat, For, Exit, Read,
    Write, Nop,
]);

/// Statement-sequence resynchronization: statement starts plus the
/// terminators of every enclosing statement form.
pub(crate) const STATEMENT_RESYNC: TokenSet = STATEMENT_FIRST.union(TokenSet::new(&[
    Semicolon, End, Else, Elsif, Until, Bar,
]));

/// Terminators that may legally follow a statement sequence.
pub(crate) const SEQUENCE_FOLLOW: TokenSet = TokenSet::new(&[End, Else, Elsif, Until, Bar]);

/// First symbols of an expression.
pub(crate) const EXPR_FIRST: TokenSet = TokenSet::new(&[
    Not, Minus, Ident, WholeNumber, RealNumber, CharCode, QuotedString, LParen, LBrace,
]);

/// Resynchronization after a failed expression: everything that can
/// follow an expression in any context.
pub(crate) const EXPR_RESYNC: TokenSet = TokenSet::new(&[
    Semicolon, Comma, RParen, RBracket, RBrace, Then, Do, Of, End, Else, Elsif, Until, Bar, To,
    DotDot, Colon,
]);

/// First symbols of a type denoter.
pub(crate) const TYPE_FIRST: TokenSet = TokenSet::new(&[
    Alias, LBracket, LParen, Set, Array, Record, Pointer, Opaque, Procedure, Octetseq, Ident,
]);

/// Resynchronization inside type definitions.
pub(crate) const TYPE_RESYNC: TokenSet = TokenSet::new(&[Semicolon, End, RParen]);

/// First symbols of a formal type.
pub(crate) const FORMAL_TYPE_FIRST: TokenSet =
    TokenSet::new(&[Const, Var, Octetseq, Pointer, Array, Arglist, Ident]);

/// Resynchronization inside formal parameter lists.
pub(crate) const FPARAMS_RESYNC: TokenSet = TokenSet::new(&[Semicolon, RParen, Colon]);
