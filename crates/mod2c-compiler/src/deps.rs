//! Dependency extraction without building an AST.
//!
//! Walks only the module header and the repeated `IMPORT` clauses, then
//! stops at the first symbol of the post-import grammar (`CONST`, `TYPE`,
//! `VAR`, `PROCEDURE`, `TO`, `BEGIN`, `END` or end of file). Imported
//! identifiers are appended with order-preserving deduplication.

use mod2c_core::{DependencyList, Pool};

use crate::Error;
use crate::diagnostics::Diagnostics;
use crate::lexer::Lexer;
use crate::parser::sets;
use crate::token::TokenKind;

/// Walk the import prelude and collect the dependency list.
pub(crate) fn collect(mut lexer: Lexer<'_>, pool: &Pool) -> (DependencyList, Diagnostics, Option<Error>) {
    // Leading pragmas sit outside the header grammar.
    while lexer.current().kind == TokenKind::Pragma {
        lexer.bump();
    }

    // Module header: [DEFINITION | IMPLEMENTATION] MODULE Ident ';'
    if matches!(
        lexer.current().kind,
        TokenKind::Definition | TokenKind::Implementation
    ) {
        lexer.bump();
    }
    if lexer.current().kind == TokenKind::Module {
        lexer.bump();
    }
    let module = match (lexer.current().kind, lexer.current().lexeme) {
        (TokenKind::Ident, Some(sym)) => {
            lexer.bump();
            sym
        }
        _ => pool.intern(""),
    };
    if lexer.current().kind == TokenKind::Semicolon {
        lexer.bump();
    }

    let mut deps = DependencyList::new(module);
    loop {
        let kind = lexer.current().kind;
        if kind == TokenKind::Import {
            lexer.bump();
            loop {
                match (lexer.current().kind, lexer.current().lexeme) {
                    (TokenKind::Ident, Some(sym)) => {
                        deps.add(sym);
                        lexer.bump();
                    }
                    _ => break,
                }
                // Re-export markers are irrelevant to the dependency set.
                if lexer.current().kind == TokenKind::Plus {
                    lexer.bump();
                }
                if lexer.current().kind == TokenKind::Comma {
                    lexer.bump();
                } else {
                    break;
                }
            }
            if lexer.current().kind == TokenKind::Semicolon {
                lexer.bump();
            }
        } else if sets::POST_IMPORT_FIRST.contains(kind)
            || kind == TokenKind::End
            || kind == TokenKind::Eof
        {
            break;
        } else {
            lexer.bump();
        }
    }

    let (diagnostics, fatal, _digest, _lines) = lexer.finish();
    (deps, diagnostics, fatal)
}
