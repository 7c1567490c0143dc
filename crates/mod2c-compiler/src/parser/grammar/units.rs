//! Compilation units: module headers, imports, module tails.

use crate::ast::{Node, NodeKind, Value};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::sets;
use crate::token::{TokenKind, TokenSet};

impl Parser<'_> {
    /// `compilationUnit := definitionModule | implOrPrgmModule`
    ///
    /// Dispatch on the first symbol: `DEFINITION`, `IMPLEMENTATION` or
    /// `MODULE`. The result is always a `FILE` node owning the unit.
    pub(crate) fn parse_compilation_unit(&mut self) -> Node {
        self.enter("compilationUnit");
        if !self.match_set(sets::UNIT_FIRST, sets::UNIT_FIRST) {
            self.leave();
            return self.node(NodeKind::File, vec![Node::empty()]);
        }
        let unit = match self.current_kind() {
            TokenKind::Definition => self.parse_definition_module(),
            _ => self.parse_impl_or_program_module(),
        };
        if !self.at(TokenKind::Eof) {
            let found = self.current_kind();
            let pos = self.current_pos();
            let lexeme = self.current().lexeme;
            self.diags()
                .report_with_lexeme(DiagnosticKind::UnexpectedSymbol { found }, pos, lexeme);
            self.skip_to(TokenSet::EMPTY);
        }
        self.leave();
        self.node(NodeKind::File, vec![unit])
    }

    /// `definitionModule := DEFINITION MODULE Ident ';'
    ///                      import* definition* END Ident '.'`
    fn parse_definition_module(&mut self) -> Node {
        self.enter("definitionModule");
        self.bump(); // DEFINITION
        self.match_token(TokenKind::Module, sets::HEADER_RESYNC);
        let name = self.expect_ident(sets::HEADER_RESYNC);
        self.match_token(TokenKind::Semicolon, sets::HEADER_RESYNC);
        let imports = self.parse_import_section(false);
        let defs = self.parse_definition_section();
        self.match_token(
            TokenKind::End,
            TokenSet::new(&[TokenKind::Ident, TokenKind::Dot]),
        );
        self.parse_module_tail(&name);
        let key = self.digest_node();
        self.leave();
        self.node(NodeKind::Interface, vec![name, imports, defs, key])
    }

    /// `implOrPrgmModule := IMPLEMENTATION? MODULE Ident ';'
    ///                      privateImport* block Ident '.'`
    fn parse_impl_or_program_module(&mut self) -> Node {
        self.enter("implOrPrgmModule");
        let kind = if self.at(TokenKind::Implementation) {
            self.bump();
            NodeKind::Implementation
        } else {
            NodeKind::Program
        };
        self.match_token(TokenKind::Module, sets::HEADER_RESYNC);
        let name = self.expect_ident(sets::HEADER_RESYNC);
        self.match_token(TokenKind::Semicolon, sets::HEADER_RESYNC);
        let imports = self.parse_import_section(true);
        let block = self.parse_block();
        self.parse_module_tail(&name);
        let key = self.digest_node();
        self.leave();
        self.node(kind, vec![name, imports, block, key])
    }

    /// `import := IMPORT Ident reExport? ( ',' Ident reExport? )* ';'`
    ///
    /// In private import position (`private`), the re-export marker `+`
    /// is not part of the grammar and is reported.
    pub(crate) fn parse_import_section(&mut self, private: bool) -> Node {
        let mut entries: Vec<Node> = Vec::new();
        while self.at(TokenKind::Import) {
            self.enter("import");
            self.bump();
            loop {
                let ident = self.expect_ident(sets::IMPORT_RESYNC.with(TokenKind::Semicolon));
                if ident.is_empty_node() {
                    break;
                }
                let entry = if self.at(TokenKind::Plus) {
                    let plus = self.bump();
                    if private {
                        self.diags().report(
                            DiagnosticKind::UnexpectedSymbol {
                                found: TokenKind::Plus,
                            },
                            plus.pos,
                        );
                        ident
                    } else {
                        self.node(NodeKind::Reexp, vec![ident])
                    }
                } else {
                    ident
                };
                entries.push(entry);
                if self.at(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
            self.expect_semicolon(sets::IMPORT_RESYNC.with(TokenKind::Import));
            self.leave();
        }
        if entries.is_empty() {
            Node::empty()
        } else {
            let list = self.list(NodeKind::ImpList, entries);
            self.node(NodeKind::Import, vec![list])
        }
    }

    /// `END` has been consumed; match the repeated module identifier and
    /// the closing period. A mismatching tail identifier is a warning,
    /// not a parse failure.
    pub(crate) fn parse_module_tail(&mut self, header_name: &Node) {
        if self.at(TokenKind::Ident) {
            let token = self.bump();
            if let (
                Some(tail),
                Node::Leaf {
                    value: Value::Ident(head),
                    ..
                },
            ) = (token.lexeme, header_name)
            {
                if tail != *head {
                    self.diags().report_with_lexeme(
                        DiagnosticKind::TailMismatch,
                        token.pos,
                        Some(tail),
                    );
                }
            }
        } else {
            self.match_token(TokenKind::Ident, TokenSet::new(&[TokenKind::Dot]));
        }
        self.match_token(TokenKind::Dot, TokenSet::EMPTY);
    }

    /// The unit key: the reader's rolling digest, available exactly when
    /// the lexer has read through end-of-file.
    fn digest_node(&self) -> Node {
        match self.digest() {
            Some(key) => Node::leaf(Value::Key(key)),
            None => Node::empty(),
        }
    }
}
