//! Statement sequences and the individual statement forms.

use crate::ast::{Node, NodeKind};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::sets;
use crate::token::{TokenKind, TokenSet};

impl Parser<'_> {
    /// `statementSequence := statement (';' statement)*`
    ///
    /// Returns a `STMTSEQ` list, or `EMPTY` when nothing parses. A
    /// semicolon directly before a sequence terminator is tolerated and,
    /// with the errant-semicolon option, reported as a warning.
    pub(crate) fn parse_statement_sequence(&mut self) -> Node {
        self.enter("statementSequence");
        let mut stmts = Vec::new();
        loop {
            if !self.at_set(sets::STATEMENT_FIRST) {
                if self.at_set(sets::SEQUENCE_FOLLOW) || self.at(TokenKind::Eof) {
                    break;
                }
                // Junk between statements: report once, resync, retry.
                self.match_set(sets::STATEMENT_FIRST, sets::STATEMENT_RESYNC);
                if self.at(TokenKind::Semicolon) {
                    self.bump();
                    continue;
                }
                if self.at_set(sets::STATEMENT_FIRST) {
                    continue;
                }
                break;
            }
            stmts.push(self.parse_statement());
            if self.at(TokenKind::Semicolon) {
                let semi = self.bump();
                if self.at_set(sets::SEQUENCE_FOLLOW) {
                    if self.errant_semicolons() {
                        self.diags().report(DiagnosticKind::ErrantSemicolon, semi.pos);
                    }
                    break;
                }
            } else if self.at_set(sets::STATEMENT_FIRST) {
                // Missing separator; report and carry on.
                let found = self.current_kind();
                let pos = self.current_pos();
                self.diags().report(
                    DiagnosticKind::UnexpectedToken {
                        expected: TokenKind::Semicolon,
                        found,
                    },
                    pos,
                );
            } else {
                break;
            }
        }
        let seq = self.list_or_empty(NodeKind::StmtSeq, stmts);
        self.leave();
        seq
    }

    fn parse_statement(&mut self) -> Node {
        self.enter("statement");
        let stmt = match self.current_kind() {
            TokenKind::Ident => self.parse_assign_or_call(),
            TokenKind::Copy => self.parse_copy_statement(),
            TokenKind::New => self.parse_new_statement(),
            TokenKind::Retain => {
                self.bump();
                let target = self.parse_designator();
                self.node(NodeKind::Retain, vec![target])
            }
            TokenKind::Release => {
                self.bump();
                let target = self.parse_designator();
                self.node(NodeKind::Release, vec![target])
            }
            TokenKind::Return => {
                self.bump();
                let value = if self.at_set(sets::EXPR_FIRST) {
                    self.parse_expression()
                } else {
                    Node::empty()
                };
                self.node(NodeKind::Return, vec![value])
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Case => self.parse_case_statement(),
            TokenKind::Loop => {
                self.bump();
                let body = self.parse_statement_sequence();
                self.match_token(TokenKind::End, sets::STATEMENT_RESYNC);
                self.node(NodeKind::Loop, vec![body])
            }
            TokenKind::While => {
                self.bump();
                let cond = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Do]));
                self.match_token(TokenKind::Do, sets::STATEMENT_RESYNC);
                let body = self.parse_statement_sequence();
                self.match_token(TokenKind::End, sets::STATEMENT_RESYNC);
                self.node(NodeKind::While, vec![cond, body])
            }
            TokenKind::Repeat => {
                self.bump();
                let body = self.parse_statement_sequence();
                self.match_token(TokenKind::Until, sets::EXPR_FIRST.union(sets::STATEMENT_RESYNC));
                let cond = self.parse_expression_or_empty(sets::STATEMENT_RESYNC);
                self.node(NodeKind::Repeat, vec![body, cond])
            }
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Exit => {
                self.bump();
                self.node(NodeKind::Exit, Vec::new())
            }
            TokenKind::Read => self.parse_read_statement(),
            TokenKind::Write => self.parse_write_statement(),
            TokenKind::Nop => {
                self.bump();
                self.node(NodeKind::Nop, Vec::new())
            }
            _ => {
                // parse_statement is only entered from STATEMENT_FIRST.
                self.match_set(sets::STATEMENT_FIRST, sets::STATEMENT_RESYNC);
                Node::empty()
            }
        };
        self.leave();
        stmt
    }

    /// `updateOrProcCall := designator (':=' expression |
    /// '(' expressionList ')')?`
    fn parse_assign_or_call(&mut self) -> Node {
        let target = self.parse_designator();
        match self.current_kind() {
            TokenKind::Assign => {
                self.bump();
                let value = self.parse_expression_or_empty(sets::STATEMENT_RESYNC);
                self.node(NodeKind::Assign, vec![target, value])
            }
            TokenKind::LParen => {
                self.bump();
                let args = if self.at_set(sets::EXPR_FIRST) {
                    self.parse_expression_list()
                } else {
                    Node::empty()
                };
                self.match_token(TokenKind::RParen, sets::STATEMENT_RESYNC);
                self.node(NodeKind::PCall, vec![target, args])
            }
            _ => self.node(NodeKind::PCall, vec![target, Node::empty()]),
        }
    }

    /// `COPY designator ':=' expression`
    fn parse_copy_statement(&mut self) -> Node {
        self.bump();
        let target = self.parse_designator();
        self.match_token(TokenKind::Assign, sets::EXPR_FIRST.union(sets::STATEMENT_RESYNC));
        let value = self.parse_expression_or_empty(sets::STATEMENT_RESYNC);
        self.node(NodeKind::Copy, vec![target, value])
    }

    /// `NEW designator (OF expression | ':=' structuredValue)?`
    fn parse_new_statement(&mut self) -> Node {
        self.bump();
        let target = self.parse_designator();
        match self.current_kind() {
            TokenKind::Of => {
                self.bump();
                let capacity = self.parse_expression_or_empty(sets::STATEMENT_RESYNC);
                self.node(NodeKind::NewCap, vec![target, capacity])
            }
            TokenKind::Assign => {
                self.bump();
                let initial = if self.at(TokenKind::LBrace) {
                    self.parse_structured_value()
                } else {
                    self.parse_expression_or_empty(sets::STATEMENT_RESYNC)
                };
                self.node(NodeKind::NewInit, vec![target, initial])
            }
            _ => self.node(NodeKind::New, vec![target]),
        }
    }

    /// `ifStatement := IF expression THEN statementSequence
    ///                 (ELSIF expression THEN statementSequence)*
    ///                 (ELSE statementSequence)? END`
    fn parse_if_statement(&mut self) -> Node {
        self.bump();
        let cond = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Then]));
        self.match_token(TokenKind::Then, sets::STATEMENT_RESYNC);
        let then_seq = self.parse_statement_sequence();
        let mut elsifs = Vec::new();
        while self.at(TokenKind::Elsif) {
            self.bump();
            let cond = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Then]));
            self.match_token(TokenKind::Then, sets::STATEMENT_RESYNC);
            let seq = self.parse_statement_sequence();
            elsifs.push(self.node(NodeKind::Elsif, vec![cond, seq]));
        }
        let else_seq = if self.at(TokenKind::Else) {
            self.bump();
            self.parse_statement_sequence()
        } else {
            Node::empty()
        };
        self.match_token(TokenKind::End, sets::STATEMENT_RESYNC);
        let elsifs = self.list_or_empty(NodeKind::ElsifList, elsifs);
        self.node(NodeKind::If, vec![cond, then_seq, elsifs, else_seq])
    }

    /// `caseStatement := CASE expression OF ('|' case)* (ELSE
    /// statementSequence)? END`
    fn parse_case_statement(&mut self) -> Node {
        self.bump();
        let selector = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Of]));
        self.match_token(
            TokenKind::Of,
            TokenSet::new(&[TokenKind::Bar, TokenKind::Else, TokenKind::End]),
        );
        let mut cases = Vec::new();
        while self.at(TokenKind::Bar) {
            self.bump();
            cases.push(self.parse_case_branch());
        }
        let else_seq = if self.at(TokenKind::Else) {
            self.bump();
            self.parse_statement_sequence()
        } else {
            Node::empty()
        };
        self.match_token(TokenKind::End, sets::STATEMENT_RESYNC);
        let cases = self.list_or_empty(NodeKind::CaseList, cases);
        self.node(NodeKind::Switch, vec![selector, cases, else_seq])
    }

    /// `case := caseLabels (',' caseLabels)* ':' statementSequence`
    fn parse_case_branch(&mut self) -> Node {
        let mut labels = Vec::new();
        loop {
            let mut label =
                self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Colon, TokenKind::Comma]));
            if self.at(TokenKind::DotDot) {
                self.bump();
                let upper = self
                    .parse_expression_or_empty(TokenSet::new(&[TokenKind::Colon, TokenKind::Comma]));
                label = self.node(NodeKind::Range, vec![label, upper]);
            }
            labels.push(label);
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.match_token(TokenKind::Colon, sets::STATEMENT_RESYNC);
        let seq = self.parse_statement_sequence();
        let labels = self.list_or_empty(NodeKind::ExprList, labels);
        self.node(NodeKind::Case, vec![labels, seq])
    }

    /// `forStatement := FOR Ident (',' Ident)? IN iterableExpr DO
    ///                  statementSequence END`
    ///
    /// Both the plain-iterable and the ranged form produce a `FOR` node
    /// of arity 3 with an `IN` iteration node in the middle.
    fn parse_for_statement(&mut self) -> Node {
        self.bump();
        let mut bindings = vec![self.expect_ident(TokenSet::new(&[
            TokenKind::Comma,
            TokenKind::In,
            TokenKind::Do,
        ]))];
        if self.at(TokenKind::Comma) {
            self.bump();
            bindings.push(self.expect_ident(TokenSet::new(&[TokenKind::In, TokenKind::Do])));
        }
        let bindings = self.list(NodeKind::IdentList, bindings);
        self.match_token(TokenKind::In, sets::EXPR_FIRST.with(TokenKind::Do));
        let mut source = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::DotDot, TokenKind::Do]));
        if self.at(TokenKind::DotDot) {
            self.bump();
            let upper = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Do]));
            source = self.node(NodeKind::Range, vec![source, upper]);
        }
        let iteration = self.node(NodeKind::In, vec![source, Node::empty()]);
        self.match_token(TokenKind::Do, sets::STATEMENT_RESYNC);
        let body = self.parse_statement_sequence();
        self.match_token(TokenKind::End, sets::STATEMENT_RESYNC);
        self.node(NodeKind::For, vec![bindings, iteration, body])
    }

    /// `READ designator (',' designator)*`
    fn parse_read_statement(&mut self) -> Node {
        self.bump();
        let mut targets = vec![self.parse_designator()];
        while self.at(TokenKind::Comma) {
            self.bump();
            targets.push(self.parse_designator());
        }
        let targets = self.list(NodeKind::ExprList, targets);
        self.node(NodeKind::Read, vec![targets])
    }

    /// `WRITE writeArg (',' writeArg)*` where a formatted argument is
    /// `'#' '(' expression ',' expressionList ')'`.
    fn parse_write_statement(&mut self) -> Node {
        self.bump();
        let mut outputs = vec![self.parse_write_arg()];
        while self.at(TokenKind::Comma) {
            self.bump();
            outputs.push(self.parse_write_arg());
        }
        let outputs = self.list(NodeKind::ExprList, outputs);
        self.node(NodeKind::Write, vec![outputs])
    }

    fn parse_write_arg(&mut self) -> Node {
        if self.at(TokenKind::NotEqual) {
            self.bump();
            self.match_token(TokenKind::LParen, sets::EXPR_FIRST.union(sets::STATEMENT_RESYNC));
            let format = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Comma]));
            self.match_token(TokenKind::Comma, sets::EXPR_FIRST.union(sets::STATEMENT_RESYNC));
            let args = if self.at_set(sets::EXPR_FIRST) {
                self.parse_expression_list()
            } else {
                Node::empty()
            };
            self.match_token(TokenKind::RParen, sets::STATEMENT_RESYNC.with(TokenKind::Comma));
            self.node(NodeKind::Fmt, vec![format, args])
        } else {
            self.parse_expression_or_empty(sets::STATEMENT_RESYNC.with(TokenKind::Comma))
        }
    }
}
