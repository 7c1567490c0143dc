//! Definitions, declarations, type denoters and procedure headers.

use crate::ast::{Node, NodeKind};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::sets;
use crate::token::{TokenKind, TokenSet};

impl Parser<'_> {
    /// `definition*` of a definition module, as a `DEFLIST` (or `EMPTY`).
    pub(crate) fn parse_definition_section(&mut self) -> Node {
        let mut defs = Vec::new();
        loop {
            if self.at_set(sets::DEFINITION_FIRST) {
                self.parse_definition(&mut defs);
                continue;
            }
            if self.at(TokenKind::End) || self.at(TokenKind::Eof) {
                break;
            }
            // Junk between definitions: report, resync, retry.
            self.match_set(sets::DEFINITION_FIRST, sets::DEFINITION_RESYNC);
            if self.at(TokenKind::Semicolon) {
                self.bump();
                continue;
            }
            if !self.at_set(sets::DEFINITION_FIRST) {
                break;
            }
        }
        self.list_or_empty(NodeKind::DefList, defs)
    }

    /// `definition := CONST (constDefinition ';')+ | TYPE
    /// (typeDefinition ';')+ | PROCEDURE procedureHeader ';' |
    /// UNQUALIFIED ... ';' | toDoList ';'`
    fn parse_definition(&mut self, out: &mut Vec<Node>) {
        self.enter("definition");
        match self.current_kind() {
            TokenKind::Const => {
                self.bump();
                while self.at(TokenKind::Ident) {
                    let def = self.parse_const_definition();
                    out.push(def);
                    self.expect_semicolon(sets::DEFINITION_RESYNC);
                }
            }
            TokenKind::Type => {
                self.bump();
                while self.at(TokenKind::Ident) {
                    let def = self.parse_type_definition();
                    out.push(def);
                    self.expect_semicolon(sets::DEFINITION_RESYNC);
                }
            }
            TokenKind::Procedure => {
                let header = self.parse_procedure_header();
                out.push(header);
                self.expect_semicolon(sets::DEFINITION_RESYNC);
            }
            TokenKind::Unqualified => {
                out.push(self.parse_unqualified_aliases());
            }
            TokenKind::To => {
                out.push(self.parse_todo());
                self.expect_semicolon(sets::DEFINITION_RESYNC);
            }
            _ => {
                self.match_set(sets::DEFINITION_FIRST, sets::DEFINITION_RESYNC);
            }
        }
        self.leave();
    }

    /// `block := declaration* (BEGIN statementSequence)? END`
    pub(crate) fn parse_block(&mut self) -> Node {
        self.enter("block");
        let mut decls = Vec::new();
        loop {
            if self.at_set(sets::DECLARATION_FIRST) {
                self.parse_declaration(&mut decls);
                continue;
            }
            if self.at(TokenKind::Begin) || self.at(TokenKind::End) || self.at(TokenKind::Eof) {
                break;
            }
            self.match_set(sets::DECLARATION_FIRST, sets::DECLARATION_RESYNC);
            if self.at(TokenKind::Semicolon) {
                self.bump();
                continue;
            }
            if !self.at_set(sets::DECLARATION_FIRST) {
                break;
            }
        }
        let stmts = if self.at(TokenKind::Begin) {
            self.bump();
            self.parse_statement_sequence()
        } else {
            Node::empty()
        };
        self.match_token(
            TokenKind::End,
            TokenSet::new(&[TokenKind::Ident, TokenKind::Dot, TokenKind::Semicolon]),
        );
        let decls = self.list_or_empty(NodeKind::DefList, decls);
        self.leave();
        self.node(NodeKind::Block, vec![decls, stmts])
    }

    /// Like `parse_definition`, plus `VAR` sections and procedures with
    /// bodies.
    fn parse_declaration(&mut self, out: &mut Vec<Node>) {
        self.enter("declaration");
        match self.current_kind() {
            TokenKind::Const => {
                self.bump();
                while self.at(TokenKind::Ident) {
                    let def = self.parse_const_definition();
                    out.push(def);
                    self.expect_semicolon(sets::DECLARATION_RESYNC);
                }
            }
            TokenKind::Type => {
                self.bump();
                while self.at(TokenKind::Ident) {
                    let def = self.parse_type_definition();
                    out.push(def);
                    self.expect_semicolon(sets::DECLARATION_RESYNC);
                }
            }
            TokenKind::Var => {
                self.bump();
                while self.at(TokenKind::Ident) {
                    let decl = self.parse_var_declaration();
                    out.push(decl);
                    self.expect_semicolon(sets::DECLARATION_RESYNC);
                }
            }
            TokenKind::Procedure => {
                out.push(self.parse_procedure_declaration());
                self.expect_semicolon(sets::DECLARATION_RESYNC);
            }
            TokenKind::Unqualified => {
                out.push(self.parse_unqualified_aliases());
            }
            TokenKind::To => {
                out.push(self.parse_todo());
                self.expect_semicolon(sets::DECLARATION_RESYNC);
            }
            _ => {
                self.match_set(sets::DECLARATION_FIRST, sets::DECLARATION_RESYNC);
            }
        }
        self.leave();
    }

    /// `constDefinition := Ident '=' expression`
    fn parse_const_definition(&mut self) -> Node {
        let name = self.expect_ident(TokenSet::new(&[TokenKind::Equal, TokenKind::Semicolon]));
        self.match_token(TokenKind::Equal, sets::EXPR_FIRST.with(TokenKind::Semicolon));
        let value = self.parse_expression_or_empty(TokenSet::new(&[TokenKind::Semicolon]));
        self.node(NodeKind::ConstDef, vec![name, value])
    }

    /// `typeDefinition := Ident '=' type`
    fn parse_type_definition(&mut self) -> Node {
        let name = self.expect_ident(TokenSet::new(&[TokenKind::Equal, TokenKind::Semicolon]));
        self.match_token(TokenKind::Equal, sets::TYPE_FIRST.with(TokenKind::Semicolon));
        let denoter = self.parse_type();
        self.node(NodeKind::TypeDef, vec![name, denoter])
    }

    /// `varDeclaration := identList ':' type`
    fn parse_var_declaration(&mut self) -> Node {
        let names = self.parse_ident_list(TokenSet::new(&[TokenKind::Colon, TokenKind::Semicolon]));
        self.match_token(TokenKind::Colon, sets::TYPE_FIRST.with(TokenKind::Semicolon));
        let denoter = self.parse_type();
        self.node(NodeKind::VarDecl, vec![names, denoter])
    }

    /// `identList := Ident (',' Ident)*`
    pub(crate) fn parse_ident_list(&mut self, resync: TokenSet) -> Node {
        let mut idents = vec![self.expect_ident(resync.with(TokenKind::Comma))];
        while self.at(TokenKind::Comma) {
            self.bump();
            idents.push(self.expect_ident(resync.with(TokenKind::Comma)));
        }
        self.list(NodeKind::IdentList, idents)
    }

    /// `type := aliasType | subrangeType | enumType | setType | arrayType
    /// | recordType | pointerType | opaqueType | procedureType |
    /// qualident`
    pub(crate) fn parse_type(&mut self) -> Node {
        self.enter("type");
        let denoter = match self.current_kind() {
            TokenKind::Alias => self.parse_alias_type(),
            TokenKind::LBracket => self.parse_subrange_type(),
            TokenKind::LParen => self.parse_enum_type(),
            TokenKind::Set => self.parse_set_type(),
            TokenKind::Array => self.parse_array_type(),
            TokenKind::Record => self.parse_record_type(),
            TokenKind::Pointer => self.parse_pointer_type(),
            TokenKind::Opaque => self.parse_opaque_type(),
            TokenKind::Procedure => self.parse_procedure_type(),
            TokenKind::Octetseq => {
                self.bump();
                self.node(NodeKind::CastOctSeq, Vec::new())
            }
            TokenKind::Ident => self.parse_qualident(sets::TYPE_RESYNC),
            _ => {
                self.match_set(sets::TYPE_FIRST, sets::TYPE_RESYNC);
                Node::empty()
            }
        };
        self.leave();
        denoter
    }

    /// `aliasType := ALIAS OF qualident`
    fn parse_alias_type(&mut self) -> Node {
        self.bump();
        self.match_token(TokenKind::Of, TokenSet::new(&[TokenKind::Ident]).union(sets::TYPE_RESYNC));
        let target = self.parse_qualident(sets::TYPE_RESYNC);
        self.node(NodeKind::Alias, vec![target])
    }

    /// `subrangeType := '[' expression '..' expression ']' OF qualident`
    fn parse_subrange_type(&mut self) -> Node {
        self.bump();
        let lower = self.parse_expression_or_empty(sets::TYPE_RESYNC.with(TokenKind::DotDot));
        self.match_token(TokenKind::DotDot, sets::EXPR_FIRST.union(sets::TYPE_RESYNC));
        let upper =
            self.parse_expression_or_empty(sets::TYPE_RESYNC.with(TokenKind::RBracket));
        self.match_token(
            TokenKind::RBracket,
            TokenSet::new(&[TokenKind::Of]).union(sets::TYPE_RESYNC),
        );
        self.match_token(TokenKind::Of, TokenSet::new(&[TokenKind::Ident]).union(sets::TYPE_RESYNC));
        let base = self.parse_qualident(sets::TYPE_RESYNC);
        self.node(NodeKind::Subr, vec![lower, upper, base])
    }

    /// `enumType := '(' ('+' qualident ',')? identList ')'`
    fn parse_enum_type(&mut self) -> Node {
        self.bump();
        let base = if self.at(TokenKind::Plus) {
            self.bump();
            let base = self.parse_qualident(sets::TYPE_RESYNC.with(TokenKind::Comma));
            self.match_token(
                TokenKind::Comma,
                TokenSet::new(&[TokenKind::Ident, TokenKind::RParen]),
            );
            base
        } else {
            Node::empty()
        };
        let values = self.parse_ident_list(sets::TYPE_RESYNC);
        self.match_token(TokenKind::RParen, sets::TYPE_RESYNC);
        self.node(NodeKind::Enum, vec![base, values])
    }

    /// `setType := SET OF qualident`
    fn parse_set_type(&mut self) -> Node {
        self.bump();
        self.match_token(TokenKind::Of, TokenSet::new(&[TokenKind::Ident]).union(sets::TYPE_RESYNC));
        let base = self.parse_qualident(sets::TYPE_RESYNC);
        self.node(NodeKind::Set, vec![base])
    }

    /// `arrayType := ARRAY expression OF qualident`
    fn parse_array_type(&mut self) -> Node {
        self.bump();
        let count = self.parse_expression_or_empty(sets::TYPE_RESYNC.with(TokenKind::Of));
        self.match_token(TokenKind::Of, TokenSet::new(&[TokenKind::Ident]).union(sets::TYPE_RESYNC));
        let element = self.parse_qualident(sets::TYPE_RESYNC);
        self.node(NodeKind::Array, vec![count, element])
    }

    /// `recordType := RECORD ('(' qualident ')')? fieldList (';'
    /// fieldList)* END`
    fn parse_record_type(&mut self) -> Node {
        self.bump();
        let base = if self.at(TokenKind::LParen) {
            self.bump();
            let base = self.parse_qualident(sets::TYPE_RESYNC.with(TokenKind::RParen));
            self.match_token(TokenKind::RParen, TokenSet::new(&[TokenKind::Ident, TokenKind::End]));
            base
        } else {
            Node::empty()
        };
        let mut fields = Vec::new();
        while self.at(TokenKind::Ident) {
            let names =
                self.parse_ident_list(TokenSet::new(&[TokenKind::Colon, TokenKind::Semicolon]));
            self.match_token(TokenKind::Colon, sets::TYPE_FIRST.with(TokenKind::Semicolon));
            let denoter = self.parse_type();
            fields.push(self.node(NodeKind::Field, vec![names, denoter]));
            if self.at(TokenKind::Semicolon) {
                self.bump();
            } else {
                break;
            }
        }
        self.match_token(TokenKind::End, sets::TYPE_RESYNC);
        let fields = self.list_or_empty(NodeKind::FieldSeq, fields);
        self.node(NodeKind::Record, vec![base, fields])
    }

    /// `pointerType := POINTER TO qualident`
    fn parse_pointer_type(&mut self) -> Node {
        self.bump();
        self.match_token(TokenKind::To, TokenSet::new(&[TokenKind::Ident]).union(sets::TYPE_RESYNC));
        let target = self.parse_qualident(sets::TYPE_RESYNC);
        self.node(NodeKind::Pointer, vec![target])
    }

    /// `opaqueType := OPAQUE ('[' expression ']')?`
    fn parse_opaque_type(&mut self) -> Node {
        self.bump();
        let size = if self.at(TokenKind::LBracket) {
            self.bump();
            let size =
                self.parse_expression_or_empty(sets::TYPE_RESYNC.with(TokenKind::RBracket));
            self.match_token(TokenKind::RBracket, sets::TYPE_RESYNC);
            size
        } else {
            Node::empty()
        };
        self.node(NodeKind::Opaque, vec![size])
    }

    /// `procedureType := PROCEDURE ('(' formalType (';' formalType)*
    /// ')')? (':' qualident)?`
    fn parse_procedure_type(&mut self) -> Node {
        self.bump();
        let params = if self.at(TokenKind::LParen) {
            self.bump();
            let mut types = vec![self.parse_formal_type()];
            while self.at(TokenKind::Semicolon) {
                self.bump();
                types.push(self.parse_formal_type());
            }
            self.match_token(TokenKind::RParen, sets::TYPE_RESYNC.with(TokenKind::Colon));
            self.list(NodeKind::FParamList, types)
        } else {
            Node::empty()
        };
        let ret = if self.at(TokenKind::Colon) {
            self.bump();
            self.parse_qualident(sets::TYPE_RESYNC)
        } else {
            Node::empty()
        };
        self.node(NodeKind::ProcType, vec![params, ret])
    }

    /// `formalType := (CONST | VAR)? nonAttrFormalType`
    fn parse_formal_type(&mut self) -> Node {
        match self.current_kind() {
            TokenKind::Const => {
                self.bump();
                let inner = self.parse_nonattr_formal_type();
                self.node(NodeKind::ConstP, vec![inner])
            }
            TokenKind::Var => {
                self.bump();
                let inner = self.parse_nonattr_formal_type();
                self.node(NodeKind::VarP, vec![inner])
            }
            _ => self.parse_nonattr_formal_type(),
        }
    }

    /// `nonAttrFormalType := OCTETSEQ | POINTER | ARRAY OF qualident |
    /// ARGLIST OF nonAttrFormalType | qualident`
    ///
    /// Bare `OCTETSEQ` is the octet-sequence cast view, bare `POINTER`
    /// the untyped address view.
    fn parse_nonattr_formal_type(&mut self) -> Node {
        match self.current_kind() {
            TokenKind::Octetseq => {
                self.bump();
                self.node(NodeKind::CastOctSeq, Vec::new())
            }
            TokenKind::Pointer => {
                self.bump();
                self.node(NodeKind::CastAddr, Vec::new())
            }
            TokenKind::Array => {
                self.bump();
                self.match_token(
                    TokenKind::Of,
                    TokenSet::new(&[TokenKind::Ident]).union(sets::FPARAMS_RESYNC),
                );
                let element = self.parse_qualident(sets::FPARAMS_RESYNC);
                self.node(NodeKind::OpenArray, vec![element])
            }
            TokenKind::Arglist => {
                self.bump();
                self.match_token(
                    TokenKind::Of,
                    sets::FORMAL_TYPE_FIRST.union(sets::FPARAMS_RESYNC),
                );
                let element = self.parse_nonattr_formal_type();
                self.node(NodeKind::ArgList, vec![element])
            }
            TokenKind::Ident => self.parse_qualident(sets::FPARAMS_RESYNC),
            _ => {
                self.match_set(sets::FORMAL_TYPE_FIRST, sets::FPARAMS_RESYNC);
                Node::empty()
            }
        }
    }

    /// `procedureHeader := PROCEDURE ('[' BindableIdent ']')? Ident
    ///                     ('(' formalParams (';' formalParams)* ')')?
    ///                     (':' qualident)?`
    pub(crate) fn parse_procedure_header(&mut self) -> Node {
        self.enter("procedureHeader");
        self.bump(); // PROCEDURE
        let binding = if self.at(TokenKind::LBracket) {
            self.bump();
            let binding = self.parse_binding_specifier();
            self.match_token(
                TokenKind::RBracket,
                TokenSet::new(&[TokenKind::Ident, TokenKind::LParen, TokenKind::Semicolon]),
            );
            binding
        } else {
            Node::empty()
        };
        let name = self.expect_ident(TokenSet::new(&[
            TokenKind::LParen,
            TokenKind::Colon,
            TokenKind::Semicolon,
        ]));
        let params = if self.at(TokenKind::LParen) {
            self.bump();
            let mut groups = vec![self.parse_formal_params()];
            while self.at(TokenKind::Semicolon) {
                self.bump();
                groups.push(self.parse_formal_params());
            }
            self.match_token(
                TokenKind::RParen,
                TokenSet::new(&[TokenKind::Colon, TokenKind::Semicolon]),
            );
            self.list(NodeKind::FParamList, groups)
        } else {
            Node::empty()
        };
        let ret = if self.at(TokenKind::Colon) {
            self.bump();
            self.parse_qualident(TokenSet::new(&[TokenKind::Semicolon]))
        } else {
            Node::empty()
        };
        self.leave();
        self.node(NodeKind::ProcDecl, vec![binding, name, params, ret])
    }

    /// The bracketed bindable identifier of a binding-capable procedure.
    /// Only members of the bindable table are accepted; anything else is
    /// reported and kept as a plain identifier.
    fn parse_binding_specifier(&mut self) -> Node {
        if self.at(TokenKind::Ident) {
            let token = self.bump();
            let sym = self.lexeme_or_empty(&token);
            let bindable = self
                .pool()
                .with(sym, |text| {
                    text.map(|text| self.table().is_bindable(sym, text))
                })
                .unwrap_or(false);
            if !bindable {
                self.diags().report_with_lexeme(
                    DiagnosticKind::UnexpectedSymbol {
                        found: TokenKind::Ident,
                    },
                    token.pos,
                    Some(sym),
                );
            }
            let ident = Node::leaf(crate::ast::Value::Ident(sym));
            self.node(NodeKind::Bind, vec![ident])
        } else {
            self.match_token(
                TokenKind::Ident,
                TokenSet::new(&[TokenKind::RBracket, TokenKind::Semicolon]),
            );
            Node::empty()
        }
    }

    /// `formalParams := (CONST | VAR)? identList ':' nonAttrFormalType`
    fn parse_formal_params(&mut self) -> Node {
        let attr = match self.current_kind() {
            TokenKind::Const => {
                self.bump();
                Some(NodeKind::ConstP)
            }
            TokenKind::Var => {
                self.bump();
                Some(NodeKind::VarP)
            }
            _ => None,
        };
        let names = self.parse_ident_list(sets::FPARAMS_RESYNC);
        self.match_token(
            TokenKind::Colon,
            sets::FORMAL_TYPE_FIRST.union(sets::FPARAMS_RESYNC),
        );
        let mut formal = self.parse_nonattr_formal_type();
        if let Some(wrap) = attr {
            formal = self.node(wrap, vec![formal]);
        }
        self.node(NodeKind::FParams, vec![names, formal])
    }

    /// `procedureDeclaration := procedureHeader ';' block Ident`
    fn parse_procedure_declaration(&mut self) -> Node {
        self.enter("procedureDeclaration");
        let header = self.parse_procedure_header();
        self.expect_semicolon(sets::DECLARATION_RESYNC);
        let block = self.parse_block();
        if self.at(TokenKind::Ident) {
            let token = self.bump();
            let tail = token.lexeme;
            let head = match header.child(1) {
                Some(Node::Leaf {
                    value: crate::ast::Value::Ident(sym),
                    ..
                }) => Some(*sym),
                _ => None,
            };
            if let (Some(tail), Some(head)) = (tail, head) {
                if tail != head {
                    self.diags().report_with_lexeme(
                        DiagnosticKind::TailMismatch,
                        token.pos,
                        Some(tail),
                    );
                }
            }
        } else {
            self.match_token(TokenKind::Ident, TokenSet::new(&[TokenKind::Semicolon]));
        }
        self.leave();
        self.node(NodeKind::Proc, vec![header, block])
    }

    /// `UNQUALIFIED qualident (',' qualident)* ';'`
    fn parse_unqualified_aliases(&mut self) -> Node {
        self.bump(); // UNQUALIFIED
        let mut names = vec![self.parse_qualident(sets::DEFINITION_RESYNC.with(TokenKind::Comma))];
        while self.at(TokenKind::Comma) {
            self.bump();
            names.push(self.parse_qualident(sets::DEFINITION_RESYNC.with(TokenKind::Comma)));
        }
        self.expect_semicolon(sets::DEFINITION_RESYNC);
        let list = self.list(NodeKind::IdentList, names);
        self.node(NodeKind::Unq, vec![list])
    }

    /// `toDoList := TO DO ('(' QuotedString ',' WholeNumber ')')?
    ///              QuotedString (';' QuotedString)* END`
    fn parse_todo(&mut self) -> Node {
        self.enter("toDoList");
        self.bump(); // TO
        self.match_token(
            TokenKind::Do,
            TokenSet::new(&[TokenKind::QuotedString, TokenKind::LParen, TokenKind::End]),
        );
        let tracking = if self.at(TokenKind::LParen) {
            self.bump();
            let issue = self.expect_quoted(TokenSet::new(&[TokenKind::Comma, TokenKind::RParen]));
            self.match_token(
                TokenKind::Comma,
                TokenSet::new(&[TokenKind::WholeNumber, TokenKind::RParen]),
            );
            let weight = if self.at(TokenKind::WholeNumber) {
                let token = self.bump();
                self.int_leaf(token)
            } else {
                self.match_token(
                    TokenKind::WholeNumber,
                    TokenSet::new(&[TokenKind::RParen, TokenKind::QuotedString]),
                );
                Node::empty()
            };
            self.match_token(
                TokenKind::RParen,
                TokenSet::new(&[TokenKind::QuotedString, TokenKind::End]),
            );
            self.list(NodeKind::ExprList, vec![issue, weight])
        } else {
            Node::empty()
        };
        let mut tasks = Vec::new();
        while self.at(TokenKind::QuotedString) {
            let token = self.bump();
            let sym = self.lexeme_or_empty(&token);
            tasks.push(Node::leaf(crate::ast::Value::Quoted(sym)));
            if self.at(TokenKind::Semicolon) {
                self.bump();
            } else {
                break;
            }
        }
        self.match_token(TokenKind::End, sets::DEFINITION_RESYNC);
        let tasks = self.list_or_empty(NodeKind::TaskList, tasks);
        self.leave();
        self.node(NodeKind::Todo, vec![tracking, tasks])
    }
}
