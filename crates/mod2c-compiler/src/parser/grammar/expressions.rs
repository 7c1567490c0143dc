//! Expressions: three precedence levels, designator chains, literals.

use mod2c_core::Symbol;

use crate::ast::{Node, NodeKind, Value};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::sets;
use crate::token::{Token, TokenKind, TokenSet};

impl Parser<'_> {
    /// Parse an expression when the current token can start one, else
    /// report, resync, and yield `EMPTY`.
    pub(crate) fn parse_expression_or_empty(&mut self, resync: TokenSet) -> Node {
        if self.match_set(sets::EXPR_FIRST, resync) {
            self.parse_expression()
        } else {
            Node::empty()
        }
    }

    /// `expression := simpleExpression (relOp simpleExpression)?`
    pub(crate) fn parse_expression(&mut self) -> Node {
        self.enter("expression");
        let left = self.parse_simple_expression();
        let expr = match rel_op(self.current_kind()) {
            Some(op) => {
                self.bump();
                let right = self.parse_simple_expression();
                self.node(op, vec![left, right])
            }
            None => left,
        };
        self.leave();
        expr
    }

    /// `simpleExpression := '-'? term (addOp term)*`
    fn parse_simple_expression(&mut self) -> Node {
        let negated = if self.at(TokenKind::Minus) {
            self.bump();
            true
        } else {
            false
        };
        let mut left = self.parse_term();
        if negated {
            left = self.node(NodeKind::Neg, vec![left]);
        }
        while let Some(op) = add_op(self.current_kind()) {
            self.bump();
            let right = self.parse_term();
            left = self.node(op, vec![left, right]);
        }
        left
    }

    /// `term := factor (mulOp factor)*`
    fn parse_term(&mut self) -> Node {
        let mut left = self.parse_factor();
        while let Some(op) = mul_op(self.current_kind()) {
            self.bump();
            let right = self.parse_factor();
            left = self.node(op, vec![left, right]);
        }
        left
    }

    /// `factor := NOT factor | simpleFactor ('::' qualident)?`
    fn parse_factor(&mut self) -> Node {
        if self.at(TokenKind::Not) {
            self.bump();
            let operand = self.parse_factor();
            return self.node(NodeKind::Not, vec![operand]);
        }
        let factor = self.parse_simple_factor();
        if self.at(TokenKind::DoubleColon) {
            self.bump();
            let target = self.parse_qualident(sets::EXPR_RESYNC);
            return self.node(NodeKind::TypeConv, vec![factor, target]);
        }
        factor
    }

    fn parse_simple_factor(&mut self) -> Node {
        match self.current_kind() {
            TokenKind::WholeNumber => {
                let token = self.bump();
                self.int_leaf(token)
            }
            TokenKind::RealNumber => {
                let token = self.bump();
                let sym = self.lexeme_or_empty(&token);
                Node::leaf(Value::Real(sym))
            }
            TokenKind::CharCode => {
                let token = self.bump();
                self.char_leaf(token)
            }
            TokenKind::QuotedString => {
                let token = self.bump();
                let sym = self.lexeme_or_empty(&token);
                Node::leaf(Value::Quoted(sym))
            }
            TokenKind::LBrace => self.parse_structured_value(),
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expression_or_empty(sets::EXPR_RESYNC);
                self.match_token(TokenKind::RParen, sets::EXPR_RESYNC);
                self.node(NodeKind::Expr, vec![inner])
            }
            TokenKind::Ident => self.parse_designator_or_call(),
            _ => {
                let found = self.current_kind();
                let pos = self.current_pos();
                let lexeme = self.current().lexeme;
                self.diags()
                    .report_with_lexeme(DiagnosticKind::UnexpectedSymbol { found }, pos, lexeme);
                self.skip_to(sets::EXPR_RESYNC);
                Node::empty()
            }
        }
    }

    /// `designatorOrFuncCall := designator ('(' expressionList? ')'
    /// selector*)*`
    ///
    /// A call may appear anywhere in the chain (`f(x)^.y`); in that case
    /// the `FCALL` node becomes the head of a further `DESIG`.
    fn parse_designator_or_call(&mut self) -> Node {
        let mut designator = self.parse_designator();
        while self.at(TokenKind::LParen) {
            self.bump();
            let args = if self.at_set(sets::EXPR_FIRST) {
                self.parse_expression_list()
            } else {
                Node::empty()
            };
            self.match_token(TokenKind::RParen, sets::EXPR_RESYNC);
            designator = self.node(NodeKind::FCall, vec![designator, args]);
            let selectors = self.parse_selectors();
            if !selectors.is_empty() {
                let selectors = self.list(NodeKind::SelList, selectors);
                designator = self.node(NodeKind::Desig, vec![designator, selectors]);
            }
        }
        designator
    }

    /// `designator := qualident selector*` with selectors `^`, `.Ident`,
    /// `[expr]` and `[expr .. expr]`.
    ///
    /// A bare head stays a plain `IDENT`; selectors produce a `DESIG`
    /// node owning the head and the selector list.
    pub(crate) fn parse_designator(&mut self) -> Node {
        let head = self.expect_ident(sets::EXPR_RESYNC);
        let selectors = self.parse_selectors();
        if selectors.is_empty() {
            head
        } else {
            let selectors = self.list(NodeKind::SelList, selectors);
            self.node(NodeKind::Desig, vec![head, selectors])
        }
    }

    fn parse_selectors(&mut self) -> Vec<Node> {
        let mut selectors = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::Caret => {
                    self.bump();
                    selectors.push(self.node(NodeKind::Deref, Vec::new()));
                }
                TokenKind::Dot if self.lookahead_kind() == TokenKind::Ident => {
                    self.bump();
                    let field = self.expect_ident(sets::EXPR_RESYNC);
                    selectors.push(self.node(NodeKind::Select, vec![field]));
                }
                TokenKind::LBracket => {
                    self.bump();
                    let index = self.parse_expression_or_empty(
                        sets::EXPR_RESYNC.with(TokenKind::RBracket),
                    );
                    let selector = if self.at(TokenKind::DotDot) {
                        self.bump();
                        let upper = self.parse_expression_or_empty(
                            sets::EXPR_RESYNC.with(TokenKind::RBracket),
                        );
                        let range = self.node(NodeKind::Range, vec![index, upper]);
                        self.node(NodeKind::Slice, vec![range])
                    } else {
                        self.node(NodeKind::Index, vec![index])
                    };
                    selectors.push(selector);
                    self.match_token(TokenKind::RBracket, sets::EXPR_RESYNC);
                }
                _ => break,
            }
        }
        selectors
    }

    /// `qualident := Ident ('.' Ident)*` in name and type positions.
    ///
    /// A single identifier stays a plain `IDENT`; a dotted name becomes a
    /// `QUALIDENT` list.
    pub(crate) fn parse_qualident(&mut self, resync: TokenSet) -> Node {
        let first = self.expect_ident(resync);
        if first.is_empty_node() {
            return first;
        }
        let mut parts = vec![first];
        while self.at(TokenKind::Dot) && self.lookahead_kind() == TokenKind::Ident {
            self.bump();
            parts.push(self.expect_ident(resync));
        }
        if parts.len() == 1 {
            parts.pop().unwrap_or_else(Node::empty)
        } else {
            self.list(NodeKind::Qualident, parts)
        }
    }

    /// `structuredValue := '{' (valueComponent (',' valueComponent)*)? '}'`
    pub(crate) fn parse_structured_value(&mut self) -> Node {
        self.bump(); // '{'
        let mut components = Vec::new();
        if self.at_set(sets::EXPR_FIRST) {
            loop {
                let mut component = self.parse_expression();
                if self.at(TokenKind::DotDot) {
                    self.bump();
                    let upper = self
                        .parse_expression_or_empty(sets::EXPR_RESYNC.with(TokenKind::RBrace));
                    component = self.node(NodeKind::Range, vec![component, upper]);
                }
                components.push(component);
                if self.at(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.match_token(TokenKind::RBrace, sets::EXPR_RESYNC);
        let components = self.list_or_empty(NodeKind::ExprList, components);
        self.node(NodeKind::Struct, vec![components])
    }

    /// `expressionList := expression (',' expression)*`
    pub(crate) fn parse_expression_list(&mut self) -> Node {
        let mut exprs = vec![self.parse_expression()];
        while self.at(TokenKind::Comma) {
            self.bump();
            exprs.push(self.parse_expression());
        }
        self.list(NodeKind::ExprList, exprs)
    }

    /// `INTVAL` leaf from a whole-number token (decimal or `0x` base-16).
    pub(crate) fn int_leaf(&mut self, token: Token) -> Node {
        let sym = self.lexeme_or_empty(&token);
        let value = self
            .pool()
            .with(sym, |text| text.map(parse_whole_number))
            .unwrap_or(0);
        Node::leaf(Value::Int { value, lexeme: sym })
    }

    /// `CHRVAL` leaf from a `0u` character-code token.
    fn char_leaf(&mut self, token: Token) -> Node {
        let sym: Symbol = self.lexeme_or_empty(&token);
        let code = self
            .pool()
            .with(sym, |text| {
                text.and_then(|text| text.strip_prefix("0u"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            })
            .unwrap_or(0);
        Node::leaf(Value::Char(code))
    }
}

fn parse_whole_number(text: &str) -> u64 {
    if let Some(hex) = text.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).unwrap_or(u64::MAX)
    } else {
        text.parse().unwrap_or(u64::MAX)
    }
}

fn rel_op(kind: TokenKind) -> Option<NodeKind> {
    Some(match kind {
        TokenKind::Equal => NodeKind::Eq,
        TokenKind::NotEqual => NodeKind::Neq,
        TokenKind::Identity => NodeKind::Idty,
        TokenKind::Less => NodeKind::Lt,
        TokenKind::LessOrEq => NodeKind::LtEq,
        TokenKind::Greater => NodeKind::Gt,
        TokenKind::GreaterOrEq => NodeKind::GtEq,
        TokenKind::In => NodeKind::In,
        _ => return None,
    })
}

fn add_op(kind: TokenKind) -> Option<NodeKind> {
    Some(match kind {
        TokenKind::Plus => NodeKind::Plus,
        TokenKind::Minus => NodeKind::Minus,
        TokenKind::Or => NodeKind::Or,
        TokenKind::Ampersand => NodeKind::Concat,
        TokenKind::Backslash => NodeKind::SetDiff,
        _ => return None,
    })
}

fn mul_op(kind: TokenKind) -> Option<NodeKind> {
    Some(match kind {
        TokenKind::Asterisk => NodeKind::Asterisk,
        TokenKind::Solidus => NodeKind::Solidus,
        TokenKind::Div => NodeKind::Div,
        TokenKind::Mod => NodeKind::Mod,
        TokenKind::And => NodeKind::And,
        _ => return None,
    })
}
