//! Parser for the Lak programming language.
//!
//! This module provides the [`Parser`] struct, which transforms a token
//! stream into an Abstract Syntax Tree ([`Program`]).
//!
//! # Overview
//!
//! Statements are parsed by recursive descent; expressions are parsed with
//! a Pratt (top-down operator-precedence) parser driven by per-token
//! prefix and infix handler tables. The parser never aborts: a malformed
//! statement is recorded as a message in [`Parser::errors`] and skipped,
//! and parsing always runs to end of input.
//!
//! # Grammar
//!
//! ```text
//! program     = { statement } .
//! statement   = letStmt | whileStmt | exprStmt .
//! letStmt     = "let" IDENT "=" expression [ ";" ] .
//! whileStmt   = "while" "(" expression ")" block .
//! exprStmt    = expression [ ";" ] .
//! block       = "{" { statement } "}" .
//! ifExpr      = "if" "(" expression ")" block [ "else" ( ifExpr | block ) ] .
//! fnLit       = "fn" "(" [ IDENT { "," IDENT } ] ")" block .
//! call        = expression "(" [ expression { "," expression } ] ")" .
//! ```
//!
//! # See Also
//!
//! * [`crate::lexer`] - Produces the token stream consumed by the parser
//! * [`crate::ast`] - Defines the AST types produced by the parser
//! * [`crate::evaluator`] - Consumes the AST to produce a [`crate::object::Value`]

use crate::ast::{Block, Expr, Program, Stmt};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Assign,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::Lparen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// A recursive-descent, Pratt-driven parser for the Lak language.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peek_token: Token,
    /// Human-readable messages accumulated on `expect_peek` failures and
    /// unknown prefix tokens. Parsing never stops because of these.
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    /// Parses the whole token stream, returning the program and every
    /// error message collected along the way.
    pub fn parse_program(mut self) -> (Program, Vec<String>) {
        let mut statements = Vec::new();

        while self.current_token.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        (Program { statements }, self.errors)
    }

    fn next_token(&mut self) {
        self.current_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    /// If the peeked token matches `kind`, advances and returns `true`.
    /// Otherwise records an error and returns `false`.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.errors.push(format!(
                "Expected {}, got {}",
                kind.name(),
                self.peek_token.kind
            ));
            false
        }
    }

    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::While => self.parse_while_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current_token.literal.clone();

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Stmt::Let { token, name, value })
    }

    fn parse_while_statement(&mut self) -> Option<Stmt> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::Lparen) {
            return None;
        }
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }
        if !self.expect_peek(TokenKind::Lbrace) {
            return None;
        }

        let body = self.parse_block()?;

        Some(Stmt::While {
            token,
            condition,
            body,
        })
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let token = self.current_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Stmt::ExpressionStatement { token, expression })
    }

    /// Parses a block. `current_token` must be `{` on entry; on return it
    /// is the matching `}` (or `EOF`, if the block was never closed).
    fn parse_block(&mut self) -> Option<Block> {
        let token = self.current_token.clone();
        self.next_token();

        let mut statements = Vec::new();
        while !self.current_is(TokenKind::Rbrace) && !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        Some(Block { token, statements })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon)
            && precedence < precedence_of(self.peek_token.kind)
        {
            left = match self.peek_token.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt => {
                    self.next_token();
                    self.parse_infix(left)?
                }
                TokenKind::Lparen => {
                    self.next_token();
                    self.parse_call(left)?
                }
                _ => return Some(left),
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.current_token.kind {
            TokenKind::Ident => Some(Expr::Identifier {
                token: self.current_token.clone(),
                value: self.current_token.literal.clone(),
            }),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::True | TokenKind::False => Some(Expr::BooleanLiteral {
                token: self.current_token.clone(),
                value: self.current_is(TokenKind::True),
            }),
            TokenKind::Lparen => self.parse_grouped_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::If => self.parse_if_expression(),
            _ => {
                self.errors.push(format!(
                    "No prefix parse function for {} found",
                    self.current_token.kind
                ));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expr::IntegerLiteral { token, value }),
            Err(_) => {
                self.errors
                    .push(format!("Could not parse {:?} as integer", token.literal));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();
        let operator = token.literal.clone();
        self.next_token();
        let right = Box::new(self.parse_expression(Precedence::Prefix)?);
        Some(Expr::Prefix {
            token,
            operator,
            right,
        })
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let token = self.current_token.clone();
        let operator = token.literal.clone();
        let precedence = precedence_of(token.kind);
        self.next_token();
        let right = Box::new(self.parse_expression(precedence)?);
        Some(Expr::Infix {
            token,
            left: Box::new(left),
            operator,
            right,
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }
        Some(expr)
    }

    fn parse_function_literal(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::Lparen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::Lbrace) {
            return None;
        }
        let body = self.parse_block()?;

        Some(Expr::FunctionLiteral {
            token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();

        if self.peek_is(TokenKind::Rparen) {
            self.next_token();
            return Some(params);
        }

        self.next_token();
        params.push(self.current_token.literal.clone());

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            params.push(self.current_token.literal.clone());
        }

        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }
        Some(params)
    }

    fn parse_call(&mut self, function: Expr) -> Option<Expr> {
        let token = self.current_token.clone();
        let arguments = self.parse_call_arguments()?;
        Some(Expr::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();

        if self.peek_is(TokenKind::Rparen) {
            self.next_token();
            return Some(args);
        }

        self.next_token();
        args.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            args.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }
        Some(args)
    }

    /// Parses `if (cond) { ... } [else (if ... | { ... })]`. An `else if`
    /// is parsed by recursing into another if-expression and wrapping it
    /// as the sole statement of a synthetic block, which is what lets
    /// `else if` chains reuse the single `If` AST node.
    fn parse_if_expression(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::Lparen) {
            return None;
        }
        self.next_token();
        let condition = Box::new(self.parse_expression(Precedence::Lowest)?);

        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }
        if !self.expect_peek(TokenKind::Lbrace) {
            return None;
        }
        let consequence = self.parse_block()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if self.peek_is(TokenKind::If) {
                self.next_token();
                let if_token = self.current_token.clone();
                let nested = self.parse_if_expression()?;
                Some(Block {
                    token: if_token.clone(),
                    statements: vec![Stmt::ExpressionStatement {
                        token: if_token,
                        expression: nested,
                    }],
                })
            } else if self.expect_peek(TokenKind::Lbrace) {
                self.parse_block()?
            } else {
                return None;
            }
        } else {
            None
        };

        Some(Expr::If {
            token,
            condition,
            consequence,
            alternative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (Program, Vec<String>) {
        Parser::new(Lexer::new(input)).parse_program()
    }

    #[test]
    fn let_statements() {
        let (program, errors) = parse("let x = 5; let y = 10;");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn precedence_addition_before_nothing() {
        let (program, errors) = parse("1 + 2 * 3;");
        assert!(errors.is_empty());
        let Stmt::ExpressionStatement { expression, .. } = &program.statements[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(expression.to_string(), "(1 + (2 * 3))");
    }

    #[test]
    fn equality_binds_looser_than_comparison() {
        let (program, _) = parse("a == b < c;");
        let Stmt::ExpressionStatement { expression, .. } = &program.statements[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(expression.to_string(), "(a == (b < c))");
    }

    #[test]
    fn prefix_minus_binds_tighter_than_product() {
        let (program, _) = parse("-a * b;");
        let Stmt::ExpressionStatement { expression, .. } = &program.statements[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(expression.to_string(), "((-a) * b)");
    }

    #[test]
    fn addition_is_left_associative() {
        let (program, _) = parse("a + b + c;");
        let Stmt::ExpressionStatement { expression, .. } = &program.statements[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(expression.to_string(), "((a + b) + c)");
    }

    #[test]
    fn let_missing_identifier_reports_error() {
        let (_, errors) = parse("let = 5;");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Expected IDENT, got ASSIGN"));
    }

    #[test]
    fn let_missing_assign_reports_error() {
        let (_, errors) = parse("let x 5;");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Expected ASSIGN, got INT"));
    }

    #[test]
    fn function_literal_and_call() {
        let (program, errors) = parse("let add = fn(a, b) { a + b; }; add(2, 3);");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn if_else_if_chain_parses_as_nested_if() {
        let (program, errors) = parse("if (a) { 1 } else if (b) { 2 } else { 3 };");
        assert!(errors.is_empty());
        let Stmt::ExpressionStatement { expression, .. } = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expr::If { alternative, .. } = expression else {
            panic!("expected if expression");
        };
        let alt = alternative.as_ref().expect("expected else-if block");
        assert_eq!(alt.statements.len(), 1);
    }

    #[test]
    fn while_statement_parses_body_block() {
        let (program, errors) = parse("while (x < 3) { let x = x + 1; }");
        assert!(errors.is_empty());
        let Stmt::While { body, .. } = &program.statements[0] else {
            panic!("expected while statement");
        };
        assert_eq!(body.statements.len(), 1);
    }
}
