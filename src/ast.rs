//! Abstract Syntax Tree definitions for the Lak language.
//!
//! The AST is produced by [`crate::parser`] and consumed by
//! [`crate::evaluator`]. Every node keeps the [`Token`] that anchored its
//! parse so it can be named in diagnostics.

use crate::token::Token;

/// A brace-delimited sequence of statements.
///
/// `Block` only ever appears embedded in an `if`, `while`, or function body
/// in the current grammar (see [`crate::parser`]'s EBNF) — there is no
/// production that yields a bare `{ ... }` as a top-level statement.
#[derive(Debug, Clone)]
pub struct Block {
    /// The `{` token that opened this block.
    pub token: Token,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Let {
        token: Token,
        name: String,
        value: Expr,
    },
    ExpressionStatement {
        token: Token,
        expression: Expr,
    },
    /// Present for data-model completeness with the spec's `Stmt` table;
    /// the parser never constructs this directly, since a block is always
    /// an attribute of `If`/`While`/`FunctionLiteral`, never a freestanding
    /// statement.
    Block(Block),
    While {
        token: Token,
        condition: Expr,
        body: Block,
    },
}

impl Stmt {
    pub fn token_literal(&self) -> &str {
        match self {
            Stmt::Let { token, .. } => &token.literal,
            Stmt::ExpressionStatement { token, .. } => &token.literal,
            Stmt::Block(block) => &block.token.literal,
            Stmt::While { token, .. } => &token.literal,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Identifier {
        token: Token,
        value: String,
    },
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expr>,
    },
    Infix {
        token: Token,
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
    },
    If {
        token: Token,
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<String>,
        body: Block,
    },
    Call {
        token: Token,
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

impl Expr {
    pub fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier { token, .. }
            | Expr::IntegerLiteral { token, .. }
            | Expr::BooleanLiteral { token, .. }
            | Expr::Prefix { token, .. }
            | Expr::Infix { token, .. }
            | Expr::If { token, .. }
            | Expr::FunctionLiteral { token, .. }
            | Expr::Call { token, .. } => &token.literal,
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier { value, .. } => write!(f, "{value}"),
            Expr::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Expr::BooleanLiteral { value, .. } => write!(f, "{value}"),
            Expr::Prefix {
                operator, right, ..
            } => write!(f, "({operator}{right})"),
            Expr::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            Expr::If { condition, .. } => write!(f, "if{condition} {{ ... }}"),
            Expr::FunctionLiteral { parameters, .. } => {
                write!(f, "fn({}) {{ ... }}", parameters.join(", "))
            }
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                let args: Vec<String> = arguments.iter().map(Expr::to_string).collect();
                write!(f, "{function}({})", args.join(", "))
            }
        }
    }
}

/// The root node: an ordered sequence of statements.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn tok(kind: TokenKind, literal: &str) -> Token {
        Token::new(kind, literal)
    }

    #[test]
    fn infix_display_is_fully_parenthesized() {
        let expr = Expr::Infix {
            token: tok(TokenKind::Plus, "+"),
            left: Box::new(Expr::IntegerLiteral {
                token: tok(TokenKind::Int, "1"),
                value: 1,
            }),
            operator: "+".to_string(),
            right: Box::new(Expr::IntegerLiteral {
                token: tok(TokenKind::Int, "2"),
                value: 2,
            }),
        };
        assert_eq!(expr.to_string(), "(1 + 2)");
    }

    #[test]
    fn prefix_display_is_parenthesized() {
        let expr = Expr::Prefix {
            token: tok(TokenKind::Minus, "-"),
            operator: "-".to_string(),
            right: Box::new(Expr::Identifier {
                token: tok(TokenKind::Ident, "a"),
                value: "a".to_string(),
            }),
        };
        assert_eq!(expr.to_string(), "(-a)");
    }
}
