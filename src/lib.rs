//! The Lak programming language interpreter library.
//!
//! This library provides the core pipeline of the Lak interpreter:
//! lexical analysis, parsing, the AST, the value model, lexically scoped
//! environments, and the tree-walking evaluator.
//!
//! # Modules
//!
//! - [`token`] - Token kinds and source lexemes
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`parser`] - Pratt/recursive-descent parser
//! - [`object`] - The runtime value model
//! - [`environment`] - Lexically scoped name bindings
//! - [`evaluator`] - The tree-walking evaluator
//! - [`error`] - Diagnostic rendering shared by the binary's two run modes
//!
//! # Example
//!
//! ```
//! use lak::environment::Environment;
//! use lak::evaluator::eval_program;
//! use lak::lexer::Lexer;
//! use lak::parser::Parser;
//!
//! let (program, errors) = Parser::new(Lexer::new("1 + 2 * 3;")).parse_program();
//! assert!(errors.is_empty());
//!
//! let env = Environment::new();
//! let result = eval_program(&program, &env);
//! assert_eq!(result.to_string(), "7");
//! ```

pub mod ast;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod token;
