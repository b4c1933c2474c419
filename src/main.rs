//! The Lak programming language interpreter.
//!
//! This is the main entry point for the Lak interpreter CLI. It provides
//! an interactive read-eval loop and a one-shot file runner.
//!
//! # Usage
//!
//! ```text
//! lak repl        # interactive session (also the default with no args)
//! lak run <file>  # evaluate a file once and exit
//! ```
//!
//! # Architecture
//!
//! The driver is a thin shell around four core operations exposed by the
//! [`lak`] library: lexing, parsing, building a fresh environment, and
//! evaluating a program against an environment. It carries none of the
//! language semantics itself.
//!
//! 1. **Lexing** ([`lak::lexer`]) - Converts source text into tokens
//! 2. **Parsing** ([`lak::parser`]) - Builds an AST and collects errors
//! 3. **Evaluation** ([`lak::evaluator`]) - Walks the AST against an
//!    [`lak::environment::Environment`]
//!
//! # Error Reporting
//!
//! Parse errors are rendered with [ariadne](https://docs.rs/ariadne)'s
//! color helpers via [`lak::error`]; runtime faults are printed by the
//! evaluator itself to stderr as they occur.

use clap::{Parser, Subcommand};
use lak::environment::Environment;
use lak::error::{report_parse_errors, report_result};
use lak::evaluator::eval_program;
use lak::lexer::Lexer;
use lak::parser::Parser as LakParser;
use std::io::{self, BufRead, Write};

/// Command-line interface for the Lak interpreter.
#[derive(Parser)]
#[command(name = "lak")]
#[command(about = "The Lak programming language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive read-eval session (the default).
    Repl,
    /// Evaluate a single source file once and print its result.
    Run {
        /// The source file to evaluate (e.g., `program.lak`).
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl(),
        Commands::Run { file } => {
            if let Err(e) = run_file(&file) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Evaluates one source text against a fresh environment, printing the
/// result or the parser's accumulated errors.
fn evaluate_and_report(source: &str, env: &lak::environment::Env) {
    let (program, errors) = LakParser::new(Lexer::new(source)).parse_program();
    if !errors.is_empty() {
        report_parse_errors(&errors);
        return;
    }
    let result = eval_program(&program, env);
    report_result(&result.to_string());
}

/// Reads a whole file and runs it once through the pipeline against a
/// fresh environment.
fn run_file(path: &str) -> Result<(), String> {
    let source = std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {e}"))?;
    let env = Environment::new();
    evaluate_and_report(&source, &env);
    Ok(())
}

/// Accumulates stdin lines into a buffer until the literal line `run` is
/// seen, then evaluates the buffer against a session-persistent
/// environment. The literal line `exit` terminates the process.
fn repl() {
    let env = Environment::new();
    let mut buffer = String::new();
    let stdin = io::stdin();

    loop {
        print!("lak> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(_) => break,
        }
        let line = line.trim_end_matches(['\n', '\r']);

        match line {
            "exit" => std::process::exit(0),
            "run" => {
                evaluate_and_report(&buffer, &env);
                buffer.clear();
            }
            _ => {
                buffer.push_str(line);
                buffer.push('\n');
            }
        }
    }
}
