//! Diagnostic rendering shared by the REPL and single-file run modes.
//!
//! The language core reports faults as plain strings (see
//! [`crate::parser::Parser::parse_program`]'s error list and the
//! evaluator's stderr lines) — by design there is no source-position
//! tracking (spec Non-goal), so this module can only colorize and list
//! messages, not point at a span the way a full `ariadne::Report` would.

use ariadne::{Color, Fmt};

/// Renders the parser's accumulated error messages to stderr, one per
/// line, each prefixed with `  - ` per the driver's contract.
pub fn report_parse_errors(errors: &[String]) {
    for message in errors {
        eprintln!("  - {}", message.fg(Color::Red));
    }
}

/// Renders a successful evaluation result to stdout per the driver's
/// contract: `Resultado: <inspect>`.
pub fn report_result(inspect: &str) {
    println!("{} {}", "Resultado:".fg(Color::Green), inspect);
}
