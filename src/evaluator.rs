//! The tree-walking evaluator.
//!
//! [`eval_program`] is the single entry point used by the driver. Every
//! other `eval_*` function is a recursive structural dispatch over one AST
//! category, threading an [`Env`] through the walk. Runtime faults never
//! panic: they print a diagnostic line to stderr and yield [`Value::Null`],
//! which then propagates like any other value.

use crate::ast::{Block, Expr, Program, Stmt};
use crate::environment::{Env, Environment};
use crate::object::{FunctionValue, Value};
use std::rc::Rc;

/// Evaluates a whole program against `env`. If the last statement (or any
/// earlier one) produces a `ReturnValue`, it is unwrapped immediately —
/// this is the program-level return boundary.
pub fn eval_program(program: &Program, env: &Env) -> Value {
    let mut result = Value::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        if let Value::ReturnValue(inner) = result {
            return *inner;
        }
    }
    result
}

/// Evaluates a block's statements in order without unwrapping a
/// `ReturnValue` it produces, so the sentinel can keep propagating to the
/// function boundary that should actually unwrap it.
fn eval_block(block: &Block, env: &Env) -> Value {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Stmt, env: &Env) -> Value {
    match stmt {
        Stmt::ExpressionStatement { expression, .. } => eval_expression(expression, env),
        Stmt::Block(block) => eval_block(block, env),
        Stmt::Let { name, value, .. } => eval_let(name, value, env),
        Stmt::While {
            condition, body, ..
        } => eval_while(condition, body, env),
    }
}

/// Binds `name` to the evaluated `value`. When the value is a function, a
/// fresh environment is spliced between the function and its captured
/// environment and the function is rebuilt over it, with `name` bound
/// inside that fresh environment to the rebuilt function itself — this is
/// what lets `let fact = fn(n) { ... fact(n - 1) ... };` resolve its own
/// name recursively.
fn eval_let(name: &str, value: &Expr, env: &Env) -> Value {
    let value = eval_expression(value, env);

    let bound = if let Value::Function(func) = &value {
        let self_env = Environment::new_enclosed(func.env.clone());
        let recursive = Rc::new(FunctionValue {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: self_env.clone(),
        });
        self_env
            .borrow_mut()
            .set(name, Value::Function(recursive.clone()));
        Value::Function(recursive)
    } else {
        value
    };

    env.borrow_mut().set(name, bound.clone());
    bound
}

/// `while` only keeps looping while the condition is literally
/// `Boolean(true)`; any other value — including a non-boolean truthy one —
/// ends the loop. This differs from `if`'s truthiness rule by design (see
/// the design notes on the asymmetry).
fn eval_while(condition: &Expr, body: &Block, env: &Env) -> Value {
    let mut result = Value::Null;
    loop {
        match eval_expression(condition, env) {
            Value::Boolean(true) => {}
            _ => break,
        }
        result = eval_block(body, env);
        if matches!(result, Value::ReturnValue(_)) {
            return result;
        }
    }
    result
}

fn eval_expression(expr: &Expr, env: &Env) -> Value {
    match expr {
        Expr::IntegerLiteral { value, .. } => Value::Integer(*value),
        Expr::BooleanLiteral { value, .. } => Value::Boolean(*value),
        Expr::Identifier { value, .. } => eval_identifier(value, env),
        Expr::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env);
            eval_prefix(operator, right)
        }
        Expr::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env);
            let right = eval_expression(right, env);
            eval_infix(operator, left, right)
        }
        Expr::If {
            condition,
            consequence,
            alternative,
            ..
        } => eval_if(condition, consequence, alternative.as_ref(), env),
        Expr::FunctionLiteral {
            parameters, body, ..
        } => Value::Function(Rc::new(FunctionValue {
            parameters: parameters.clone(),
            body: Rc::new(body.clone()),
            env: env.clone(),
        })),
        Expr::Call {
            function,
            arguments,
            ..
        } => eval_call(function, arguments, env),
    }
}

fn eval_identifier(name: &str, env: &Env) -> Value {
    match env.borrow().get(name) {
        Some(value) => value,
        None => {
            eprintln!("undefined identifier: {name}");
            Value::Null
        }
    }
}

fn eval_prefix(operator: &str, right: Value) -> Value {
    match operator {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(i) => Value::Integer(-i),
            other => {
                eprintln!("unsupported operand for prefix -: {}", other.type_name());
                Value::Null
            }
        },
        _ => Value::Null,
    }
}

fn eval_infix(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Boolean(l), Value::Boolean(r)) => match operator {
            "==" => Value::Boolean(l == r),
            "!=" => Value::Boolean(l != r),
            _ => {
                eprintln!("unsupported operator for booleans: {operator}");
                Value::Null
            }
        },
        _ => {
            eprintln!(
                "unsupported operand combination: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            );
            Value::Null
        }
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => {
            if right == 0 {
                eprintln!("division by zero");
                Value::Null
            } else {
                Value::Integer(left / right)
            }
        }
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        _ => {
            eprintln!("unsupported operator for integers: {operator}");
            Value::Null
        }
    }
}

fn eval_if(condition: &Expr, consequence: &Block, alternative: Option<&Block>, env: &Env) -> Value {
    if eval_expression(condition, env).is_truthy() {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        Value::Null
    }
}

fn eval_call(function: &Expr, arguments: &[Expr], env: &Env) -> Value {
    let callee = eval_expression(function, env);
    let func = match callee {
        Value::Function(func) => func,
        other => {
            eprintln!("not a function: {}", other.type_name());
            return Value::Null;
        }
    };

    if func.parameters.len() != arguments.len() {
        eprintln!(
            "wrong number of arguments: expected {}, got {}",
            func.parameters.len(),
            arguments.len()
        );
        return Value::Null;
    }

    let args: Vec<Value> = arguments.iter().map(|arg| eval_expression(arg, env)).collect();
    apply_function(&func, args)
}

/// Binds `args` to `func`'s parameters in a fresh environment enclosed by
/// the function's captured environment, evaluates the body, and unwraps a
/// `ReturnValue` at this call boundary.
fn apply_function(func: &Rc<FunctionValue>, args: Vec<Value>) -> Value {
    let call_env = Environment::new_enclosed(func.env.clone());
    for (name, arg) in func.parameters.iter().zip(args) {
        call_env.borrow_mut().set(name.clone(), arg);
    }

    match eval_block(&func.body, &call_env) {
        Value::ReturnValue(inner) => *inner,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run(input: &str) -> Value {
        let (program, errors) = Parser::new(Lexer::new(input)).parse_program();
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        let env = Environment::new();
        eval_program(&program, &env)
    }

    #[test]
    fn integer_arithmetic() {
        assert!(matches!(run("1 + 2 * 3;"), Value::Integer(7)));
    }

    #[test]
    fn let_and_reference() {
        assert!(matches!(
            run("let x = 5; let y = 10; x + y;"),
            Value::Integer(15)
        ));
    }

    #[test]
    fn function_call() {
        assert!(matches!(
            run("let add = fn(a, b) { a + b; }; add(2, 3);"),
            Value::Integer(5)
        ));
    }

    #[test]
    fn recursive_factorial() {
        let input =
            "let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } }; fact(5);";
        assert!(matches!(run(input), Value::Integer(120)));
    }

    #[test]
    fn closures_resolve_free_variables_in_definition_env_not_call_env() {
        // The classic closure test: `newAdder` returns a function whose
        // free variable `x` is bound in the call environment created for
        // *that* call to `newAdder`, not wherever `addTwo` is later
        // invoked from.
        let input = "let new_adder = fn(x) { fn(y) { x + y } }; let add_two = new_adder(2); add_two(3);";
        assert!(matches!(run(input), Value::Integer(5)));
    }

    #[test]
    fn rebinding_a_name_is_visible_through_an_earlier_closure() {
        // `let` binds directly into the current environment's store (see
        // DESIGN.md): a later `let x = 99` overwrites the same slot that
        // `c`'s captured-environment chain reads through, since `c`'s
        // environment is the *same* environment object, not a snapshot.
        let input = "let x = 10; let c = fn() { x }; let x = 99; c();";
        assert!(matches!(run(input), Value::Integer(99)));
    }

    #[test]
    fn if_expression_picks_consequence() {
        assert!(matches!(run("if (1 < 2) { 42 } else { 0 };"), Value::Integer(42)));
    }

    #[test]
    fn while_loop_mutates_shared_block_environment() {
        let input = "let x = 0; while ((x < 3) == true) { let x = x + 1; }; x;";
        assert!(matches!(run(input), Value::Integer(3)));
    }

    #[test]
    fn while_never_runs_on_non_boolean_condition() {
        // An integer condition is truthy under `if` but does not satisfy
        // `while`'s stricter "must be Boolean(true)" rule, so the body
        // never runs even once and `x` is left untouched.
        let input = "let x = 1; while (x) { let x = 0; }; x;";
        assert!(matches!(run(input), Value::Integer(1)));
    }

    #[test]
    fn integer_division_by_zero_yields_null() {
        assert!(matches!(run("10 / 0;"), Value::Null));
    }

    #[test]
    fn undefined_identifier_yields_null() {
        assert!(matches!(run("undefined_name;"), Value::Null));
    }

    #[test]
    fn calling_non_function_yields_null() {
        assert!(matches!(run("let x = 5; x(1);"), Value::Null));
    }

    #[test]
    fn arity_mismatch_yields_null() {
        assert!(matches!(
            run("let add = fn(a, b) { a + b; }; add(1);"),
            Value::Null
        ));
    }

    #[test]
    fn bang_negates_and_double_negates() {
        assert!(matches!(run("!true;"), Value::Boolean(false)));
        assert!(matches!(run("!!true;"), Value::Boolean(true)));
        assert!(matches!(run("!5;"), Value::Boolean(false)));
    }
}
