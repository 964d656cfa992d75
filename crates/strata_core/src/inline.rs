//! Inline script evaluator for `inline -c` custom commands
//!
//! A script is a list of `name = expression` statements separated by `;` or
//! newlines. An expression containing a quoted string (or a variable holding
//! text) is a concatenation of `+`-joined terms; anything else is arithmetic
//! and goes to `exmex`. Every call starts from an empty scope, and the value
//! bound to `result` is the output.

use std::collections::HashMap;
use std::fmt;

use exmex::Express;
use tracing::debug;

use crate::error::{ShellError, ShellResult};

/// Variable holding the output of a script.
pub const RESULT_VAR: &str = "result";

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

type Scope = HashMap<String, Value>;

/// Run `source` in a fresh scope and return the rendered `result` (empty if unset).
pub fn evaluate(source: &str) -> ShellResult<String> {
    let mut scope = Scope::new();
    for statement in split_outside_quotes(source, &[';', '\n']) {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        let (name, value) = eval_statement(statement, &scope)?;
        debug!(variable = %name, "inline assignment");
        scope.insert(name, value);
    }
    Ok(scope.get(RESULT_VAR).map(Value::to_string).unwrap_or_default())
}

fn eval_statement(statement: &str, scope: &Scope) -> ShellResult<(String, Value)> {
    let mut parts = split_outside_quotes(statement, &['=']).into_iter();
    let (Some(lhs), Some(rhs), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ShellError::execution(format!("expected 'name = expression', got '{statement}'")));
    };
    let name = lhs.trim();
    if !is_identifier(name) {
        return Err(ShellError::execution(format!("invalid variable name '{name}'")));
    }
    let value = eval_expression(rhs.trim(), scope)?;
    Ok((name.to_string(), value))
}

fn eval_expression(expr: &str, scope: &Scope) -> ShellResult<Value> {
    if expr.is_empty() {
        return Err(ShellError::execution("empty expression"));
    }
    let terms: Vec<&str> = split_outside_quotes(expr, &['+']).into_iter().map(str::trim).collect();
    let textual = terms
        .iter()
        .any(|t| quoted(t).is_some() || matches!(scope.get(*t), Some(Value::Text(_))));
    if textual {
        let mut out = String::new();
        for term in terms {
            if let Some(literal) = quoted(term) {
                out.push_str(literal);
            } else if let Some(value) = scope.get(term) {
                out.push_str(&value.to_string());
            } else {
                return Err(ShellError::execution(format!("cannot concatenate '{term}'")));
            }
        }
        return Ok(Value::Text(out));
    }
    eval_arithmetic(expr, scope).map(Value::Number)
}

fn eval_arithmetic(expr: &str, scope: &Scope) -> ShellResult<f64> {
    let parsed = exmex::parse::<f64>(expr)
        .map_err(|e| ShellError::execution(format!("invalid expression '{expr}': {e}")))?;
    let mut values = Vec::new();
    for var in parsed.var_names() {
        match scope.get(var.as_str()) {
            Some(Value::Number(n)) => values.push(*n),
            Some(Value::Text(_)) => {
                return Err(ShellError::execution(format!("'{var}' is text, not a number")));
            }
            None => return Err(ShellError::execution(format!("name '{var}' is not defined"))),
        }
    }
    parsed
        .eval(&values)
        .map_err(|e| ShellError::execution(format!("cannot evaluate '{expr}': {e}")))
}

fn quoted(term: &str) -> Option<&str> {
    let first = term.chars().next()?;
    if (first == '"' || first == '\'') && term.len() >= 2 && term.ends_with(first) {
        Some(&term[1..term.len() - 1])
    } else {
        None
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split on any of `seps` except inside single or double quotes.
fn split_outside_quotes<'a>(text: &'a str, seps: &[char]) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if seps.contains(&ch) => {
                pieces.push(&text[start..i]);
                start = i + ch.len_utf8();
            }
            None => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}
