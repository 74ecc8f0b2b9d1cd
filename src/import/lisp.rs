//! Parser for parenthesised annotation text such as `(S (NP Clinton) (VP wins))`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GigawordError, Result};
use crate::models::Expr;

static PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[()]").expect("paren pattern should compile"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern should compile"));

/// Parse bracketed text into an [`Expr`].
///
/// Parentheses become list boundaries and every other whitespace-separated
/// token becomes an atom. The result is the first item of the implicit
/// outer list, so `"( A B ( C D ) E )"` yields the list `(A B (C D) E)`
/// and `"foo bar"` yields the atom `foo`. Empty input yields the empty atom.
pub fn parse_lisp(text: &str) -> Result<Expr> {
    let spaced = PAREN.replace_all(text, " $0 ");
    let normalized = WHITESPACE.replace_all(&spaced, " ");

    // `open` holds the enclosing lists of `current`, innermost last.
    let mut open: Vec<Vec<Expr>> = Vec::new();
    let mut current: Vec<Expr> = Vec::new();

    for token in normalized.trim().split(' ') {
        match token {
            "(" => open.push(std::mem::take(&mut current)),
            ")" => {
                let parent = open.pop().ok_or(GigawordError::UnbalancedExpression {
                    reason: "unmatched ')'",
                })?;
                let finished = std::mem::replace(&mut current, parent);
                current.push(Expr::List(finished));
            }
            atom => current.push(Expr::Atom(atom.to_string())),
        }
    }

    if !open.is_empty() {
        return Err(GigawordError::UnbalancedExpression {
            reason: "unclosed '('",
        });
    }

    current
        .into_iter()
        .next()
        .ok_or(GigawordError::UnbalancedExpression {
            reason: "empty expression",
        })
}
