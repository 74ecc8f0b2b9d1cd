//! Parenthesised annotation expressions.

use std::fmt;

use serde::Serialize;

/// A bracketed annotation value: either a bare atom or a nested list.
///
/// Headlines, datelines and paragraphs are stored this way. List nesting
/// mirrors the parenthesis nesting of the source text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Atom(String),
    List(Vec<Expr>),
}

impl Expr {
    pub fn atom(text: impl Into<String>) -> Self {
        Expr::Atom(text.into())
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Expr::Atom(s) => Some(s),
            Expr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::Atom(_) => None,
            Expr::List(items) => Some(items),
        }
    }

    /// All atoms in left-to-right order, ignoring list structure.
    pub fn atoms(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Atom(s) => out.push(s),
            Expr::List(items) => items.iter().for_each(|item| item.collect_atoms(out)),
        }
    }
}

/// Re-serializes in bracketed form: `(A B (C D) E)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(s) => f.write_str(s),
            Expr::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expr {
        Expr::List(vec![
            Expr::atom("A"),
            Expr::atom("B"),
            Expr::List(vec![Expr::atom("C"), Expr::atom("D")]),
            Expr::atom("E"),
        ])
    }

    #[test]
    fn test_display_nested() {
        assert_eq!(sample().to_string(), "(A B (C D) E)");
        assert_eq!(Expr::List(Vec::new()).to_string(), "()");
    }

    #[test]
    fn test_atoms_flattened() {
        assert_eq!(sample().atoms(), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_accessors() {
        let expr = sample();
        assert!(expr.as_atom().is_none());
        assert_eq!(expr.as_list().map(|l| l.len()), Some(4));
        assert_eq!(Expr::atom("x").as_atom(), Some("x"));
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"["A","B",["C","D"],"E"]"#);
    }
}
