//! Data models for parsed corpus documents.

mod document;
mod entity;
mod expr;

pub(crate) use document::parse_int;
pub use document::{Document, Mention, Sentence, Token, Ymd};
pub use entity::NamedEntity;
pub use expr::Expr;
