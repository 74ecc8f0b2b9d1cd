//! Derived views over parsed documents.

pub mod ner;

pub use ner::{count_entities, get_named_entities, group_ne_tokens, NeGroups};
