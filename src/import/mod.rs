//! Corpus import: compressed line source, block recovery and projection
//! into [`crate::models::Document`] values.

mod gigaword;
pub mod lines;
mod lisp;
pub mod xml_tree;

pub use gigaword::{parse_document, read_documents, DocumentReader};
pub use lines::{FileLines, LineSource};
pub use lisp::parse_lisp;
