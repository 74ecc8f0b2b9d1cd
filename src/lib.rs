//! gigaword - streaming reader for the annotated Gigaword news corpus.
//!
//! Corpus files are gzip-compressed streams of `<DOC>` blocks carrying
//! CoreNLP-style annotations. The stream as a whole is not well-formed XML,
//! so documents are recovered line by line and parsed one block at a time.
//!
//! ```no_run
//! use gigaword::{read_documents, ReadOptions};
//!
//! # fn main() -> gigaword::Result<()> {
//! for doc in read_documents("nyt_eng_199407.xml.gz", ReadOptions::default())? {
//!     let doc = doc?;
//!     println!("{} {} sentences", doc.id, doc.sentences.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod services;

pub use config::ReadOptions;
pub use error::{GigawordError, Result};
pub use import::{parse_lisp, read_documents, DocumentReader};
pub use models::{Document, Expr, Mention, NamedEntity, Sentence, Token, Ymd};
pub use services::ner::{count_entities, get_named_entities, group_ne_tokens};
