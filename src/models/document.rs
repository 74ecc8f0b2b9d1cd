//! Document models for annotated corpus articles.
//!
//! Every record here is built once by the reader and handed to the caller;
//! nothing is mutated after a document has been yielded.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::Expr;
use crate::error::{GigawordError, Result};

/// Publication date encoded in a document id (e.g. `19960531`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ymd {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Ymd {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Parse a fixed-width `YYYYMMDD` string.
    ///
    /// The year is taken from positions 0-4, the month from 4-6 and the day
    /// from everything after position 6. Calendar validity is not checked.
    pub fn parse(text: &str) -> Result<Self> {
        let year = text.get(..4).ok_or_else(|| invalid_date(text))?;
        let month = text.get(4..6).ok_or_else(|| invalid_date(text))?;
        let day = text.get(6..).ok_or_else(|| invalid_date(text))?;

        Ok(Self {
            year: parse_int("year", year)?,
            month: parse_int("month", month)?,
            day: parse_int("day", day)?,
        })
    }

    /// Convert to a calendar date, if the components form a real one.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for Ymd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn invalid_date(text: &str) -> GigawordError {
    GigawordError::InvalidInteger {
        field: "date",
        value: text.to_string(),
    }
}

/// Parse an integer field, keeping the offending text for the error.
pub(crate) fn parse_int<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GigawordError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

/// One annotated word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Original `id` attribute; opaque, not necessarily numeric.
    pub id: String,
    pub word: String,
    pub lemma: String,
    /// Character offset of the first character in the document text.
    ///
    /// Offsets are non-negative; a negative value in the source fails the
    /// document with [`GigawordError::InvalidInteger`].
    pub begin: usize,
    /// Character offset one past the last character.
    pub end: usize,
    pub pos: String,
    pub ner: String,
}

/// A sentence with its tokens in surface order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub id: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Surface words joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One member of a coreference chain.
///
/// `sentence`, `start`, `end` and `head` are 1-based indices as written in the
/// corpus. They are never negative; one that is fails the document with
/// [`GigawordError::InvalidInteger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mention {
    /// Canonical mention of its chain.
    pub representative: bool,
    pub sentence: usize,
    pub start: usize,
    pub end: usize,
    pub head: usize,
}

/// A single `<DOC>` block projected into typed fields.
///
/// Fields belonging to a disabled or absent stage hold their empty value
/// (`None` or an empty vector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: String,
    pub date: Ymd,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub headline: Option<Expr>,
    pub dateline: Option<Expr>,
    /// One expression per paragraph.
    pub text: Option<Vec<Expr>>,
    pub sentences: Vec<Sentence>,
    pub coreferences: Vec<Vec<Mention>>,
}

impl Document {
    /// The representative mention of each coreference chain, if marked.
    pub fn representative_mentions(&self) -> impl Iterator<Item = &Mention> {
        self.coreferences
            .iter()
            .filter_map(|chain| chain.iter().find(|m| m.representative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: &str, word: &str) -> Token {
        Token {
            id: id.to_string(),
            word: word.to_string(),
            lemma: word.to_lowercase(),
            begin: 0,
            end: word.len(),
            pos: "NN".to_string(),
            ner: "O".to_string(),
        }
    }

    #[test]
    fn test_ymd_parse() {
        let ymd = Ymd::parse("19960531").unwrap();
        assert_eq!(ymd, Ymd::new(1996, 5, 31));
        assert_eq!(ymd.to_string(), "1996-05-31");
    }

    #[test]
    fn test_ymd_parse_non_numeric() {
        let err = Ymd::parse("1996O531").unwrap_err();
        assert!(matches!(
            err,
            GigawordError::InvalidInteger { field: "month", .. }
        ));
    }

    #[test]
    fn test_ymd_parse_too_short() {
        assert!(Ymd::parse("199").is_err());
        assert!(Ymd::parse("199605").is_err());
    }

    #[test]
    fn test_ymd_to_naive_date() {
        let date = Ymd::new(2004, 2, 29).to_naive_date().unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2004-02-29");
        assert!(Ymd::new(2003, 2, 29).to_naive_date().is_none());
    }

    #[test]
    fn test_parse_int_rejects_negative_index() {
        let err = parse_int::<usize>("head", "-2").unwrap_err();
        assert!(matches!(
            err,
            GigawordError::InvalidInteger { field: "head", .. }
        ));
        assert_eq!(parse_int::<usize>("head", " 2 ").unwrap(), 2);
    }

    #[test]
    fn test_sentence_text() {
        let sentence = Sentence {
            id: "1".to_string(),
            tokens: vec![token("1", "Hello"), token("2", "world")],
        };
        assert_eq!(sentence.text(), "Hello world");
    }

    #[test]
    fn test_representative_mentions() {
        let mention = |representative, sentence| Mention {
            representative,
            sentence,
            start: 1,
            end: 2,
            head: 1,
        };
        let doc = Document {
            id: "APW_ENG_19940701.0001".to_string(),
            date: Ymd::new(1994, 7, 1),
            doc_type: "story".to_string(),
            headline: None,
            dateline: None,
            text: None,
            sentences: Vec::new(),
            coreferences: vec![
                vec![mention(false, 1), mention(true, 2)],
                vec![mention(false, 3)],
            ],
        };

        let reps: Vec<_> = doc.representative_mentions().collect();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].sentence, 2);
    }
}
