//! Streaming reader for annotated Gigaword files.
//!
//! A corpus file is one header line followed by back-to-back
//! `<DOC id=".." type="..">` blocks. The file as a whole has no root element,
//! so blocks are cut at `</DOC>` lines, wrapped in a synthetic root and parsed
//! one at a time.

use std::io::BufRead;
use std::path::Path;

use super::lines::{FileLines, LineSource};
use super::lisp::parse_lisp;
use super::xml_tree::{parse_fragment, Element};
use crate::config::ReadOptions;
use crate::error::{GigawordError, Result};
use crate::models::{Document, Expr, Mention, Sentence, Token, Ymd};

const DOC_END: &str = "</DOC>";
const ROOT_OPEN: &str = "<xml>\n";
const ROOT_CLOSE: &str = "</xml>";

/// Depth of `<DOC>` children inside the synthetic root.
const STAGE_DEPTH: usize = 2;

/// Open a corpus file and iterate its documents.
pub fn read_documents(
    path: impl AsRef<Path>,
    options: ReadOptions,
) -> Result<DocumentReader<FileLines>> {
    DocumentReader::open(path, options)
}

/// Single-pass iterator over the documents of one corpus stream.
///
/// Yields `Err` for the first document that fails to parse and nothing after
/// it. A trailing block with no closing `</DOC>` line is dropped.
pub struct DocumentReader<R> {
    lines: LineSource<R>,
    options: ReadOptions,
    buffer: String,
    header_skipped: bool,
    documents_read: usize,
    finished: bool,
}

impl DocumentReader<FileLines> {
    pub fn open(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading documents from {}", path.display());
        Ok(Self::with_lines(LineSource::open(path)?, options))
    }
}

impl<R: BufRead> DocumentReader<R> {
    /// Read documents from already-decompressed text.
    pub fn from_reader(reader: R, options: ReadOptions) -> Self {
        Self::with_lines(LineSource::new(reader), options)
    }

    fn with_lines(lines: LineSource<R>, options: ReadOptions) -> Self {
        Self {
            lines,
            options,
            buffer: String::new(),
            header_skipped: false,
            documents_read: 0,
            finished: false,
        }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Documents yielded so far.
    pub fn documents_read(&self) -> usize {
        self.documents_read
    }

    /// Fill the buffer with the next complete block, wrapped in the synthetic
    /// root. Returns `Ok(false)` when the stream is exhausted.
    fn fill_next_block(&mut self) -> Result<bool> {
        if !self.header_skipped {
            self.header_skipped = true;
            if self.lines.next().transpose()?.is_none() {
                return Ok(false);
            }
        }

        self.buffer.clear();
        self.buffer.push_str(ROOT_OPEN);
        let mut pending = 0usize;

        for line in self.lines.by_ref() {
            let line = line?;
            let is_end = line.trim() == DOC_END;
            self.buffer.push_str(&line);
            pending += 1;

            if is_end {
                if !line.ends_with('\n') {
                    self.buffer.push('\n');
                }
                self.buffer.push_str(ROOT_CLOSE);
                return Ok(true);
            }
        }

        if pending > 0 {
            tracing::debug!(
                "Dropping {} trailing lines with no closing {}",
                pending,
                DOC_END
            );
        }
        Ok(false)
    }

    fn fail(&mut self, err: GigawordError) -> Option<Result<Document>> {
        self.finished = true;
        tracing::warn!(
            "Stopping after {} documents at line {}: {}",
            self.documents_read,
            self.lines.line_number(),
            err
        );
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for DocumentReader<R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.fill_next_block() {
            Ok(true) => {}
            Ok(false) => {
                self.finished = true;
                tracing::info!("Read {} documents", self.documents_read);
                return None;
            }
            Err(e) => return self.fail(e),
        }

        match parse_document(&self.buffer, &self.options) {
            Ok(doc) => {
                self.documents_read += 1;
                tracing::debug!(
                    "Parsed document {} ({} sentences)",
                    doc.id,
                    doc.sentences.len()
                );
                Some(Ok(doc))
            }
            Err(e) => self.fail(e),
        }
    }
}

/// Parse one wrapped `<DOC>` block.
pub fn parse_document(fragment: &str, options: &ReadOptions) -> Result<Document> {
    let root = parse_fragment(fragment, |depth, name| {
        depth != STAGE_DEPTH || options.wants(name)
    })?;
    let doc = root.find("DOC").ok_or(GigawordError::MissingDocElement)?;

    let id = doc.require_attr("id")?;
    let doc_type = doc.require_attr("type")?;
    let date = date_from_id(id)?;

    let headline = doc
        .find("HEADLINE")
        .filter(|_| options.parse_headline)
        .map(|el| parse_lisp(el.text().trim()))
        .transpose()?;

    let dateline = doc
        .find("DATELINE")
        .filter(|_| options.parse_dateline)
        .map(|el| parse_lisp(el.text().trim()))
        .transpose()?;

    let coreferences: Vec<Vec<Mention>> = match doc.find("coreferences") {
        Some(el) if options.parse_coreferences => el
            .children()
            .map(|chain| chain.children().map(parse_mention).collect::<Result<Vec<_>>>())
            .collect::<Result<_>>()?,
        _ => Vec::new(),
    };

    let sentences: Vec<Sentence> = match doc.find("sentences") {
        Some(el) if options.parse_sentences => {
            el.children().map(parse_sentence).collect::<Result<_>>()?
        }
        _ => Vec::new(),
    };

    let text = doc
        .find("TEXT")
        .filter(|_| options.parse_text)
        .map(parse_text)
        .transpose()?;

    Ok(Document {
        id: id.to_string(),
        date,
        doc_type: doc_type.to_string(),
        headline,
        dateline,
        text,
        sentences,
        coreferences,
    })
}

/// `AFP_ENG_19940512.0004` -> 1994-05-12.
fn date_from_id(id: &str) -> Result<Ymd> {
    let tail = id.rsplit('_').next().unwrap_or(id);
    let stamp = tail.split('.').next().unwrap_or(tail);
    Ymd::parse(stamp).map_err(|_| GigawordError::InvalidDocumentId(id.to_string()))
}

/// One expression per `<P>`, or the element's own text when it has none.
fn parse_text(el: &Element) -> Result<Vec<Expr>> {
    let mut paragraphs = el.find_all("P").peekable();
    if paragraphs.peek().is_none() {
        return Ok(vec![parse_lisp(el.text().trim())?]);
    }
    paragraphs.map(|p| parse_lisp(p.text().trim())).collect()
}

fn parse_sentence(el: &Element) -> Result<Sentence> {
    let tokens: Vec<Token> = el
        .require("tokens")?
        .children()
        .map(parse_token)
        .collect::<Result<_>>()?;

    Ok(Sentence {
        id: el.require_attr("id")?.to_string(),
        tokens,
    })
}

fn parse_token(el: &Element) -> Result<Token> {
    Ok(Token {
        id: el.require_attr("id")?.to_string(),
        word: el.child_text("word")?.to_string(),
        lemma: el.child_text("lemma")?.to_string(),
        begin: el.child_int("CharacterOffsetBegin")?,
        end: el.child_int("CharacterOffsetEnd")?,
        pos: el.child_text("POS")?.to_string(),
        ner: el.child_text("NER")?.to_string(),
    })
}

fn parse_mention(el: &Element) -> Result<Mention> {
    Ok(Mention {
        representative: el.has_attr("representative"),
        sentence: el.child_int("sentence")?,
        start: el.child_int("start")?,
        end: el.child_int("end")?,
        head: el.child_int("head")?,
    })
}
