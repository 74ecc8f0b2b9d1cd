//! Line source over gzip-compressed or plain corpus files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;

use crate::error::{GigawordError, Result};

/// Buffered reader type returned by [`LineSource::open`].
pub type FileLines = Box<dyn BufRead + Send>;

const READ_BUFFER_SIZE: usize = 1024 * 1024;
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Forward-only sequence of raw lines, line terminators included.
///
/// The underlying file handle is closed when the source is dropped.
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: u64,
}

impl LineSource<FileLines> {
    /// Open a corpus file. Gzip content is detected from its magic bytes;
    /// anything else is read as plain text.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

        let reader: FileLines = if is_gzip {
            tracing::debug!("Opening {} as gzip", path.display());
            Box::new(BufReader::with_capacity(
                READ_BUFFER_SIZE,
                MultiGzDecoder::new(reader),
            ))
        } else {
            tracing::debug!("Opening {} as plain text", path.display());
            Box::new(reader)
        };

        Ok(Self::new(reader))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line = String::from_utf8(std::mem::take(&mut self.buf)).map_err(|_| {
                    GigawordError::Encoding {
                        line: self.line_number,
                    }
                });
                Some(line)
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
