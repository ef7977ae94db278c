//! xlog line splitting and the lazy line reader.

use std::borrow::Cow;
use std::io::BufRead;

use memchr::{memchr, memchr_iter};
use tracing::trace;

use crate::error::{Error, Result};

use super::{RawLogEntry, XlogValue};

/// Separates `key=value` fields within a line
pub const DELIMITER: u8 = b'\t';
/// Separates a key from its value
pub const SEPARATOR: u8 = b'=';

/// Split one xlog line into a [`RawLogEntry`].
///
/// Trailing whitespace is stripped first. Every field must hold exactly one
/// separator and a non-empty key; otherwise the whole line is rejected.
/// `line_no` is only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<RawLogEntry> {
    let line = line.trim_end();
    let bytes = line.as_bytes();
    let malformed = |message: String| Error::MalformedLine {
        line: line_no,
        message,
    };

    if bytes.is_empty() {
        return Err(malformed("empty line".to_string()));
    }

    let mut entry = RawLogEntry::new();
    let mut start = 0usize;
    let ends = memchr_iter(DELIMITER, bytes).chain(std::iter::once(bytes.len()));
    for (idx, end) in ends.enumerate() {
        let token = &line[start..end];
        start = end + 1;

        let tb = token.as_bytes();
        let sep = memchr(SEPARATOR, tb)
            .ok_or_else(|| malformed(format!("field {} has no '=': {:?}", idx + 1, token)))?;
        if memchr(SEPARATOR, &tb[sep + 1..]).is_some() {
            return Err(malformed(format!(
                "field {} has more than one '=': {:?}",
                idx + 1,
                token
            )));
        }
        if sep == 0 {
            return Err(malformed(format!("field {} has an empty name", idx + 1)));
        }

        let (key, value) = (&token[..sep], &token[sep + 1..]);
        entry.insert(key, XlogValue::convert(value));
    }
    Ok(entry)
}

/// Decode a raw line, falling back to Windows-1252 for non UTF-8 input
pub fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => encoding_rs::WINDOWS_1252
            .decode_without_bom_handling(bytes)
            .0,
    }
}

/// Lazily tokenizes a line-oriented stream.
///
/// Yields `(line_number, entry)` pairs with 1-based line numbers. Blank lines
/// are skipped. A malformed line yields an error and reading continues with the
/// next line; an IO error ends the sequence.
pub struct XlogReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> XlogReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(512),
            line_no: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for XlogReader<R> {
    type Item = Result<(usize, RawLogEntry)>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let text = decode_line(&self.buf);
                    if text.trim().is_empty() {
                        trace!("Skipping blank xlog line {}", self.line_no);
                        continue;
                    }
                    return Some(parse_line(&text, self.line_no).map(|e| (self.line_no, e)));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::Io(e)));
                }
            }
        }
        None
    }
}
