//! Whitespace-token reader over a buffered stream.

use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Pulls whitespace-separated tokens from the engine, one line at a time.
///
/// Lines are only read when the pending tokens run out, so a reader can be
/// kept across frames without consuming input that belongs to the next one.
#[derive(Debug)]
pub struct TokenReader<R> {
    inner: R,
    pending: VecDeque<String>,
    consumed: usize,
}

impl<R: BufRead> TokenReader<R> {
    /// Wraps a buffered stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: VecDeque::new(),
            consumed: 0,
        }
    }

    /// Tokens handed out so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Reads one raw line, ignoring any tokens still pending.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnexpectedEof`] at end of input, or
    /// [`ProtocolError::Io`].
    pub fn line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.pending.clear();
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Err(ProtocolError::UnexpectedEof { expected });
        }
        Ok(line.trim_end().to_owned())
    }

    /// The next token.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnexpectedEof`] at end of input, or
    /// [`ProtocolError::Io`].
    pub fn token(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        if !self.fill()? {
            return Err(ProtocolError::UnexpectedEof { expected });
        }
        self.consumed += 1;
        self.pending
            .pop_front()
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }

    /// The next token parsed as an integer.
    ///
    /// # Errors
    ///
    /// As [`TokenReader::token`], plus [`ProtocolError::InvalidInteger`] if
    /// the token does not parse.
    pub fn int<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ProtocolError> {
        let token = self.token(expected)?;
        token.parse().map_err(|_| ProtocolError::InvalidInteger {
            index: self.consumed - 1,
            token,
            expected,
        })
    }

    /// True once only whitespace remains.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::Io`] if the stream fails.
    pub fn at_eof(&mut self) -> Result<bool, ProtocolError> {
        Ok(!self.fill()?)
    }

    /// Reads lines until a token is pending. Returns false at end of input.
    fn fill(&mut self) -> Result<bool, ProtocolError> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.inner.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> TokenReader<Cursor<Vec<u8>>> {
        TokenReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn tokens_span_lines() {
        let mut r = reader("1 2\n\n  3\n");
        assert_eq!(r.int::<u32>("a").unwrap(), 1);
        assert_eq!(r.int::<u32>("b").unwrap(), 2);
        assert_eq!(r.int::<i32>("c").unwrap(), 3);
        assert!(r.at_eof().unwrap());
        assert_eq!(r.consumed(), 3);
    }

    #[test]
    fn eof_names_what_was_expected() {
        let mut r = reader("7");
        r.int::<u32>("turn").unwrap();
        let err = r.int::<u32>("ship count").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedEof { expected: "ship count" }
        ));
    }

    #[test]
    fn bad_integer_reports_position() {
        let mut r = reader("4 x");
        r.int::<u32>("width").unwrap();
        let err = r.int::<u32>("height").unwrap_err();
        match err {
            ProtocolError::InvalidInteger { index, token, expected } => {
                assert_eq!(index, 1);
                assert_eq!(token, "x");
                assert_eq!(expected, "height");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn line_reads_raw_text() {
        let mut r = reader("{\"A\": 1}\n2 0\n");
        assert_eq!(r.line("constants").unwrap(), "{\"A\": 1}");
        assert_eq!(r.int::<u32>("players").unwrap(), 2);
    }

    #[test]
    fn negative_values_fail_unsigned() {
        let mut r = reader("-3");
        assert!(r.int::<u32>("halite").is_err());
    }
}
