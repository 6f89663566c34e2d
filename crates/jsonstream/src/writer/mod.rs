//! Push-style encoding of JSON.
//!
//! A [`Writer`] emits one value per call. Arrays and objects are built with
//! [`ArrayState`] and [`ObjectState`], which insert the commas, colons and
//! closing delimiters. Output is compact: no insignificant whitespace is
//! ever written.
//!
//! Like the reader, the writer latches its first error. Once failed, every
//! write is a no-op and the error is reported by [`Writer::error`],
//! [`Writer::flush`] and [`Writer::into_bytes`].
//!
//! ```
//! use jsonstream::Writer;
//!
//! let mut w = Writer::new();
//! let mut obj = w.object();
//! obj.string("name", "x");
//! let mut tags = obj.array("tags");
//! tags.string("a");
//! tags.string("b");
//! tags.end();
//! obj.end();
//! assert_eq!(w.into_bytes().unwrap(), br#"{"name":"x","tags":["a","b"]}"#);
//! ```

mod array;
mod buffer;
mod object;
mod token;

use alloc::vec::Vec;

pub use self::{array::ArrayState, object::ObjectState, token::TokenWriter};
use crate::{
    backend::{NoSink, Sink, TokenWrite},
    error::{Error, Result},
    options::WriterOptions,
};

/// High-level JSON encoder with sticky error state.
#[derive(Debug)]
pub struct Writer<T = TokenWriter<NoSink>> {
    tokens: T,
    error: Option<Error>,
}

impl Writer {
    /// A writer that accumulates the whole document in memory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    #[must_use]
    pub fn with_options(options: WriterOptions) -> Self {
        Self::with_tokens(TokenWriter::new(options))
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sink> Writer<TokenWriter<S>> {
    /// A writer that hands its output to `sink` each time a write leaves at
    /// least `threshold` bytes buffered. Call [`flush`](Self::flush) at the
    /// end to deliver the remainder.
    ///
    /// ```
    /// use jsonstream::Writer;
    ///
    /// let mut out = Vec::new();
    /// let mut w = Writer::streaming(&mut out, 10);
    /// let mut arr = w.array();
    /// for n in 0..5 {
    ///     arr.int(n);
    /// }
    /// arr.end();
    /// w.flush().unwrap();
    /// drop(w);
    /// assert_eq!(out, b"[0,1,2,3,4]");
    /// ```
    pub fn streaming(sink: S, threshold: usize) -> Self {
        Self::streaming_with_options(sink, threshold, WriterOptions::default())
    }

    pub fn streaming_with_options(sink: S, threshold: usize, options: WriterOptions) -> Self {
        Self::with_tokens(TokenWriter::streaming(sink, threshold, options))
    }
}

impl<T: TokenWrite> Writer<T> {
    /// Creates a writer on top of any token sink.
    pub fn with_tokens(tokens: T) -> Self {
        Self {
            tokens,
            error: None,
        }
    }

    /// The latched error, if any write has failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Puts the writer into a failed state, unless it has failed already.
    /// All later writes are ignored.
    pub fn add_error(&mut self, err: impl Into<Error>) {
        if self.error.is_none() {
            let err = err.into();
            log::debug!("json writer failed: {err}");
            self.error = Some(err);
        }
    }

    /// Output not yet handed to a sink. For an in-memory writer this is
    /// everything written so far.
    pub fn bytes(&self) -> &[u8] {
        self.tokens.bytes()
    }

    /// Hands buffered output to the sink. Fails with the latched error if the
    /// writer has failed, including when this flush is what failed.
    pub fn flush(&mut self) -> Result<()> {
        self.emit(TokenWrite::flush);
        self.result()
    }

    /// Consumes the writer and returns the output still buffered, or the
    /// latched error.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tokens.into_bytes()),
        }
    }

    pub fn null(&mut self) {
        self.emit(TokenWrite::null);
    }

    pub fn bool(&mut self, value: bool) {
        self.emit(|t| t.bool(value));
    }

    pub fn int(&mut self, value: i64) {
        self.emit(|t| t.int(value));
    }

    /// Writes a number in its shortest round-trip form. `NaN` and the
    /// infinities have no JSON representation and are written as `null`.
    pub fn float(&mut self, value: f64) {
        self.emit(|t| t.float(value));
    }

    pub fn string(&mut self, value: &str) {
        self.emit(|t| t.string(value));
    }

    /// Copies pre-encoded JSON to the output. The bytes are not validated.
    pub fn raw(&mut self, json: impl AsRef<[u8]>) {
        self.emit(|t| t.raw(json.as_ref()));
    }

    /// Writes a boolean, or `null` for `None`.
    pub fn bool_or_null(&mut self, value: Option<bool>) {
        match value {
            Some(v) => self.bool(v),
            None => self.null(),
        }
    }

    pub fn int_or_null(&mut self, value: Option<i64>) {
        match value {
            Some(v) => self.int(v),
            None => self.null(),
        }
    }

    pub fn float_or_null(&mut self, value: Option<f64>) {
        match value {
            Some(v) => self.float(v),
            None => self.null(),
        }
    }

    pub fn string_or_null(&mut self, value: Option<&str>) {
        match value {
            Some(v) => self.string(v),
            None => self.null(),
        }
    }

    /// Writes `[` and returns the helper that writes the elements.
    pub fn array(&mut self) -> ArrayState<'_, T> {
        self.emit(|t| t.delimiter(b'['));
        ArrayState::new(self)
    }

    /// Writes `{` and returns the helper that writes the properties.
    pub fn object(&mut self) -> ObjectState<'_, T> {
        self.emit(|t| t.delimiter(b'{'));
        ObjectState::new(self)
    }

    /// Runs one token write unless the writer has already failed, latching
    /// any error it produces.
    fn emit(&mut self, write: impl FnOnce(&mut T) -> Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = write(&mut self.tokens) {
            self.add_error(err);
        }
    }

    fn result(&self) -> Result<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
