//! The seam between the high-level [`Reader`](crate::Reader) /
//! [`Writer`](crate::Writer) and the byte-level tokenizer and formatter.
//!
//! The default implementations are [`TokenReader`](crate::TokenReader) and
//! [`TokenWriter`](crate::writer::TokenWriter). Anything implementing these
//! traits can be plugged in instead; the high-level layer only relies on the
//! contracts documented here.

mod sink;

use alloc::{borrow::Cow, vec::Vec};

#[cfg(feature = "std")]
pub use sink::IoSink;
pub use sink::{NoSink, Sink};

use crate::{error::Result, kind::ValueKind};

/// A single token produced by [`TokenRead::any`].
///
/// Scalars are fully consumed. For `ArrayStart` / `ObjectStart` only the
/// opening delimiter has been consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyToken<'a> {
    Null,
    Bool(bool),
    Number(f64),
    String(Cow<'a, str>),
    ArrayStart,
    ObjectStart,
}

impl AnyToken<'_> {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::ArrayStart => ValueKind::Array,
            Self::ObjectStart => ValueKind::Object,
        }
    }
}

/// Pull-style access to the tokens of a JSON document.
///
/// All methods skip leading whitespace. Methods that expect a particular
/// kind of value return a [`TypeError`](crate::TypeError) when the next
/// token is well-formed but of another kind, and a
/// [`SyntaxError`](crate::SyntaxError) when it is malformed.
pub trait TokenRead<'a> {
    /// Skips whitespace and reports whether the input is exhausted. When it
    /// is not, [`last_pos`](Self::last_pos) points at the next byte.
    fn eof(&mut self) -> bool;

    /// Byte offset of the start of the most recently examined token.
    fn last_pos(&self) -> usize;

    /// Consumes a `null` and returns `true`. For any other well-formed token
    /// returns `false` without consuming anything.
    fn null(&mut self) -> Result<bool>;

    fn bool(&mut self) -> Result<bool>;

    fn number(&mut self) -> Result<f64>;

    /// Reads a string value. Borrows from the input when the string contains
    /// no escape sequences.
    fn string(&mut self) -> Result<Cow<'a, str>>;

    /// Consumes `delimiter` if it is the next token; otherwise returns
    /// `false` without consuming anything.
    fn delimiter(&mut self, delimiter: u8) -> Result<bool>;

    /// Between container elements: consumes either a `,` (returning `false`)
    /// or `end` (returning `true`).
    fn end_delimiter_or_comma(&mut self, end: u8) -> Result<bool>;

    /// Reads an object property name and the `:` after it.
    fn property_name(&mut self) -> Result<Cow<'a, str>>;

    /// Reads whatever token comes next.
    fn any(&mut self) -> Result<AnyToken<'a>>;
}

/// Push-style output of JSON tokens.
///
/// Implementations do not track structure; separators and delimiters are
/// emitted exactly when the caller asks for them.
pub trait TokenWrite {
    fn null(&mut self) -> Result<()>;

    fn bool(&mut self, value: bool) -> Result<()>;

    fn int(&mut self, value: i64) -> Result<()>;

    /// Writes the shortest representation that reads back as `value`.
    fn float(&mut self, value: f64) -> Result<()>;

    fn string(&mut self, value: &str) -> Result<()>;

    /// Copies pre-encoded JSON to the output verbatim.
    fn raw(&mut self, json: &[u8]) -> Result<()>;

    /// Writes one of `[ ] { } ,`.
    fn delimiter(&mut self, delimiter: u8) -> Result<()>;

    /// Writes a quoted property name followed by `:`.
    fn property_name(&mut self, name: &str) -> Result<()>;

    /// Output that has not yet been handed to a sink.
    fn bytes(&self) -> &[u8];

    /// Hands any buffered output to the sink, if there is one.
    fn flush(&mut self) -> Result<()>;

    fn into_bytes(self) -> Vec<u8>
    where
        Self: Sized;
}
