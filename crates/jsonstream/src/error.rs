//! Error types shared by the reader and the writer.
//!
//! Every error is an immutable value: cloning is cheap, equality is
//! structural (identity for wrapped caller/sink errors), and the types are
//! `Send + Sync` so a latched error can be handed to another thread after the
//! pass is over.

use alloc::{string::String, sync::Arc};
use core::fmt;

use bstr::BString;
use thiserror::Error;

use crate::kind::ValueKind;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Any failure reported by a [`Reader`](crate::Reader) or
/// [`Writer`](crate::Writer).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed JSON input.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Well-formed JSON of a kind the caller did not ask for.
    #[error(transparent)]
    Type(#[from] TypeError),
    /// An object ended without one of its required properties.
    #[error(transparent)]
    RequiredProperty(#[from] RequiredPropertyError),
    /// A failure from outside the JSON itself, such as one injected with
    /// `add_error`.
    #[error(transparent)]
    Custom(ExternalError),
    /// The streaming sink rejected a write.
    #[error("writing to sink failed: {0}")]
    Sink(#[source] ExternalError),
}

impl Error {
    /// Wraps an arbitrary caller error so it can be latched on a reader or
    /// writer.
    pub fn custom<E>(err: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Custom(ExternalError::new(err))
    }

    /// Builds a caller error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Custom(ExternalError::msg(message))
    }

    /// The byte offset the error was detected at, if it has one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Syntax(e) => Some(e.offset),
            Self::Type(e) => Some(e.offset),
            Self::RequiredProperty(e) => Some(e.offset),
            Self::Custom(_) | Self::Sink(_) => None,
        }
    }

    /// Returns `true` if the input ended in the middle of a value.
    #[must_use]
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(
            self,
            Self::Syntax(SyntaxError {
                kind: SyntaxErrorKind::UnexpectedEndOfInput,
                ..
            })
        )
    }
}

/// The category of a [`SyntaxError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("invalid identifier")]
    InvalidIdentifier,
    #[error("invalid numeric value")]
    InvalidNumber,
    #[error("invalid string escape")]
    InvalidEscape,
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    #[error("unescaped control character in string")]
    ControlCharacter,
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("expected property name")]
    ExpectedPropertyName,
    #[error("expected colon after property name")]
    ExpectedColon,
    #[error("expected comma or closing delimiter")]
    ExpectedCommaOrEnd,
    #[error("unexpected data after end of JSON value")]
    DataAfterEnd,
}

/// Malformed input.
///
/// ```
/// use jsonstream::{SyntaxError, SyntaxErrorKind};
///
/// let err = SyntaxError::new(SyntaxErrorKind::InvalidIdentifier, 2).with_value("nul");
/// assert_eq!(err.to_string(), r#"invalid identifier at position 2 ("nul")"#);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {offset}{}", Snippet(.value))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub offset: usize,
    /// The offending raw text, when there is something useful to show.
    pub value: Option<BString>,
}

impl SyntaxError {
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset,
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl AsRef<[u8]>) -> Self {
        self.value = Some(BString::from(value.as_ref()));
        self
    }
}

struct Snippet<'e>(&'e Option<BString>);

impl fmt::Display for Snippet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, " (\"{value}\")"),
            None => Ok(()),
        }
    }
}

/// A value of the wrong kind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("expected {expected}{}, got {actual} at position {offset}", OrNull(.nullable))]
pub struct TypeError {
    pub expected: ValueKind,
    pub actual: ValueKind,
    pub offset: usize,
    /// Whether `null` would also have been accepted.
    pub nullable: bool,
}

struct OrNull<'e>(&'e bool);

impl fmt::Display for OrNull<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self.0 { f.write_str(" or null") } else { Ok(()) }
    }
}

/// An object closed before every required property had been seen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("required property \"{name}\" is missing from object at position {offset}")]
pub struct RequiredPropertyError {
    pub name: String,
    pub offset: usize,
}

/// A shared handle to an error that did not originate in this crate.
///
/// Two handles are equal when they point at the same underlying error, which
/// is what makes the latched copy of an injected error compare equal to the
/// one the caller kept.
#[derive(Clone)]
pub struct ExternalError(Arc<dyn core::error::Error + Send + Sync>);

impl ExternalError {
    pub fn new<E>(err: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(err))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Attempts to view the wrapped error as a concrete type.
    #[must_use]
    pub fn downcast_ref<E: core::error::Error + 'static>(&self) -> Option<&E> {
        let inner: &(dyn core::error::Error + 'static) = &*self.0;
        inner.downcast_ref::<E>()
    }
}

impl PartialEq for ExternalError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl core::error::Error for ExternalError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.0.source()
    }
}

#[derive(Error, Debug)]
#[error("{0}")]
struct Message(String);
