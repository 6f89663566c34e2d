//! Pull-style decoding of a JSON document held in memory.
//!
//! A [`Reader`] is driven by the caller: each method consumes exactly one
//! value of the kind the caller expects. Arrays and objects are walked with
//! [`ArrayState`] and [`ObjectState`], which yield the reader back for each
//! element so that nested values are read with the same methods.
//!
//! The first failure is latched. Every later read returns that same error
//! without touching the input, so a decoding routine can run to completion
//! and check [`Reader::error`] once at the end.
//!
//! ```
//! use jsonstream::Reader;
//!
//! let mut r = Reader::new(br#"{"name": "x", "tags": ["a", "b"], "extra": {"n": 1}}"#);
//! let mut name = None;
//! let mut tags = Vec::new();
//! let mut obj = r.object().unwrap();
//! while let Some((prop, r)) = obj.next() {
//!     match prop {
//!         "name" => name = r.string().ok(),
//!         "tags" => {
//!             let mut arr = r.array().unwrap();
//!             while let Some(r) = arr.next() {
//!                 tags.extend(r.string().ok());
//!             }
//!         }
//!         _ => {} // unread values are skipped
//!     }
//! }
//! assert!(r.error().is_none());
//! assert_eq!(name.as_deref(), Some("x"));
//! assert_eq!(tags, ["a", "b"]);
//! ```

mod any;
mod array;
mod object;
#[cfg(test)]
mod tests;
mod token;

use alloc::{borrow::Cow, vec::Vec};
use core::marker::PhantomData;

pub use self::{any::AnyValue, array::ArrayState, object::ObjectState, token::TokenReader};
use crate::{
    backend::{AnyToken, TokenRead},
    error::{Error, Result, SyntaxError, SyntaxErrorKind, TypeError},
    kind::ValueKind,
};

/// High-level JSON decoder with sticky error state.
pub struct Reader<'a, T = TokenReader<'a>> {
    tokens: T,
    /// Set while a container helper has yielded an element that the caller
    /// has not read yet.
    awaiting_value: bool,
    /// Containers opened and not yet closed, innermost last.
    containers: Vec<Open>,
    error: Option<Error>,
    input: PhantomData<&'a [u8]>,
}

/// An array or object the reader is inside of.
#[derive(Debug, Clone, Copy)]
struct Open {
    end: u8,
    after_first: bool,
}

impl<'a> Reader<'a> {
    /// Creates a reader over a complete JSON document.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_tokens(TokenReader::new(data))
    }
}

impl<'a> From<&'a [u8]> for Reader<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a str> for Reader<'a> {
    fn from(data: &'a str) -> Self {
        Self::new(data.as_bytes())
    }
}

fn or_null(err: Error) -> Error {
    match err {
        Error::Type(e) => Error::Type(TypeError { nullable: true, ..e }),
        other => other,
    }
}

impl<'a, T: TokenRead<'a>> Reader<'a, T> {
    /// Creates a reader on top of any token source.
    pub fn with_tokens(tokens: T) -> Self {
        Self {
            tokens,
            awaiting_value: false,
            containers: Vec::new(),
            error: None,
            input: PhantomData,
        }
    }

    /// The latched error, if any read has failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Puts the reader into a failed state, unless it has failed already.
    ///
    /// Useful for rejecting a value that is well-formed JSON but not valid
    /// for the caller; all later reads then fail with `err`.
    pub fn add_error(&mut self, err: impl Into<Error>) {
        self.fail(err.into());
    }

    /// Offset of the start of the most recently examined token.
    pub fn position(&self) -> usize {
        self.tokens.last_pos()
    }

    /// Fails unless only whitespace remains in the input. Containers whose
    /// helpers were dropped early are finished first.
    pub fn require_eof(&mut self) -> Result<()> {
        if self.error.is_none() {
            self.close_nested(0);
        }
        self.check()?;
        if self.tokens.eof() {
            return Ok(());
        }
        let err = SyntaxError::new(SyntaxErrorKind::DataAfterEnd, self.tokens.last_pos());
        self.latch(Err(err.into()))
    }

    /// Reads a `null`.
    pub fn null(&mut self) -> Result<()> {
        self.check()?;
        let result = match self.tokens.null() {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.type_error(ValueKind::Null, false)),
            Err(e) => Err(e),
        };
        self.latch(result)
    }

    pub fn bool(&mut self) -> Result<bool> {
        self.check()?;
        let result = self.tokens.bool();
        self.latch(result)
    }

    /// Consumes a `null` if one comes next and returns `true`. Otherwise
    /// consumes nothing and returns `false`, leaving the value for the next
    /// read.
    pub fn try_null(&mut self) -> Result<bool> {
        let awaiting_value = self.awaiting_value;
        self.check()?;
        let result = self.tokens.null();
        let matched = self.latch(result)?;
        if !matched {
            self.awaiting_value = awaiting_value;
        }
        Ok(matched)
    }

    /// Reads a boolean, or `None` for `null`.
    pub fn bool_or_null(&mut self) -> Result<Option<bool>> {
        self.nullable(T::bool)
    }

    /// Reads a number and converts it to an integer, truncating any
    /// fractional part and saturating at the bounds of `i64`.
    pub fn int(&mut self) -> Result<i64> {
        self.float().map(truncate)
    }

    pub fn int_or_null(&mut self) -> Result<Option<i64>> {
        self.float_or_null().map(|n| n.map(truncate))
    }

    pub fn float(&mut self) -> Result<f64> {
        self.check()?;
        let result = self.tokens.number();
        self.latch(result)
    }

    pub fn float_or_null(&mut self) -> Result<Option<f64>> {
        self.nullable(T::number)
    }

    /// Reads a string. The result borrows from the input unless the string
    /// contained escape sequences.
    pub fn string(&mut self) -> Result<Cow<'a, str>> {
        self.check()?;
        let result = self.tokens.string();
        self.latch(result)
    }

    pub fn string_or_null(&mut self) -> Result<Option<Cow<'a, str>>> {
        self.nullable(T::string)
    }

    /// Starts reading an array.
    pub fn array(&mut self) -> Result<ArrayState<'_, 'a, T>> {
        self.open(ValueKind::Array, false)?;
        Ok(ArrayState::new(self))
    }

    /// Starts reading an array, or returns `None` for `null`.
    pub fn array_or_null(&mut self) -> Result<Option<ArrayState<'_, 'a, T>>> {
        if self.open(ValueKind::Array, true)? {
            Ok(Some(ArrayState::new(self)))
        } else {
            Ok(None)
        }
    }

    /// Starts reading an object.
    pub fn object(&mut self) -> Result<ObjectState<'_, 'a, T>> {
        self.open(ValueKind::Object, false)?;
        Ok(ObjectState::new(self))
    }

    /// Starts reading an object, or returns `None` for `null`.
    pub fn object_or_null(&mut self) -> Result<Option<ObjectState<'_, 'a, T>>> {
        if self.open(ValueKind::Object, true)? {
            Ok(Some(ObjectState::new(self)))
        } else {
            Ok(None)
        }
    }

    /// Reads a value of whatever kind comes next.
    pub fn any(&mut self) -> Result<AnyValue<'_, 'a, T>> {
        self.check()?;
        let result = self.tokens.any();
        Ok(match self.latch(result)? {
            AnyToken::Null => AnyValue::Null,
            AnyToken::Bool(b) => AnyValue::Bool(b),
            AnyToken::Number(n) => AnyValue::Number(n),
            AnyToken::String(s) => AnyValue::String(s),
            AnyToken::ArrayStart => {
                self.enter(b']');
                AnyValue::Array(ArrayState::new(self))
            }
            AnyToken::ObjectStart => {
                self.enter(b'}');
                AnyValue::Object(ObjectState::new(self))
            }
        })
    }

    /// Consumes the next value, including everything nested inside it,
    /// without decoding it.
    pub fn skip_value(&mut self) -> Result<()> {
        self.check()?;
        let result = skip(&mut self.tokens);
        self.latch(result)
    }

    /// Common prologue of every read: the previous element is now accounted
    /// for, and a failed reader does nothing.
    fn check(&mut self) -> Result<()> {
        self.awaiting_value = false;
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Records `err` unless an earlier error is already latched, and returns
    /// whichever error is now latched.
    fn fail(&mut self, err: Error) -> Error {
        if let Some(first) = &self.error {
            return first.clone();
        }
        log::debug!("json reader failed: {err}");
        self.error = Some(err.clone());
        err
    }

    pub(crate) fn latch<V>(&mut self, result: Result<V>) -> Result<V> {
        result.map_err(|err| self.fail(err))
    }

    fn nullable<V>(&mut self, read: impl FnOnce(&mut T) -> Result<V>) -> Result<Option<V>> {
        self.check()?;
        let result = match self.tokens.null() {
            Ok(true) => Ok(None),
            Ok(false) => read(&mut self.tokens).map(Some).map_err(or_null),
            Err(e) => Err(e),
        };
        self.latch(result)
    }

    /// Consumes the opening delimiter of a container. Returns `false` if
    /// `nullable` and the value was `null`.
    fn open(&mut self, kind: ValueKind, nullable: bool) -> Result<bool> {
        let (start, end) = match kind {
            ValueKind::Array => (b'[', b']'),
            _ => (b'{', b'}'),
        };
        self.check()?;
        let is_null = if nullable { self.tokens.null() } else { Ok(false) };
        let result = match is_null {
            Ok(true) => Ok(false),
            Ok(false) => match self.tokens.delimiter(start) {
                Ok(true) => {
                    self.enter(end);
                    Ok(true)
                }
                Ok(false) => Err(self.type_error(kind, nullable)),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        self.latch(result)
    }

    /// Builds the error for a token of the wrong kind by reading it. If the
    /// token is malformed, the syntax error wins.
    fn type_error(&mut self, expected: ValueKind, nullable: bool) -> Error {
        match self.tokens.any() {
            Ok(token) => TypeError {
                expected,
                actual: token.kind(),
                offset: self.tokens.last_pos(),
                nullable,
            }
            .into(),
            Err(e) => e,
        }
    }

    fn enter(&mut self, end: u8) {
        self.containers.push(Open {
            end,
            after_first: false,
        });
    }

    /// Depth of the innermost open container; a helper created now walks
    /// this level.
    pub(crate) fn depth(&self) -> usize {
        self.containers.len()
    }

    /// Advances the helper walking `level` to its next element. Returns
    /// `false` at the closing delimiter or on failure.
    fn next_element(&mut self, level: usize) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.close_nested(level);
        if self.error.is_some() || self.containers.len() != level {
            return false;
        }
        self.step()
    }

    /// Advances a helper walking an object to its next property name.
    fn next_property(&mut self, level: usize) -> Option<Cow<'a, str>> {
        if self.next_element(level) {
            self.read_name()
        } else {
            None
        }
    }

    /// Advances the innermost container, skipping the previous element if
    /// it was never read. Closes the container at its end delimiter.
    fn step(&mut self) -> bool {
        let Some(top) = self.containers.last_mut() else {
            return false;
        };
        let end = top.end;
        let result = if top.after_first {
            if self.awaiting_value && self.skip_value().is_err() {
                return false;
            }
            self.tokens.end_delimiter_or_comma(end)
        } else {
            top.after_first = true;
            self.tokens.delimiter(end)
        };
        match result {
            Ok(true) => {
                self.containers.pop();
                false
            }
            Ok(false) => {
                self.awaiting_value = true;
                true
            }
            Err(e) => {
                self.add_error(e);
                false
            }
        }
    }

    fn read_name(&mut self) -> Option<Cow<'a, str>> {
        match self.tokens.property_name() {
            Ok(name) => Some(name),
            Err(e) => {
                self.awaiting_value = false;
                self.add_error(e);
                None
            }
        }
    }

    /// Runs every container deeper than `level` to its end. These are
    /// nested values whose helpers were dropped before finishing.
    fn close_nested(&mut self, level: usize) {
        while self.error.is_none() {
            let Some(top) = self.containers.get(level..).and_then(<[Open]>::last) else {
                return;
            };
            let is_object = top.end == b'}';
            while self.step() {
                if is_object && self.read_name().is_none() {
                    return;
                }
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(n: f64) -> i64 {
    n as i64
}

/// Skips one complete value without recursion, so hostile nesting depth
/// cannot exhaust the stack.
fn skip<'a, T: TokenRead<'a>>(tokens: &mut T) -> Result<()> {
    let mut open: Vec<u8> = Vec::new();
    loop {
        match tokens.any()? {
            AnyToken::ArrayStart if !tokens.delimiter(b']')? => {
                open.push(b']');
                continue;
            }
            AnyToken::ObjectStart if !tokens.delimiter(b'}')? => {
                tokens.property_name()?;
                open.push(b'}');
                continue;
            }
            _ => {}
        }
        // A value just ended; close every container that ends with it.
        loop {
            let Some(&end) = open.last() else {
                return Ok(());
            };
            if !tokens.end_delimiter_or_comma(end)? {
                if end == b'}' {
                    tokens.property_name()?;
                }
                break;
            }
            open.pop();
        }
    }
}
