//! Byte-level tokenizer over a complete in-memory JSON document.
//!
//! The tokenizer never looks further ahead than the token it is asked for and
//! never allocates unless a string contains escape sequences. It holds no
//! structural state; nesting is tracked by the caller.
//!
//! Accepted grammar, per token:
//!
//! - whitespace: space, tab, `\n`, `\r`
//! - keywords: an identifier run of ASCII letters, digits or `_` that is
//!   exactly `null`, `true` or `false`
//! - numbers: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`, followed by
//!   something that cannot continue a number
//! - strings: `"` ... `"` with the eight short escapes and `\uXXXX` (surrogate
//!   pairs combined); raw control characters are rejected and the content
//!   must be valid UTF-8
//! - delimiters: `[ ] { } , :`

mod escape_buffer;
mod literal;

use alloc::{borrow::Cow, string::String};

use bstr::ByteSlice;

use self::{
    escape_buffer::{InvalidHexDigit, UnicodeEscapeBuffer, Utf16Unit, combine_surrogates},
    literal::{Literal, is_identifier_byte},
};
use crate::{
    backend::{AnyToken, TokenRead},
    error::{Error, Result, SyntaxError, SyntaxErrorKind, TypeError},
    kind::ValueKind,
};

/// Integers with at most this many digits are converted exactly without going
/// through the float parser.
const FAST_INTEGER_DIGITS: usize = 15;

/// The default [`TokenRead`] implementation.
///
/// ```
/// use jsonstream::{TokenRead, TokenReader};
///
/// let mut tokens = TokenReader::new(br#" "a\nb" "#);
/// assert_eq!(tokens.string().unwrap(), "a\nb");
/// assert!(tokens.eof());
/// ```
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    data: &'a [u8],
    pos: usize,
    last_pos: usize,
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes that may not directly follow a number.
#[inline]
fn continues_number(b: u8) -> bool {
    is_identifier_byte(b) || matches!(b, b'.' | b'+' | b'-')
}

impl<'a> TokenReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            last_pos: 0,
        }
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Skips whitespace and returns the next byte without consuming it.
    fn peek_significant(&mut self) -> Option<u8> {
        while let Some(&b) = self.data.get(self.pos) {
            if !is_whitespace(b) {
                return Some(b);
            }
            self.pos += 1;
        }
        None
    }

    /// Like [`peek_significant`](Self::peek_significant), but marks the start
    /// of a token and treats end of input as an error.
    fn begin_token(&mut self) -> Result<u8> {
        let b = self.peek_significant().ok_or_else(|| self.eof_error())?;
        self.last_pos = self.pos;
        Ok(b)
    }

    fn eof_error(&self) -> Error {
        SyntaxError::new(SyntaxErrorKind::UnexpectedEndOfInput, self.data.len()).into()
    }

    fn syntax_error(&self, kind: SyntaxErrorKind, offset: usize) -> Error {
        SyntaxError::new(kind, offset).into()
    }

    /// An error naming the (possibly multi-byte) character at `offset`.
    fn unexpected_character(&self, kind: SyntaxErrorKind, offset: usize) -> Error {
        let rest = &self.data[offset..];
        let (_, size) = bstr::decode_utf8(rest);
        SyntaxError::new(kind, offset)
            .with_value(&rest[..size.max(1)])
            .into()
    }

    /// Consumes an identifier run at the current position and matches it
    /// against the keywords.
    fn literal(&mut self) -> Result<Literal> {
        let start = self.pos;
        let len = self.data[start..]
            .iter()
            .take_while(|&&b| is_identifier_byte(b))
            .count();
        let ident = &self.data[start..start + len];
        self.pos = start + len;
        if let Some(literal) = Literal::from_identifier(ident) {
            return Ok(literal);
        }
        if self.pos == self.data.len() && Literal::is_truncated(ident) {
            return Err(self.eof_error());
        }
        Err(SyntaxError::new(SyntaxErrorKind::InvalidIdentifier, start)
            .with_value(ident)
            .into())
    }

    /// Determines the kind of the token at the current position without
    /// consuming it, for reporting a type mismatch.
    fn type_error(&mut self, expected: ValueKind) -> Error {
        let start = self.pos;
        let actual = match self.data.get(start) {
            None => Err(self.eof_error()),
            Some(b'"') => Ok(ValueKind::String),
            Some(b'-' | b'0'..=b'9') => Ok(ValueKind::Number),
            Some(b'[') => Ok(ValueKind::Array),
            Some(b'{') => Ok(ValueKind::Object),
            Some(&b) if is_identifier_byte(b) => self.literal().map(Literal::kind),
            Some(_) => Err(self.unexpected_character(SyntaxErrorKind::UnexpectedCharacter, start)),
        };
        self.pos = start;
        match actual {
            Ok(actual) => TypeError {
                expected,
                actual,
                offset: start,
                nullable: false,
            }
            .into(),
            Err(e) => e,
        }
    }

    fn read_number(&mut self) -> Result<f64> {
        let data = self.data;
        let start = self.pos;
        let mut p = start;
        let digits_from = |p: usize| data[p..].iter().take_while(|b| b.is_ascii_digit()).count();

        if data.get(p) == Some(&b'-') {
            p += 1;
        }
        match data.get(p) {
            Some(b'0') => p += 1,
            Some(b'1'..=b'9') => p += digits_from(p),
            _ => return Err(self.incomplete_number(start, p)),
        }
        let int_end = p;
        if data.get(p) == Some(&b'.') {
            p += 1;
            let n = digits_from(p);
            if n == 0 {
                return Err(self.incomplete_number(start, p));
            }
            p += n;
        }
        if matches!(data.get(p), Some(b'e' | b'E')) {
            p += 1;
            if matches!(data.get(p), Some(b'+' | b'-')) {
                p += 1;
            }
            let n = digits_from(p);
            if n == 0 {
                return Err(self.incomplete_number(start, p));
            }
            p += n;
        }
        if data.get(p).is_some_and(|&b| continues_number(b)) {
            return Err(self.invalid_number(start));
        }
        self.pos = p;

        let text = &data[start..p];
        let negative = text[0] == b'-';
        let int_digits = &data[start + usize::from(negative)..int_end];
        if p == int_end && int_digits.len() <= FAST_INTEGER_DIGITS {
            let magnitude = int_digits
                .iter()
                .fold(0u64, |acc, &d| acc * 10 + u64::from(d - b'0'));
            #[allow(clippy::cast_precision_loss)]
            let value = magnitude as f64;
            return Ok(if negative { -value } else { value });
        }
        // Out-of-range magnitudes parse as infinity, which JSON cannot carry.
        text.to_str()
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .ok_or_else(|| self.invalid_number(start))
    }

    /// A number whose grammar needs more bytes at `p`: end of input if the
    /// data stops there, malformed otherwise.
    fn incomplete_number(&self, start: usize, p: usize) -> Error {
        if p == self.data.len() {
            self.eof_error()
        } else {
            self.invalid_number(start)
        }
    }

    /// Reports the whole malformed run starting at `start`.
    fn invalid_number(&self, start: usize) -> Error {
        let len = self.data[start..]
            .iter()
            .take_while(|&&b| continues_number(b))
            .count();
        SyntaxError::new(SyntaxErrorKind::InvalidNumber, start)
            .with_value(&self.data[start..start + len.max(1)])
            .into()
    }

    /// Reads a string whose opening quote is at the current position.
    fn read_string(&mut self) -> Result<Cow<'a, str>> {
        let data = self.data;
        let start = self.pos + 1;
        let mut p = start;
        let mut run_start = start;
        let mut owned: Option<String> = None;

        loop {
            let Some(&b) = data.get(p) else {
                return Err(self.eof_error());
            };
            match b {
                b'"' => break,
                b'\\' => {
                    let run = self.checked_utf8(run_start, p)?;
                    let buf = owned.get_or_insert_with(String::new);
                    buf.push_str(run);
                    p = self.unescape(p, buf)?;
                    run_start = p;
                }
                0x00..=0x1f => {
                    return Err(self.syntax_error(SyntaxErrorKind::ControlCharacter, p));
                }
                _ => p += 1,
            }
        }

        let tail = self.checked_utf8(run_start, p)?;
        self.pos = p + 1;
        Ok(match owned {
            None => Cow::Borrowed(tail),
            Some(mut buf) => {
                buf.push_str(tail);
                Cow::Owned(buf)
            }
        })
    }

    /// Validates `data[from..to]` as UTF-8. Escapes start with an ASCII
    /// backslash, so a run between escapes never splits a multi-byte
    /// sequence.
    fn checked_utf8(&self, from: usize, to: usize) -> Result<&'a str> {
        let data = self.data;
        data[from..to].to_str().map_err(|e| {
            let offset = from + e.valid_up_to();
            let len = e.error_len().unwrap_or(to - offset);
            SyntaxError::new(SyntaxErrorKind::InvalidUtf8, offset)
                .with_value(&data[offset..offset + len])
                .into()
        })
    }

    /// Decodes the escape sequence whose backslash is at `at` into `out` and
    /// returns the offset just past it.
    fn unescape(&self, at: usize, out: &mut String) -> Result<usize> {
        let Some(&c) = self.data.get(at + 1) else {
            return Err(self.eof_error());
        };
        let ch = match c {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                let (ch, next) = self.unicode_escape(at)?;
                out.push(ch);
                return Ok(next);
            }
            _ => {
                return Err(SyntaxError::new(SyntaxErrorKind::InvalidEscape, at)
                    .with_value(&self.data[at..at + 2])
                    .into());
            }
        };
        out.push(ch);
        Ok(at + 2)
    }

    /// Decodes `\uXXXX` at `at`, plus the low half of a surrogate pair when
    /// the first unit is a high surrogate.
    fn unicode_escape(&self, at: usize) -> Result<(char, usize)> {
        let unit = self.hex_unit(at)?;
        let high = match Utf16Unit::classify(unit) {
            Utf16Unit::Scalar(ch) => return Ok((ch, at + 6)),
            Utf16Unit::High(high) => high,
            Utf16Unit::Low(_) => return Err(self.invalid_unicode(at, at + 6)),
        };
        let second = at + 6;
        if self.data.get(second..second + 2) != Some(&b"\\u"[..]) {
            if second + 2 > self.data.len() && self.data[second..].iter().all(|&b| b == b'\\') {
                return Err(self.eof_error());
            }
            return Err(self.invalid_unicode(at, second));
        }
        let low = self.hex_unit(second)?;
        combine_surrogates(high, low)
            .map(|ch| (ch, second + 6))
            .ok_or_else(|| self.invalid_unicode(at, second + 6))
    }

    /// Reads the four hex digits of the `\u` escape at `at`.
    fn hex_unit(&self, at: usize) -> Result<u16> {
        let mut buf = UnicodeEscapeBuffer::new();
        for i in at + 2..at + 6 {
            let Some(&b) = self.data.get(i) else {
                return Err(self.eof_error());
            };
            match buf.feed(b) {
                Ok(Some(unit)) => return Ok(unit),
                Ok(None) => {}
                Err(InvalidHexDigit(_)) => return Err(self.invalid_unicode(at, i + 1)),
            }
        }
        Err(self.invalid_unicode(at, at + 6))
    }

    fn invalid_unicode(&self, from: usize, to: usize) -> Error {
        let to = to.min(self.data.len());
        SyntaxError::new(SyntaxErrorKind::InvalidUnicodeEscape, from)
            .with_value(&self.data[from..to])
            .into()
    }
}

impl<'a> TokenRead<'a> for TokenReader<'a> {
    fn eof(&mut self) -> bool {
        if self.peek_significant().is_some() {
            self.last_pos = self.pos;
            false
        } else {
            true
        }
    }

    fn last_pos(&self) -> usize {
        self.last_pos
    }

    fn null(&mut self) -> Result<bool> {
        let b = self.begin_token()?;
        if !is_identifier_byte(b) || b.is_ascii_digit() {
            return match b {
                b'"' | b'-' | b'0'..=b'9' | b'[' | b'{' | b']' | b'}' | b',' | b':' => Ok(false),
                _ => Err(self.unexpected_character(SyntaxErrorKind::UnexpectedCharacter, self.pos)),
            };
        }
        let start = self.pos;
        if self.literal()? == Literal::Null {
            Ok(true)
        } else {
            self.pos = start;
            Ok(false)
        }
    }

    fn bool(&mut self) -> Result<bool> {
        let b = self.begin_token()?;
        if !b.is_ascii_alphabetic() {
            return Err(self.type_error(ValueKind::Bool));
        }
        match self.literal()? {
            Literal::True => Ok(true),
            Literal::False => Ok(false),
            Literal::Null => Err(TypeError {
                expected: ValueKind::Bool,
                actual: ValueKind::Null,
                offset: self.last_pos,
                nullable: false,
            }
            .into()),
        }
    }

    fn number(&mut self) -> Result<f64> {
        match self.begin_token()? {
            b'-' | b'0'..=b'9' => self.read_number(),
            _ => Err(self.type_error(ValueKind::Number)),
        }
    }

    fn string(&mut self) -> Result<Cow<'a, str>> {
        match self.begin_token()? {
            b'"' => self.read_string(),
            _ => Err(self.type_error(ValueKind::String)),
        }
    }

    fn delimiter(&mut self, delimiter: u8) -> Result<bool> {
        match self.peek_significant() {
            Some(b) if b == delimiter => {
                self.last_pos = self.pos;
                self.pos += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn end_delimiter_or_comma(&mut self, end: u8) -> Result<bool> {
        let b = self.begin_token()?;
        if b == b',' || b == end {
            self.pos += 1;
            return Ok(b == end);
        }
        Err(self.unexpected_character(SyntaxErrorKind::ExpectedCommaOrEnd, self.pos))
    }

    fn property_name(&mut self) -> Result<Cow<'a, str>> {
        if self.begin_token()? != b'"' {
            return Err(self.unexpected_character(SyntaxErrorKind::ExpectedPropertyName, self.pos));
        }
        let name_pos = self.pos;
        let name = self.read_string()?;
        match self.peek_significant() {
            Some(b':') => self.pos += 1,
            Some(_) => {
                return Err(self.unexpected_character(SyntaxErrorKind::ExpectedColon, self.pos));
            }
            None => return Err(self.eof_error()),
        }
        self.last_pos = name_pos;
        Ok(name)
    }

    fn any(&mut self) -> Result<AnyToken<'a>> {
        match self.begin_token()? {
            b'"' => self.read_string().map(AnyToken::String),
            b'-' | b'0'..=b'9' => self.read_number().map(AnyToken::Number),
            b'[' => {
                self.pos += 1;
                Ok(AnyToken::ArrayStart)
            }
            b'{' => {
                self.pos += 1;
                Ok(AnyToken::ObjectStart)
            }
            b if is_identifier_byte(b) => Ok(match self.literal()? {
                Literal::Null => AnyToken::Null,
                Literal::True => AnyToken::Bool(true),
                Literal::False => AnyToken::Bool(false),
            }),
            _ => Err(self.unexpected_character(SyntaxErrorKind::UnexpectedCharacter, self.pos)),
        }
    }
}
