use alloc::vec::Vec;

use super::buffer::StreamBuffer;
use crate::{
    backend::{NoSink, Sink, TokenWrite},
    error::Result,
    options::WriterOptions,
};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Floats with no fractional part below this magnitude are written as
/// integers.
const EXACT_INTEGER_LIMIT: f64 = 1e15;

/// Magnitudes outside this range are written in exponent form.
const PLAIN_RANGE: core::ops::Range<f64> = 1e-6..1e21;

/// The default [`TokenWrite`] implementation.
///
/// Produces compact JSON with no insignificant whitespace.
#[derive(Debug)]
pub struct TokenWriter<S = NoSink> {
    buf: StreamBuffer<S>,
    options: WriterOptions,
}

impl TokenWriter {
    /// A writer that keeps its whole output in memory.
    #[must_use]
    pub fn new(options: WriterOptions) -> Self {
        Self {
            buf: StreamBuffer::in_memory(),
            options,
        }
    }
}

impl<S: Sink> TokenWriter<S> {
    /// A writer that hands its output to `sink` whenever at least
    /// `threshold` bytes are buffered.
    pub fn streaming(sink: S, threshold: usize, options: WriterOptions) -> Self {
        Self {
            buf: StreamBuffer::streaming(sink, threshold),
            options,
        }
    }

    fn write_escaped(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let mut run = 0;
        for (i, c) in value.char_indices() {
            let short = match c {
                '"' => Some(b'"'),
                '\\' => Some(b'\\'),
                '\u{8}' => Some(b'b'),
                '\t' => Some(b't'),
                '\n' => Some(b'n'),
                '\u{c}' => Some(b'f'),
                '\r' => Some(b'r'),
                _ => None,
            };
            let needs_unicode = c < ' ' || (!c.is_ascii() && self.options.escape_non_ascii);
            if short.is_none() && !needs_unicode {
                continue;
            }
            if run < i {
                self.buf.write(&bytes[run..i])?;
            }
            run = i + c.len_utf8();
            if let Some(b) = short {
                self.buf.write(&[b'\\', b])?;
            } else {
                let mut units = [0u16; 2];
                for &unit in c.encode_utf16(&mut units).iter() {
                    self.buf.write(&unicode_escape(unit))?;
                }
            }
        }
        if run < bytes.len() {
            self.buf.write(&bytes[run..])?;
        }
        Ok(())
    }
}

fn unicode_escape(unit: u16) -> [u8; 6] {
    let nibble = |shift: u16| HEX[usize::from((unit >> shift) & 0xf)];
    [b'\\', b'u', nibble(12), nibble(8), nibble(4), nibble(0)]
}

impl<S: Sink> TokenWrite for TokenWriter<S> {
    fn null(&mut self) -> Result<()> {
        self.buf.write(b"null")
    }

    fn bool(&mut self, value: bool) -> Result<()> {
        let literal: &[u8] = if value { b"true" } else { b"false" };
        self.buf.write(literal)
    }

    fn int(&mut self, value: i64) -> Result<()> {
        self.buf.write_display(value)
    }

    fn float(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return self.null();
        }
        if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
            #[allow(clippy::cast_possible_truncation)]
            let whole = value as i64;
            return self.int(whole);
        }
        if PLAIN_RANGE.contains(&value.abs()) {
            self.buf.write_display(value)
        } else {
            self.buf.write_display(format_args!("{value:e}"))
        }
    }

    fn string(&mut self, value: &str) -> Result<()> {
        self.buf.write(b"\"")?;
        self.write_escaped(value)?;
        self.buf.write(b"\"")
    }

    fn raw(&mut self, json: &[u8]) -> Result<()> {
        self.buf.write(json)
    }

    fn delimiter(&mut self, delimiter: u8) -> Result<()> {
        self.buf.write(&[delimiter])
    }

    fn property_name(&mut self, name: &str) -> Result<()> {
        self.string(name)?;
        self.buf.write(b":")
    }

    fn bytes(&self) -> &[u8] {
        self.buf.bytes()
    }

    fn flush(&mut self) -> Result<()> {
        self.buf.flush()
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }
}
