//! Decoding of `\uXXXX` escape sequences.
//!
//! [`UnicodeEscapeBuffer`] accumulates exactly four ASCII hexadecimal digits
//! (`0-9`, `A-F`, `a-f`) into a UTF-16 code unit. A code unit in the
//! surrogate range is not a character on its own; [`Utf16Unit`] tells the
//! tokenizer whether it has a complete scalar value, a high surrogate that must
//! be followed by a second escape, or a stray low surrogate.

/// A byte that is not an ASCII hex digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidHexDigit(pub u8);

/// Accumulates four hexadecimal digits into a UTF-16 code unit.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a') + 10),
            b'A'..=b'F' => Some(u16::from(b - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one digit. Returns the code unit once the fourth digit arrives,
    /// and resets so the buffer can decode the next escape.
    pub(crate) fn feed(&mut self, b: u8) -> Result<Option<u16>, InvalidHexDigit> {
        let d = Self::hex_val(b).ok_or(InvalidHexDigit(b))?;
        self.acc = (self.acc << 4) | d;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.acc;
        *self = Self::default();
        Ok(Some(unit))
    }
}

/// Classification of a decoded code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Utf16Unit {
    Scalar(char),
    High(u16),
    Low(u16),
}

impl Utf16Unit {
    pub(crate) fn classify(unit: u16) -> Self {
        match unit {
            0xD800..=0xDBFF => Self::High(unit),
            0xDC00..=0xDFFF => Self::Low(unit),
            // Every other BMP code unit is a scalar value.
            _ => char::from_u32(u32::from(unit)).map_or(Self::Low(unit), Self::Scalar),
        }
    }
}

/// Joins a high and a low surrogate; `None` if `low` is not a low surrogate.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    char::decode_utf16([high, low]).next()?.ok()
}
