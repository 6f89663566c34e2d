use core::fmt;

/// The six kinds of JSON value, as defined by [RFC 8259].
///
/// Used to report type mismatches and to tag the result of
/// [`Reader::any`](crate::Reader::any).
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// The name used for this kind in error messages.
    ///
    /// ```
    /// use jsonstream::ValueKind;
    ///
    /// assert_eq!(ValueKind::Bool.name(), "boolean");
    /// assert_eq!(ValueKind::Object.to_string(), "object");
    /// ```
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
