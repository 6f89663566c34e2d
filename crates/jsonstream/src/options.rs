/// Configuration options for a [`Writer`](crate::Writer).
///
/// # Examples
///
/// ```rust
/// use jsonstream::{Writer, WriterOptions};
///
/// let mut w = Writer::with_options(WriterOptions {
///     escape_non_ascii: true,
/// });
/// w.string("é😀");
/// assert_eq!(w.bytes(), br#""\u00e9\ud83d\ude00""#);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Whether to write every non-ASCII character in strings and property
    /// names as a `\uXXXX` escape, using a surrogate pair outside the Basic
    /// Multilingual Plane.
    ///
    /// By default, non-ASCII characters are written as raw UTF-8, which is
    /// shorter and equally valid JSON. Enable this when the output must be
    /// pure ASCII.
    ///
    /// # Default
    ///
    /// `false`
    pub escape_non_ascii: bool,
}
