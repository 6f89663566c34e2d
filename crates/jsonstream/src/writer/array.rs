use super::{ObjectState, TokenWriter, Writer};
use crate::backend::TokenWrite;

/// Writes the elements of an array started with [`Writer::array`].
///
/// Either call [`next`](Self::next) before writing each element with the
/// returned writer, or use the shortcut methods, which do both. Finish with
/// [`end`](Self::end).
#[must_use = "the array is only closed by calling `end`"]
pub struct ArrayState<'w, T = TokenWriter> {
    writer: &'w mut Writer<T>,
    has_items: bool,
}

impl<'w, T: TokenWrite> ArrayState<'w, T> {
    pub(crate) fn new(writer: &'w mut Writer<T>) -> Self {
        Self {
            writer,
            has_items: false,
        }
    }

    /// Prepares for the next element and returns the writer to write it
    /// with.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &mut Writer<T> {
        if self.has_items {
            self.writer.emit(|t| t.delimiter(b','));
        }
        self.has_items = true;
        self.writer
    }

    pub fn null(&mut self) {
        self.next().null();
    }

    pub fn bool(&mut self, value: bool) {
        self.next().bool(value);
    }

    pub fn int(&mut self, value: i64) {
        self.next().int(value);
    }

    pub fn float(&mut self, value: f64) {
        self.next().float(value);
    }

    pub fn string(&mut self, value: &str) {
        self.next().string(value);
    }

    pub fn raw(&mut self, json: impl AsRef<[u8]>) {
        self.next().raw(json);
    }

    /// Starts a nested array element.
    pub fn array(&mut self) -> ArrayState<'_, T> {
        self.next().array()
    }

    /// Starts a nested object element.
    pub fn object(&mut self) -> ObjectState<'_, T> {
        self.next().object()
    }

    /// Writes the closing `]`.
    pub fn end(self) {
        self.writer.emit(|t| t.delimiter(b']'));
    }
}
