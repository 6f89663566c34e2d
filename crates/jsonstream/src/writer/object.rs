use super::{ArrayState, TokenWriter, Writer};
use crate::backend::TokenWrite;

/// Writes the properties of an object started with [`Writer::object`].
///
/// Call [`property`](Self::property) and write the value with the returned
/// writer, or use the shortcut methods. The `opt_*` shortcuts omit the
/// property entirely when the value is `None`. Finish with
/// [`end`](Self::end).
///
/// ```
/// use jsonstream::Writer;
///
/// let mut w = Writer::new();
/// let mut obj = w.object();
/// obj.int("id", 7);
/// obj.opt_string("nickname", None);
/// obj.property("score").float_or_null(None);
/// obj.end();
/// assert_eq!(w.bytes(), br#"{"id":7,"score":null}"#);
/// ```
#[must_use = "the object is only closed by calling `end`"]
pub struct ObjectState<'w, T = TokenWriter> {
    writer: &'w mut Writer<T>,
    has_items: bool,
}

impl<'w, T: TokenWrite> ObjectState<'w, T> {
    pub(crate) fn new(writer: &'w mut Writer<T>) -> Self {
        Self {
            writer,
            has_items: false,
        }
    }

    /// Writes a property name and returns the writer for its value.
    pub fn property(&mut self, name: &str) -> &mut Writer<T> {
        if self.has_items {
            self.writer.emit(|t| t.delimiter(b','));
        }
        self.has_items = true;
        self.writer.emit(|t| t.property_name(name));
        self.writer
    }

    pub fn null(&mut self, name: &str) {
        self.property(name).null();
    }

    pub fn bool(&mut self, name: &str, value: bool) {
        self.property(name).bool(value);
    }

    pub fn int(&mut self, name: &str, value: i64) {
        self.property(name).int(value);
    }

    pub fn float(&mut self, name: &str, value: f64) {
        self.property(name).float(value);
    }

    pub fn string(&mut self, name: &str, value: &str) {
        self.property(name).string(value);
    }

    pub fn raw(&mut self, name: &str, json: impl AsRef<[u8]>) {
        self.property(name).raw(json);
    }

    pub fn opt_bool(&mut self, name: &str, value: Option<bool>) {
        if let Some(v) = value {
            self.bool(name, v);
        }
    }

    pub fn opt_int(&mut self, name: &str, value: Option<i64>) {
        if let Some(v) = value {
            self.int(name, v);
        }
    }

    pub fn opt_float(&mut self, name: &str, value: Option<f64>) {
        if let Some(v) = value {
            self.float(name, v);
        }
    }

    pub fn opt_string(&mut self, name: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.string(name, v);
        }
    }

    /// Starts a nested array property.
    pub fn array(&mut self, name: &str) -> ArrayState<'_, T> {
        self.property(name).array()
    }

    /// Starts a nested object property.
    pub fn object(&mut self, name: &str) -> ObjectState<'_, T> {
        self.property(name).object()
    }

    /// Writes the closing `}`.
    pub fn end(self) {
        self.writer.emit(|t| t.delimiter(b'}'));
    }
}
