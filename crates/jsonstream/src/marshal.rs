//! One-shot entry points and the traits that plug caller types into them.

use alloc::{borrow::Cow, boxed::Box, string::String, vec::Vec};

use crate::{
    backend::{TokenRead, TokenWrite},
    error::Result,
    reader::Reader,
    writer::Writer,
};

/// Types that can decode themselves from a [`Reader`].
///
/// Implementations read exactly one JSON value. Returning an error is
/// optional: a failure latched on the reader is reported by
/// [`from_slice`] either way.
///
/// ```
/// use jsonstream::{Reader, Readable, Result, TokenRead, from_slice};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl<'a> Readable<'a> for Point {
///     fn read_from<T: TokenRead<'a>>(r: &mut Reader<'a, T>) -> Result<Self> {
///         let mut p = Point { x: 0, y: 0 };
///         let mut obj = r.object()?.with_required_properties(&["x", "y"]);
///         while let Some((name, r)) = obj.next() {
///             match name {
///                 "x" => p.x = r.int()?,
///                 "y" => p.y = r.int()?,
///                 _ => {}
///             }
///         }
///         Ok(p)
///     }
/// }
///
/// assert_eq!(from_slice::<Point>(br#"{"y": 2, "x": 1}"#), Ok(Point { x: 1, y: 2 }));
/// assert!(from_slice::<Point>(br#"{"x": 1}"#).is_err());
/// ```
pub trait Readable<'a>: Sized {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self>;
}

/// Types that can encode themselves to a [`Writer`].
///
/// Implementations write exactly one JSON value.
pub trait Writable {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>);
}

/// Decodes a complete document with a caller-supplied routine.
///
/// Fails if the routine left the reader in a failed state, or if anything
/// other than whitespace follows the value.
///
/// ```
/// use jsonstream::read_json;
///
/// let n = read_json(b" 42 ", |r| r.int()).unwrap();
/// assert_eq!(n.unwrap(), 42);
/// assert!(read_json(b"42 43", |r| r.int()).is_err());
/// ```
pub fn read_json<'a, V>(data: &'a [u8], read: impl FnOnce(&mut Reader<'a>) -> V) -> Result<V> {
    let mut reader = Reader::new(data);
    let value = read(&mut reader);
    reader.require_eof()?;
    Ok(value)
}

/// Encodes a document with a caller-supplied routine and returns the bytes.
///
/// ```
/// use jsonstream::write_json;
///
/// let out = write_json(|w| {
///     let mut arr = w.array();
///     arr.int(1);
///     arr.string("two");
///     arr.end();
/// });
/// assert_eq!(out.unwrap(), br#"[1,"two"]"#);
/// ```
pub fn write_json(write: impl FnOnce(&mut Writer)) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    write(&mut writer);
    writer.into_bytes()
}

/// Decodes a complete document into a [`Readable`] type.
pub fn from_slice<'a, V: Readable<'a>>(data: &'a [u8]) -> Result<V> {
    let mut reader = Reader::new(data);
    let value = V::read_from(&mut reader);
    let value = reader.latch(value)?;
    reader.require_eof()?;
    Ok(value)
}

/// Encodes a [`Writable`] value as a complete document.
pub fn to_vec<V: Writable + ?Sized>(value: &V) -> Result<Vec<u8>> {
    write_json(|w| value.write_to(w))
}

impl<'a> Readable<'a> for bool {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        reader.bool()
    }
}

impl<'a> Readable<'a> for i64 {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        reader.int()
    }
}

impl<'a> Readable<'a> for f64 {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        reader.float()
    }
}

impl<'a> Readable<'a> for String {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        reader.string().map(Cow::into_owned)
    }
}

impl<'a> Readable<'a> for Cow<'a, str> {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        reader.string()
    }
}

impl<'a, V: Readable<'a>> Readable<'a> for Option<V> {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        if reader.try_null()? {
            return Ok(None);
        }
        V::read_from(reader).map(Some)
    }
}

impl<'a, V: Readable<'a>> Readable<'a> for Vec<V> {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        let mut out = Vec::new();
        let mut arr = reader.array()?;
        while let Some(r) = arr.next() {
            out.push(V::read_from(r)?);
        }
        Ok(out)
    }
}

impl<'a, V: Readable<'a>> Readable<'a> for Box<V> {
    fn read_from<T: TokenRead<'a>>(reader: &mut Reader<'a, T>) -> Result<Self> {
        V::read_from(reader).map(Box::new)
    }
}

impl Writable for bool {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        writer.bool(*self);
    }
}

impl Writable for i64 {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        writer.int(*self);
    }
}

impl Writable for f64 {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        writer.float(*self);
    }
}

impl Writable for str {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        writer.string(self);
    }
}

impl Writable for String {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        writer.string(self);
    }
}

impl Writable for Cow<'_, str> {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        writer.string(self);
    }
}

impl<V: Writable> Writable for Option<V> {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        match self {
            Some(v) => v.write_to(writer),
            None => writer.null(),
        }
    }
}

impl<V: Writable> Writable for [V] {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        let mut arr = writer.array();
        for v in self {
            v.write_to(arr.next());
        }
        arr.end();
    }
}

impl<V: Writable> Writable for Vec<V> {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        self.as_slice().write_to(writer);
    }
}

impl<V: Writable + ?Sized> Writable for &V {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        (**self).write_to(writer);
    }
}

impl<V: Writable + ?Sized> Writable for Box<V> {
    fn write_to<T: TokenWrite>(&self, writer: &mut Writer<T>) {
        (**self).write_to(writer);
    }
}
