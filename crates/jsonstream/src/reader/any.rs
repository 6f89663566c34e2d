use alloc::borrow::Cow;

use super::{ArrayState, ObjectState, TokenReader};
use crate::kind::ValueKind;

/// A value of any kind, as returned by [`Reader::any`](super::Reader::any).
///
/// Arrays and objects come back already opened, ready to be walked.
pub enum AnyValue<'r, 'a, T = TokenReader<'a>> {
    Null,
    Bool(bool),
    Number(f64),
    String(Cow<'a, str>),
    Array(ArrayState<'r, 'a, T>),
    Object(ObjectState<'r, 'a, T>),
}

impl<T> AnyValue<'_, '_, T> {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }
}
