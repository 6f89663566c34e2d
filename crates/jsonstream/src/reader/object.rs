use alloc::{borrow::Cow, string::ToString, vec, vec::Vec};

use super::{Reader, TokenReader};
use crate::{backend::TokenRead, error::RequiredPropertyError};

/// Walks the properties of an object opened with [`Reader::object`].
///
/// Each call to [`next`](Self::next) yields the property name together with
/// the reader positioned at its value. Values the caller does not read are
/// skipped.
///
/// ```
/// use jsonstream::{Error, Reader};
///
/// let mut r = Reader::new(br#"{"a": 1, "c": 3}"#);
/// let mut obj = r.object().unwrap().with_required_properties(&["a", "b", "c"]);
/// while obj.next().is_some() {}
/// let Some(Error::RequiredProperty(e)) = r.error() else { panic!() };
/// assert_eq!(e.name, "b");
/// ```
pub struct ObjectState<'r, 'a, T = TokenReader<'a>> {
    reader: Option<&'r mut Reader<'a, T>>,
    level: usize,
    name: Option<Cow<'a, str>>,
    required: &'r [&'r str],
    found: Vec<bool>,
}

impl<'r, 'a, T: TokenRead<'a>> ObjectState<'r, 'a, T> {
    pub(crate) fn new(reader: &'r mut Reader<'a, T>) -> Self {
        Self {
            level: reader.depth(),
            reader: Some(reader),
            name: None,
            required: &[],
            found: Vec::new(),
        }
    }

    /// Declares property names that must appear before the object ends. If
    /// any is missing when the closing `}` is reached, the reader fails with
    /// a [`RequiredPropertyError`] naming the first missing one.
    #[must_use]
    pub fn with_required_properties(mut self, names: &'r [&'r str]) -> Self {
        self.required = names;
        self.found = vec![false; names.len()];
        self
    }

    /// Returns `false` once the object has been fully consumed or reading it
    /// failed.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.reader.is_some()
    }

    /// The name of the property most recently returned by `next`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Advances to the next property.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&str, &mut Reader<'a, T>)> {
        let reader = self.reader.as_deref_mut()?;
        if let Some(name) = reader.next_property(self.level) {
            if let Some(i) = self.required.iter().position(|r| *r == name) {
                self.found[i] = true;
            }
            let name = self.name.insert(name);
            let reader = self.reader.as_deref_mut()?;
            return Some((&**name, reader));
        }

        self.name = None;
        if let Some(reader) = self.reader.take() {
            if reader.error.is_none() {
                let missing = self
                    .required
                    .iter()
                    .zip(&self.found)
                    .find_map(|(name, found)| (!found).then_some(*name));
                if let Some(name) = missing {
                    reader.add_error(RequiredPropertyError {
                        name: name.to_string(),
                        offset: reader.tokens.last_pos(),
                    });
                }
            }
        }
        None
    }
}
