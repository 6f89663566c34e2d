use super::{Reader, TokenReader};
use crate::backend::TokenRead;

/// Walks the elements of an array opened with [`Reader::array`].
///
/// Each call to [`next`](Self::next) yields the reader positioned at the
/// next element. Elements the caller does not read are skipped, as is the
/// rest of a nested container whose own state was dropped early. Once the
/// closing `]` has been consumed, or the reader fails, the state is
/// exhausted and `next` keeps returning `None`.
///
/// ```
/// use jsonstream::Reader;
///
/// let mut r = Reader::new(b"[1, [2, 3], 4]");
/// let mut arr = r.array().unwrap();
/// let first = arr.next().unwrap().int().unwrap();
/// arr.next(); // the nested array is skipped
/// let last = arr.next().unwrap().int().unwrap();
/// assert!(arr.next().is_none());
/// assert_eq!((first, last), (1, 4));
/// ```
pub struct ArrayState<'r, 'a, T = TokenReader<'a>> {
    reader: Option<&'r mut Reader<'a, T>>,
    level: usize,
}

impl<'r, 'a, T: TokenRead<'a>> ArrayState<'r, 'a, T> {
    pub(crate) fn new(reader: &'r mut Reader<'a, T>) -> Self {
        Self {
            level: reader.depth(),
            reader: Some(reader),
        }
    }

    /// Returns `false` once the array has been fully consumed or reading it
    /// failed.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.reader.is_some()
    }

    /// Advances to the next element.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut Reader<'a, T>> {
        let reader = self.reader.as_deref_mut()?;
        if reader.next_element(self.level) {
            return self.reader.as_deref_mut();
        }
        self.reader = None;
        None
    }
}
