use alloc::vec::Vec;
use core::convert::Infallible;

/// Destination for the output of a streaming [`Writer`](crate::Writer).
pub trait Sink {
    type Error: core::error::Error + Send + Sync + 'static;

    /// Accepts all of `bytes` or fails.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// The sink of a writer that keeps its whole output in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSink {}

impl Sink for NoSink {
    type Error = Infallible;

    fn write_all(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> {
        match *self {}
    }
}

impl Sink for Vec<u8> {
    type Error = Infallible;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    type Error = S::Error;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(bytes)
    }
}

/// Adapts any [`std::io::Write`] into a [`Sink`].
///
/// ```
/// use jsonstream::{IoSink, Writer};
///
/// let mut out = Vec::new();
/// let mut w = Writer::streaming(IoSink(&mut out), 4);
/// w.string("hello");
/// w.flush().unwrap();
/// assert_eq!(out, br#""hello""#);
/// ```
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for IoSink<W> {
    type Error = std::io::Error;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(bytes)
    }
}
