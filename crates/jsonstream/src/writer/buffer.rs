use alloc::vec::Vec;
use core::fmt;

use crate::{
    backend::Sink,
    error::{Error, ExternalError, Result},
};

/// Output buffer of a [`TokenWriter`](super::TokenWriter).
///
/// Without a sink it simply accumulates the whole document. With a sink, the
/// buffered bytes are handed over and cleared whenever a write leaves at
/// least `threshold` bytes buffered, and on [`flush`](Self::flush).
#[derive(Debug)]
pub(crate) struct StreamBuffer<S> {
    bytes: Vec<u8>,
    sink: Option<S>,
    threshold: usize,
}

impl<S: Sink> StreamBuffer<S> {
    pub(crate) fn in_memory() -> Self {
        Self {
            bytes: Vec::new(),
            sink: None,
            threshold: 0,
        }
    }

    pub(crate) fn streaming(sink: S, threshold: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(threshold),
            sink: Some(sink),
            threshold,
        }
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes.extend_from_slice(bytes);
        self.maybe_flush()
    }

    /// Appends the `Display` form of `value` as a single write.
    pub(crate) fn write_display(&mut self, value: impl fmt::Display) -> Result<()> {
        use fmt::Write as _;
        write!(Appender(&mut self.bytes), "{value}").map_err(|fmt::Error| {
            Error::msg("a formatting trait implementation returned an error")
        })?;
        self.maybe_flush()
    }

    fn maybe_flush(&mut self) -> Result<()> {
        if self.sink.is_some() && self.bytes.len() >= self.threshold {
            self.flush()
        } else {
            Ok(())
        }
    }

    pub(crate) fn flush(&mut self) -> Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        if self.bytes.is_empty() {
            return Ok(());
        }
        log::trace!("flushing {} bytes to sink", self.bytes.len());
        sink.write_all(&self.bytes)
            .map_err(|e| Error::Sink(ExternalError::new(e)))?;
        self.bytes.clear();
        Ok(())
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

struct Appender<'b>(&'b mut Vec<u8>);

impl fmt::Write for Appender<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
