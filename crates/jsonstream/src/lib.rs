//! A streaming JSON reader and writer that decode and encode directly between
//! bytes and caller types, with no intermediate document tree.
//!
//! - [`Reader`] pulls one value at a time from an in-memory document. The
//!   caller says which kind of value it expects; mismatches, malformed input
//!   and caller-injected failures all latch into a single sticky error.
//! - [`Writer`] pushes one value at a time into an in-memory buffer or, with
//!   [`Writer::streaming`], into a [`Sink`] whenever enough output has been
//!   buffered.
//!
//! ```
//! use jsonstream::{Reader, Writer};
//!
//! let mut r = Reader::new(br#"{"values": [1, 2, null, 4]}"#);
//! let mut sum = 0;
//! let mut obj = r.object().unwrap();
//! while let Some((name, r)) = obj.next() {
//!     if name == "values" {
//!         let mut arr = r.array().unwrap();
//!         while let Some(r) = arr.next() {
//!             sum += r.int_or_null().unwrap().unwrap_or(0);
//!         }
//!     }
//! }
//! r.require_eof().unwrap();
//!
//! let mut w = Writer::new();
//! let mut obj = w.object();
//! obj.int("sum", sum);
//! obj.end();
//! assert_eq!(w.into_bytes().unwrap(), br#"{"sum":7}"#);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod backend;
mod error;
mod kind;
mod marshal;
mod options;
pub mod reader;
pub mod writer;


#[cfg(feature = "std")]
pub use backend::IoSink;
pub use backend::{AnyToken, NoSink, Sink, TokenRead, TokenWrite};
pub use error::{
    Error, ExternalError, RequiredPropertyError, Result, SyntaxError, SyntaxErrorKind, TypeError,
};
pub use kind::ValueKind;
pub use marshal::{Readable, Writable, from_slice, read_json, to_vec, write_json};
pub use options::WriterOptions;
pub use reader::{AnyValue, Reader, TokenReader};
pub use writer::{TokenWriter, Writer};
