//! Buffered streaming codec for primitive binary values.
//!
//! A [`Writer`] encodes values into a growable arena and delivers them to an
//! [`std::io::Write`] sink in batches; a [`Reader`] decodes values pulled
//! from an [`std::io::Read`] source through a lookahead window. Both halves
//! latch their first error: once anything fails, every later operation
//! returns that same [`PackError`] and the transport is left alone.
//!
//! Wire format, shared by both halves:
//!
//! | kind              | encoding                                          |
//! |-------------------|---------------------------------------------------|
//! | `u8`..`u64`       | fixed width, little-endian                        |
//! | `i8`..`i64`       | two's complement, fixed width, little-endian      |
//! | `f32`/`f64`       | IEEE 754 bit pattern, little-endian               |
//! | bool              | one byte, `0x01` / `0x00`                         |
//! | byte              | one raw byte, no framing                          |
//! | uvarint           | base-128, LSB group first, high bit = continue    |
//! | varint            | zigzag fold, then uvarint                         |
//! | bytes / string    | uvarint byte-length prefix, then the payload      |
//!
//! ```
//! use bytepack::{Reader, Writer};
//!
//! # fn main() -> Result<(), bytepack::PackError> {
//! let mut w = Writer::new(Vec::new());
//! w.write_varint(-3)?;
//! w.write_str("abc")?;
//! w.write_f64(0.5)?;
//! let wire = w.into_inner()?;
//!
//! let mut r = Reader::new(&wire[..]);
//! assert_eq!(r.read_varint()?, -3);
//! assert_eq!(r.read_string()?, "abc");
//! assert_eq!(r.read_f64()?, 0.5);
//! assert!(r.read_byte().unwrap_err().is_end_of_stream());
//! # Ok(())
//! # }
//! ```

mod error;
mod reader;
mod varint;
mod writer;

pub use error::PackError;
pub use reader::Reader;
pub use writer::Writer;
