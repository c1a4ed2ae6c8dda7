//! `Writer` — the buffered encoder half of the codec.

use std::io;

use crate::error::{PackError, StreamState};
use crate::varint;

/// Arena length at which staged bytes are delivered to the sink.
const DEFAULT_CAPACITY: usize = 4096;

/// Buffered binary encoder over an [`io::Write`] sink.
///
/// Encoded values are staged in a growable arena; the sink is touched only
/// when the arena reaches its capacity threshold or [`flush`](Writer::flush)
/// is called. The first delivery failure is latched: every later operation
/// returns the same error and nothing further reaches the sink. Staged bytes
/// are lost if the writer is dropped without `flush` or `into_inner`.
///
/// ```
/// use bytepack::Writer;
///
/// # fn main() -> Result<(), bytepack::PackError> {
/// let mut w = Writer::new(Vec::new());
/// w.write_u32(1999)?;
/// w.write_str("pojo")?;
/// let wire = w.into_inner()?;
/// assert_eq!(wire, [0xcf, 0x07, 0x00, 0x00, 0x04, b'p', b'o', b'j', b'o']);
/// # Ok(())
/// # }
/// ```
pub struct Writer<W: io::Write> {
    sink: W,
    buf: Vec<u8>,
    capacity: usize,
    state: StreamState,
}

impl<W: io::Write> Writer<W> {
    /// Writer with the default 4 KiB arena threshold.
    pub fn new(sink: W) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, sink)
    }

    /// Writer with an explicit arena threshold.
    ///
    /// A `capacity` of zero selects direct mode: every operation delivers
    /// its bytes to the sink immediately and nothing is ever staged.
    pub fn with_capacity(capacity: usize, sink: W) -> Self {
        Self {
            sink,
            buf: Vec::with_capacity(capacity),
            capacity,
            state: StreamState::Active,
        }
    }

    /// First error this writer hit, if any.
    pub fn error(&self) -> Option<&PackError> {
        self.state.error()
    }

    /// Number of bytes staged in the arena and not yet delivered.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Returns a shared reference to the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    ///
    /// Writing to the sink directly does not see bytes still staged in the
    /// arena.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Deliver staged bytes, then hand the sink back. The sink is dropped
    /// if the final delivery fails.
    pub fn into_inner(mut self) -> Result<W, PackError> {
        self.flush()?;
        Ok(self.sink)
    }

    /// Deliver everything staged in the arena to the sink.
    ///
    /// Delivery ends at the sink's `write_all`; calling the sink's own
    /// `flush` (or anything further down the transport) is the caller's
    /// business. A flush with an empty arena succeeds without touching the
    /// sink.
    pub fn flush(&mut self) -> Result<(), PackError> {
        self.state.check()?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<(), PackError> {
        if self.buf.is_empty() {
            return Ok(());
        }
        match self.sink.write_all(&self.buf) {
            Ok(()) => {
                self.buf.clear();
                Ok(())
            }
            Err(err) => Err(self.state.fail(err.into())),
        }
    }

    /// Stage raw bytes, delivering once the arena reaches the threshold.
    fn push(&mut self, bytes: &[u8]) -> Result<(), PackError> {
        self.state.check()?;
        self.buf.extend_from_slice(bytes);
        if self.buf.len() >= self.capacity {
            self.flush_buf()?;
        }
        Ok(())
    }

    #[inline]
    pub fn write_u8(&mut self, v: u8) -> Result<(), PackError> {
        self.push(&[v])
    }

    #[inline]
    pub fn write_u16(&mut self, v: u16) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_u32(&mut self, v: u32) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_u64(&mut self, v: u64) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_i8(&mut self, v: i8) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_i16(&mut self, v: i16) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_i32(&mut self, v: i32) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_i64(&mut self, v: i64) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_f32(&mut self, v: f32) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    #[inline]
    pub fn write_f64(&mut self, v: f64) -> Result<(), PackError> {
        self.push(&v.to_le_bytes())
    }

    /// Canonical bool byte: `0x01` for true, `0x00` for false.
    #[inline]
    pub fn write_bool(&mut self, v: bool) -> Result<(), PackError> {
        self.push(&[v as u8])
    }

    /// One raw byte, no framing.
    #[inline]
    pub fn write_byte(&mut self, v: u8) -> Result<(), PackError> {
        self.push(&[v])
    }

    pub fn write_uvarint(&mut self, v: u64) -> Result<(), PackError> {
        let mut tmp = [0u8; varint::MAX_LEN];
        let n = varint::put_uvarint(&mut tmp, v);
        self.push(&tmp[..n])
    }

    /// Zigzag-mapped signed varint.
    pub fn write_varint(&mut self, v: i64) -> Result<(), PackError> {
        self.write_uvarint(varint::zigzag(v))
    }

    /// Byte-length uvarint prefix, then the raw bytes.
    pub fn write_bytes(&mut self, v: &[u8]) -> Result<(), PackError> {
        self.write_uvarint(v.len() as u64)?;
        self.push(v)
    }

    /// Byte-length uvarint prefix, then the UTF-8 bytes.
    pub fn write_str(&mut self, v: &str) -> Result<(), PackError> {
        self.write_uvarint(v.len() as u64)?;
        self.push(v.as_bytes())
    }
}
