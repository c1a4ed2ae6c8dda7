//! `Reader` — the buffered decoder half of the codec.

use std::io;

use crate::error::{PackError, StreamState};
use crate::varint;

const DEFAULT_CAPACITY: usize = 4096;
/// Smallest usable lookahead window; the widest fixed field is 8 bytes.
const MIN_CAPACITY: usize = 16;
/// Length prefixes are untrusted, so `read_bytes` preallocates at most this
/// much and grows only as real bytes arrive.
const PREALLOC_LIMIT: u64 = 4096;

/// Buffered binary decoder over an [`io::Read`] source.
///
/// Bytes are pulled through a fixed lookahead window; `x` and `end` bound
/// the unread span. The first failure is latched: every later operation
/// returns the same error and nothing further is consumed, buffered bytes
/// included. Reading past the last value yields
/// [`PackError::EndOfStream`](crate::PackError::EndOfStream), the ordinary
/// way a consumer discovers the end of a well-formed stream.
///
/// ```
/// use bytepack::Reader;
///
/// # fn main() -> Result<(), bytepack::PackError> {
/// let mut r = Reader::new(&[0x2a, 0x03, b'h', b'e', b'y'][..]);
/// assert_eq!(r.read_u8()?, 42);
/// assert_eq!(r.read_string()?, "hey");
/// assert!(r.read_byte().unwrap_err().is_end_of_stream());
/// # Ok(())
/// # }
/// ```
pub struct Reader<R: io::Read> {
    source: R,
    buf: Vec<u8>,
    x: usize,
    end: usize,
    state: StreamState,
}

impl<R: io::Read> Reader<R> {
    /// Reader with the default 4 KiB lookahead window.
    pub fn new(source: R) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, source)
    }

    /// Reader with an explicit window size, clamped to a small minimum so
    /// every fixed-width field fits.
    pub fn with_capacity(capacity: usize, source: R) -> Self {
        Self {
            source,
            buf: vec![0; capacity.max(MIN_CAPACITY)],
            x: 0,
            end: 0,
            state: StreamState::Active,
        }
    }

    /// First error this reader hit, if any.
    pub fn error(&self) -> Option<&PackError> {
        self.state.error()
    }

    /// Number of lookahead bytes currently staged.
    pub fn buffered(&self) -> usize {
        self.end - self.x
    }

    /// Returns a shared reference to the source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Returns a mutable reference to the source.
    ///
    /// Reading from the source directly skips bytes already staged in the
    /// lookahead window.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Make at least `n` contiguous unread bytes available at the cursor,
    /// compacting the window and pulling from the source as needed.
    ///
    /// A source read of zero bytes while more are needed is the end of the
    /// stream; `ErrorKind::Interrupted` restarts the read; anything else is
    /// a transport error. End-of-stream and transport errors latch.
    fn fill(&mut self, n: usize) -> Result<(), PackError> {
        self.state.check()?;
        debug_assert!(n <= self.buf.len());
        if self.end - self.x >= n {
            return Ok(());
        }
        if self.x > 0 {
            self.buf.copy_within(self.x..self.end, 0);
            self.end -= self.x;
            self.x = 0;
        }
        while self.end < n {
            match self.source.read(&mut self.buf[self.end..]) {
                Ok(0) => return Err(self.state.fail(PackError::EndOfStream)),
                Ok(read) => self.end += read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(self.state.fail(err.into())),
            }
        }
        Ok(())
    }

    #[inline]
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], PackError> {
        self.fill(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    /// Read exactly `len` bytes, draining staged lookahead first and then
    /// refilling the window chunk by chunk. A stream that ends before the
    /// promised length is exhaustion, not corruption.
    fn read_exact_vec(&mut self, len: u64) -> Result<Vec<u8>, PackError> {
        let mut out = Vec::with_capacity(len.min(PREALLOC_LIMIT) as usize);
        let mut remaining = len;
        while remaining > 0 {
            if self.x == self.end {
                self.fill(1)?;
            }
            let take = ((self.end - self.x) as u64).min(remaining) as usize;
            out.extend_from_slice(&self.buf[self.x..self.x + take]);
            self.x += take;
            remaining -= take as u64;
        }
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, PackError> {
        Ok(self.take_array::<1>()?[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, PackError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, PackError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, PackError> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8, PackError> {
        Ok(self.take_array::<1>()?[0] as i8)
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16, PackError> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, PackError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64, PackError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, PackError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    #[inline]
    pub fn read_f64(&mut self) -> Result<f64, PackError> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Any nonzero byte decodes as `true`; the writer only emits 0 and 1.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, PackError> {
        Ok(self.read_u8()? != 0)
    }

    /// One raw byte, no framing.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8, PackError> {
        self.read_u8()
    }

    /// Base-128 unsigned varint. A stream ending mid-value is exhaustion;
    /// an encoding that needs more than 64 bits is rejected.
    pub fn read_uvarint(&mut self) -> Result<u64, PackError> {
        let mut v: u64 = 0;
        let mut s: u32 = 0;
        for i in 0..varint::MAX_LEN {
            let b = self.read_u8()?;
            if b < 0x80 {
                if i == varint::MAX_LEN - 1 && b > 1 {
                    return Err(self.state.fail(PackError::VarintOverflow));
                }
                return Ok(v | (u64::from(b) << s));
            }
            v |= u64::from(b & 0x7f) << s;
            s += 7;
        }
        Err(self.state.fail(PackError::VarintOverflow))
    }

    /// Zigzag-mapped signed varint.
    pub fn read_varint(&mut self) -> Result<i64, PackError> {
        Ok(varint::unzigzag(self.read_uvarint()?))
    }

    /// Byte-length uvarint prefix, then the raw bytes.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, PackError> {
        let len = self.read_uvarint()?;
        self.read_exact_vec(len)
    }

    /// Byte-length uvarint prefix, then UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String, PackError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|_| self.state.fail(PackError::InvalidUtf8))
    }
}
