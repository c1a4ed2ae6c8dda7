//! Shared helpers for the integration tests: failing transports and a
//! seeded generator covering every wire kind.
#![allow(dead_code)]

use std::io;

use bytepack::{PackError, Reader, Writer};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Sink whose every delivery fails, standing in for a dead transport.
/// `calls` counts how often the codec actually touched it.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub calls: usize,
}

impl io::Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "transport down"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink accepting at most `limit` bytes per call and dying after
/// `fail_after` accepting calls, so one delivery can end partway through.
pub struct ShortSink {
    pub accepted: Vec<u8>,
    pub calls: usize,
    limit: usize,
    fail_after: usize,
}

impl ShortSink {
    pub fn new(limit: usize, fail_after: usize) -> Self {
        Self {
            accepted: Vec::new(),
            calls: 0,
            limit,
            fail_after,
        }
    }
}

impl io::Write for ShortSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls > self.fail_after {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "transport down"));
        }
        let take = buf.len().min(self.limit);
        self.accepted.extend_from_slice(&buf[..take]);
        Ok(take)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Source whose every read fails.
#[derive(Default)]
pub struct FailingSource {
    pub calls: usize,
}

impl io::Read for FailingSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "transport down"))
    }
}

pub fn rng_from_seed(seed: u64) -> Xoshiro256StarStar {
    Xoshiro256StarStar::seed_from_u64(seed)
}

/// Lowercase ASCII string, shorter than 2 KiB.
pub fn random_ascii(rng: &mut Xoshiro256StarStar) -> String {
    let len = rng.gen_range(0..2048);
    (0..len).map(|_| char::from(b'a' + rng.gen_range(0..26))).collect()
}

/// Arbitrary bytes, shorter than 2 KiB.
pub fn random_blob(rng: &mut Xoshiro256StarStar) -> Vec<u8> {
    let len = rng.gen_range(0..2048);
    (0..len).map(|_| rng.gen()).collect()
}

/// One randomly chosen value of one supported wire kind.
///
/// Floats are drawn from `[0, 1)` so derived equality stays meaningful
/// (no NaN); exact bit patterns are pinned elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Byte(u8),
    Uvarint(u64),
    Varint(i64),
    Bytes(Vec<u8>),
    Str(String),
}

impl Sample {
    pub fn random(rng: &mut Xoshiro256StarStar) -> Self {
        match rng.gen_range(0..16) {
            0 => Sample::I8(rng.gen()),
            1 => Sample::I16(rng.gen()),
            2 => Sample::I32(rng.gen()),
            3 => Sample::I64(rng.gen()),
            4 => Sample::U8(rng.gen()),
            5 => Sample::U16(rng.gen()),
            6 => Sample::U32(rng.gen()),
            7 => Sample::U64(rng.gen()),
            8 => Sample::F32(rng.gen()),
            9 => Sample::F64(rng.gen()),
            10 => Sample::Bool(rng.gen()),
            11 => Sample::Byte(rng.gen()),
            12 => Sample::Uvarint(rng.gen()),
            13 => Sample::Varint(rng.gen()),
            14 => Sample::Bytes(random_blob(rng)),
            _ => Sample::Str(random_ascii(rng)),
        }
    }

    pub fn write_to<W: io::Write>(&self, w: &mut Writer<W>) -> Result<(), PackError> {
        match self {
            Sample::I8(v) => w.write_i8(*v),
            Sample::I16(v) => w.write_i16(*v),
            Sample::I32(v) => w.write_i32(*v),
            Sample::I64(v) => w.write_i64(*v),
            Sample::U8(v) => w.write_u8(*v),
            Sample::U16(v) => w.write_u16(*v),
            Sample::U32(v) => w.write_u32(*v),
            Sample::U64(v) => w.write_u64(*v),
            Sample::F32(v) => w.write_f32(*v),
            Sample::F64(v) => w.write_f64(*v),
            Sample::Bool(v) => w.write_bool(*v),
            Sample::Byte(v) => w.write_byte(*v),
            Sample::Uvarint(v) => w.write_uvarint(*v),
            Sample::Varint(v) => w.write_varint(*v),
            Sample::Bytes(v) => w.write_bytes(v),
            Sample::Str(v) => w.write_str(v),
        }
    }

    /// Read the next value as the same kind as `self`.
    pub fn read_back<R: io::Read>(&self, r: &mut Reader<R>) -> Result<Sample, PackError> {
        Ok(match self {
            Sample::I8(_) => Sample::I8(r.read_i8()?),
            Sample::I16(_) => Sample::I16(r.read_i16()?),
            Sample::I32(_) => Sample::I32(r.read_i32()?),
            Sample::I64(_) => Sample::I64(r.read_i64()?),
            Sample::U8(_) => Sample::U8(r.read_u8()?),
            Sample::U16(_) => Sample::U16(r.read_u16()?),
            Sample::U32(_) => Sample::U32(r.read_u32()?),
            Sample::U64(_) => Sample::U64(r.read_u64()?),
            Sample::F32(_) => Sample::F32(r.read_f32()?),
            Sample::F64(_) => Sample::F64(r.read_f64()?),
            Sample::Bool(_) => Sample::Bool(r.read_bool()?),
            Sample::Byte(_) => Sample::Byte(r.read_byte()?),
            Sample::Uvarint(_) => Sample::Uvarint(r.read_uvarint()?),
            Sample::Varint(_) => Sample::Varint(r.read_varint()?),
            Sample::Bytes(_) => Sample::Bytes(r.read_bytes()?),
            Sample::Str(_) => Sample::Str(r.read_string()?),
        })
    }
}
