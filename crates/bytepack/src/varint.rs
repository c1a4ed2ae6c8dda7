//! Variable-length integer helpers shared by `Writer` and `Reader`.
//!
//! Unsigned values use base-128 groups, least-significant group first, with
//! the high bit of each byte marking continuation. Signed values are folded
//! onto the unsigned domain with the zigzag mapping first, so small
//! magnitudes of either sign stay short.

/// Longest encoding of a `u64`: nine full 7-bit groups plus one final bit.
pub(crate) const MAX_LEN: usize = 10;

/// Encode `v` into `buf`, returning the number of bytes used.
pub(crate) fn put_uvarint(buf: &mut [u8; MAX_LEN], mut v: u64) -> usize {
    let mut i = 0;
    while v >= 0x80 {
        buf[i] = v as u8 | 0x80;
        v >>= 7;
        i += 1;
    }
    buf[i] = v as u8;
    i + 1
}

/// Fold a signed value onto the unsigned domain:
/// `0, -1, 1, -2, 2, ...` becomes `0, 1, 2, 3, 4, ...`.
pub(crate) fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag`].
pub(crate) fn unzigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}
