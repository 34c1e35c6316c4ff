use bytes::BufMut;

use crate::error::{Result, WireError};

/// Bounds-checked reader over a borrowed byte slice.
///
/// Every multi-byte read is big-endian. Reading past the end fails with
/// [`WireError::Truncated`]; the cursor position is unchanged on failure.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True when every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail with [`WireError::TrailingGarbage`] unless the cursor is exhausted.
    pub fn finish(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(WireError::TrailingGarbage { remaining }),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(WireError::Truncated {
                needed: n - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a 48-bit unsigned integer, zero-extended to 64 bits.
    pub fn read_u48(&mut self) -> Result<u64> {
        let b = self.take(6)?;
        let mut out = [0u8; 8];
        out[2..8].copy_from_slice(b);
        Ok(u64::from_be_bytes(out))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }
}

/// Largest value a 48-bit wire field can carry.
pub const U48_MAX: u64 = (1 << 48) - 1;

/// Write-side companion to [`Cursor`]: the odd widths [`BufMut`] lacks.
///
/// Callers validate ranges before writing; encoders are infallible once a
/// message has passed its own invariants.
pub trait WireWrite: BufMut {
    /// Write the low 48 bits of `value` big-endian.
    fn put_u48(&mut self, value: u64) {
        debug_assert!(value <= U48_MAX);
        self.put_slice(&value.to_be_bytes()[2..8]);
    }
}

impl<T: BufMut + ?Sized> WireWrite for T {}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    #[test]
    fn reads_are_big_endian() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u16().unwrap(), 0x1234);
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u32().unwrap(), 0x1234_5678);
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u64().unwrap(), 0x1234_5678_9ABC_DEF0);
    }

    #[test]
    fn u48_zero_extends() {
        let data = [0x00, 0x00, 0x00, 0x00, 0x00, 0x7B];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u48().unwrap(), 123);
        assert!(cur.is_empty());

        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u48().unwrap(), U48_MAX);
    }

    #[test]
    fn signed_reads() {
        let mut cur = Cursor::new(&[0xFF, 0xC3, 0xEB]);
        assert_eq!(cur.read_i8().unwrap(), -1);
        assert_eq!(cur.read_i16().unwrap(), -15381);
    }

    #[test]
    fn f32_roundtrip() {
        let bits = 51.78207_f32.to_be_bytes();
        let mut cur = Cursor::new(&bits);
        assert_eq!(cur.read_f32().unwrap(), 51.78207);
    }

    #[test]
    fn truncated_read_reports_missing_bytes() {
        let mut cur = Cursor::new(&[0x01, 0x02]);
        let err = cur.read_u32().unwrap_err();
        assert_eq!(err, WireError::Truncated { needed: 2 });
        // failed read consumes nothing
        assert_eq!(cur.position(), 0);
        assert_eq!(cur.read_u16().unwrap(), 0x0102);
    }

    #[test]
    fn finish_flags_trailing_bytes() {
        let mut cur = Cursor::new(&[0x01, 0x02, 0x03]);
        cur.read_u8().unwrap();
        assert_eq!(
            cur.finish().unwrap_err(),
            WireError::TrailingGarbage { remaining: 2 }
        );
        cur.read_u16().unwrap();
        assert!(cur.finish().is_ok());
    }

    #[test]
    fn put_u48_writes_six_bytes() {
        let mut buf = BytesMut::new();
        buf.put_u48(123);
        assert_eq!(buf.as_ref(), &[0x00, 0x00, 0x00, 0x00, 0x00, 0x7B]);

        let mut buf = BytesMut::new();
        buf.put_u48(U48_MAX);
        assert_eq!(buf.as_ref(), &[0xFF; 6]);
    }

    #[test]
    fn read_bytes_borrows_from_input() {
        let data = [1, 2, 3, 4, 5];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert_eq!(cur.remaining(), 2);
        assert!(matches!(
            cur.read_bytes(3),
            Err(WireError::Truncated { needed: 1 })
        ));
    }
}
