//! Parcel primitives: little-endian scalars, UTF-16 strings, framed blocks

use crate::error::WireError;

type WireResult<T> = std::result::Result<T, WireError>;

/// Convert a host length into an `i32` length field.
pub fn len_to_i32(len: usize) -> WireResult<i32> {
    i32::try_from(len).map_err(|_| WireError::LengthOverflow(len))
}

/// Append-only parcel writer.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish and take the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write one byte.
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Write a boolean as one byte, `0` or `1`.
    pub fn write_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    /// Write an `i16`.
    pub fn write_i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an `i32`.
    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an `i64`.
    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an `f32` as IEEE bits.
    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an `f64` as IEEE bits.
    pub fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an `i32` code-unit count followed by the UTF-16 units.
    pub fn write_string16(&mut self, s: &str) -> WireResult<()> {
        let units: Vec<u16> = s.encode_utf16().collect();
        self.write_i32(len_to_i32(units.len())?);
        for unit in units {
            self.buf.extend_from_slice(&unit.to_le_bytes());
        }
        Ok(())
    }

    /// Write an `i32` byte count followed by the UTF-8 bytes.
    pub fn write_string8(&mut self, s: &str) -> WireResult<()> {
        self.write_i32(len_to_i32(s.len())?);
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Append raw bytes with no length prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append `len, len, bytes`, the duplicated-length frame.
    pub fn write_framed(&mut self, bytes: &[u8]) -> WireResult<()> {
        let len = len_to_i32(bytes.len())?;
        self.write_i32(len);
        self.write_i32(len);
        self.write_raw(bytes);
        Ok(())
    }
}

/// Cursor over a parcel byte slice.
///
/// Every read either consumes exactly the bytes it needs or fails without
/// panicking.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    /// Start reading at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, n: usize) -> WireResult<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(WireError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let out = &self.bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> WireResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> WireResult<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> WireResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read an `i16`.
    pub fn read_i16(&mut self) -> WireResult<i16> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    /// Read an `i32`.
    pub fn read_i32(&mut self) -> WireResult<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    /// Read an `i64`.
    pub fn read_i64(&mut self) -> WireResult<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Read an `f32`.
    pub fn read_f32(&mut self) -> WireResult<f32> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    /// Read an `f64`.
    pub fn read_f64(&mut self) -> WireResult<f64> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Read a non-negative `i32` length or count.
    pub fn read_len(&mut self) -> WireResult<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| WireError::NegativeLength(len))
    }

    /// Read a UTF-16 string written by [`WireWriter::write_string16`].
    pub fn read_string16(&mut self) -> WireResult<String> {
        let count = self.read_len()?;
        let byte_len = count
            .checked_mul(2)
            .ok_or(WireError::LengthOverflow(count))?;
        let raw = self.take(byte_len)?;
        let units = raw
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .map_err(|_| WireError::InvalidUtf16)
    }

    /// Read a UTF-8 string written by [`WireWriter::write_string8`].
    pub fn read_string8(&mut self) -> WireResult<String> {
        let len = self.read_len()?;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| WireError::InvalidUtf8)
    }

    /// Read a `len, len, bytes` frame. The two lengths must agree.
    pub fn read_framed(&mut self) -> WireResult<&'a [u8]> {
        self.read_framed_limited(usize::MAX)
    }

    /// Like [`WireReader::read_framed`], rejecting frames longer than `max`.
    pub fn read_framed_limited(&mut self, max: usize) -> WireResult<&'a [u8]> {
        let declared = self.read_i32()?;
        let repeated = self.read_i32()?;
        if declared != repeated {
            return Err(WireError::LengthMismatch { declared, repeated });
        }
        let len = usize::try_from(declared).map_err(|_| WireError::NegativeLength(declared))?;
        if len > max {
            return Err(WireError::TooLarge { len, max });
        }
        self.take(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_are_little_endian() {
        let mut w = WireWriter::new();
        w.write_i32(1);
        w.write_i16(-2);
        w.write_bool(true);
        assert_eq!(w.into_bytes(), vec![1, 0, 0, 0, 0xfe, 0xff, 1]);
    }

    #[test]
    fn test_string16_round_trip() {
        let mut w = WireWriter::new();
        w.write_string16("héllo 🎉").unwrap();
        let bytes = w.into_bytes();
        let mut r = WireReader::new(&bytes);
        assert_eq!(r.read_string16().unwrap(), "héllo 🎉");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_string16_counts_code_units() {
        let mut w = WireWriter::new();
        w.write_string16("ab").unwrap();
        assert_eq!(w.into_bytes(), vec![2, 0, 0, 0, b'a', 0, b'b', 0]);
    }

    #[test]
    fn test_string8_counts_bytes() {
        let mut w = WireWriter::new();
        w.write_string8("hé").unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![3, 0, 0, 0, b'h', 0xc3, 0xa9]);
        assert_eq!(WireReader::new(&bytes).read_string8().unwrap(), "hé");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let bytes = [2, 0, 0, 0, 0xc3, 0x28];
        assert_eq!(WireReader::new(&bytes).read_string8(), Err(WireError::InvalidUtf8));
    }

    #[test]
    fn test_unpaired_surrogate_is_rejected() {
        let bytes = [1, 0, 0, 0, 0x00, 0xd8];
        let mut r = WireReader::new(&bytes);
        assert_eq!(r.read_string16(), Err(WireError::InvalidUtf16));
    }

    #[test]
    fn test_eof_reports_need() {
        let mut r = WireReader::new(&[1, 2]);
        assert_eq!(
            r.read_i32(),
            Err(WireError::UnexpectedEof {
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_framed_mismatch_and_negative() {
        let mut w = WireWriter::new();
        w.write_i32(2);
        w.write_i32(3);
        w.write_raw(&[0, 0, 0]);
        let bytes = w.into_bytes();
        assert_eq!(
            WireReader::new(&bytes).read_framed(),
            Err(WireError::LengthMismatch {
                declared: 2,
                repeated: 3
            })
        );

        let mut w = WireWriter::new();
        w.write_i32(-1);
        w.write_i32(-1);
        let bytes = w.into_bytes();
        assert_eq!(
            WireReader::new(&bytes).read_framed(),
            Err(WireError::NegativeLength(-1))
        );
    }

    #[test]
    fn test_framed_limit() {
        let mut w = WireWriter::new();
        w.write_framed(&[9; 8]).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(
            WireReader::new(&bytes).read_framed_limited(4),
            Err(WireError::TooLarge { len: 8, max: 4 })
        );
        assert_eq!(WireReader::new(&bytes).read_framed_limited(8).unwrap(), &[9; 8]);
    }
}
