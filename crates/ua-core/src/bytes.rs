//! Little-endian field reader over a fixed-size blob.

use crate::error::DecodeError;

/// Sequential little-endian reader used by every layout decoder.
pub(crate) struct LeReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> LeReader<'a> {
    /// Creates a reader, rejecting blobs that are not exactly `expected` bytes.
    pub(crate) const fn exact(bytes: &'a [u8], expected: usize) -> Result<Self, DecodeError> {
        if bytes.len() != expected {
            return Err(DecodeError::Length {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, offset: 0 })
    }

    /// Borrows the next `len` bytes.
    pub(crate) fn slice(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let truncated = DecodeError::Truncated {
            field,
            offset: self.offset,
        };
        let end = self.offset.checked_add(len).ok_or_else(|| truncated.clone())?;
        let slice = self.bytes.get(self.offset..end).ok_or(truncated)?;
        self.offset = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let offset = self.offset;
        let slice = self.slice(N, field)?;
        <[u8; N]>::try_from(slice).map_err(|_| DecodeError::Truncated { field, offset })
    }

    pub(crate) fn i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        self.array::<4>(field).map(i32::from_le_bytes)
    }

    pub(crate) fn i64(&mut self, field: &'static str) -> Result<i64, DecodeError> {
        self.array::<8>(field).map(i64::from_le_bytes)
    }

    pub(crate) fn f32(&mut self, field: &'static str) -> Result<f32, DecodeError> {
        self.array::<4>(field).map(f32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_rejects_wrong_length() {
        let err = LeReader::exact(&[0u8; 3], 4).err().unwrap();
        assert_eq!(
            err,
            DecodeError::Length {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn reads_fields_in_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-2i32).to_le_bytes());
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&0x0102_0304_0506_0708i64.to_le_bytes());

        let mut reader = LeReader::exact(&bytes, 16).unwrap();
        assert_eq!(reader.i32("a").unwrap(), -2);
        assert!((reader.f32("b").unwrap() - 1.5).abs() < f32::EPSILON);
        assert_eq!(reader.i64("c").unwrap(), 0x0102_0304_0506_0708);
        assert!(reader.i32("d").is_err());
    }

    #[test]
    fn read_past_end_is_truncated() {
        let bytes = [0u8; 4];
        let mut reader = LeReader::exact(&bytes, 4).unwrap();
        reader.i32("first").unwrap();
        let err = reader.i32("second").unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                field: "second",
                offset: 4
            }
        );
    }
}
