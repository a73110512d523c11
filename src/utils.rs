//! Small byte-buffer helpers shared by the driver and the unit tests.
//! All conversions go through `bytemuck`, so there is no `unsafe` here.

use bytemuck::Pod;

use crate::error::PlanepackError;

/// Converts a slice of primitive elements into a `Vec<u8>` in the host's
/// native byte order. This involves a copy.
pub fn typed_slice_to_bytes<T: Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

/// Reinterprets a byte buffer as an owned vector of elements of type `T`.
/// Alignment of the source buffer does not matter; the bytes are copied.
pub fn bytes_to_typed_vec<T: Pod>(bytes: &[u8]) -> Result<Vec<T>, PlanepackError> {
    let size = std::mem::size_of::<T>();
    if bytes.len() % size != 0 {
        return Err(PlanepackError::BufferMismatch(size, bytes.len()));
    }
    Ok(bytemuck::pod_collect_to_vec(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_roundtrip_u16() {
        let original: Vec<u16> = vec![0x1234, 0xABCD, 7];
        let bytes = typed_slice_to_bytes(&original);
        assert_eq!(bytes.len(), 6);
        let back: Vec<u16> = bytes_to_typed_vec(&bytes).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_unaligned_source_buffer() {
        // A byte slice carved out mid-buffer need not be aligned for u32;
        // the conversion copies, so it must still succeed.
        let backing: Vec<u8> = (0..16).collect();
        let unaligned = &backing[1..13];
        let values: Vec<u32> = bytes_to_typed_vec(unaligned).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].to_ne_bytes(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_length_mismatch_error() {
        let bytes = vec![1u8, 2, 3];
        let result = bytes_to_typed_vec::<u16>(&bytes);
        assert!(matches!(result, Err(PlanepackError::BufferMismatch(2, 3))));
    }
}
