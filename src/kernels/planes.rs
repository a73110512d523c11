//! Plane de-interleaving: drives one encoder instance per plane over a flat,
//! interleaved input buffer, and re-interleaves plane streams on decode.
//!
//! A plane is the strided sub-stream `input[p], input[p + N], input[p + 2N],
//! ...` for plane index `p` in `[0, N)`. Planes are encoded independently, in
//! increasing index order, and concatenated; a single zero-valued terminator
//! element follows each plane's token stream. Ordering is a correctness
//! requirement of the terminator framing, so there is no parallelism here.

use log::trace;

use crate::config::Endianness;
use crate::error::PlanepackError;
use crate::kernels::control::Element;
use crate::kernels::rle::{decode_plane, RleEncoder};

//==================================================================================
// 1. Encode
//==================================================================================

/// Encodes `input` as `planes` independent strided sub-streams, appending the
/// concatenated token streams (each zero-terminated) to `out`.
///
/// `planes == 1` degenerates to single-stream encoding with one terminator.
/// An empty input produces exactly `planes` terminator elements.
pub fn encode_planes<T: Element>(
    input: &[T],
    planes: usize,
    endian: Endianness,
    out: &mut Vec<u8>,
) -> Result<(), PlanepackError> {
    if planes < 1 {
        return Err(PlanepackError::InvalidPlaneCount(planes));
    }

    for p in 0..planes {
        trace!("encoding plane {} of {}", p, planes);

        // The encoder is unaware of planes; the stride is handled here.
        let mut enc = RleEncoder::new(endian, out);
        for &value in input.iter().skip(p).step_by(planes) {
            enc.add(value)?;
        }
        enc.flush()?;

        // End of plane.
        T::zero().put(endian, out);
    }

    Ok(())
}

//==================================================================================
// 2. Decode
//==================================================================================

/// Decodes a stream produced by [`encode_planes`] with the same plane count,
/// reconstructing the original element order into `out`.
///
/// Reads exactly `planes` zero-terminated token streams and re-interleaves
/// them by stride. Trailing bytes after the final terminator, or plane
/// lengths that no single interleaved input could have produced, are
/// `Decode` errors.
pub fn decode_planes<T: Element>(
    bytes: &[u8],
    planes: usize,
    endian: Endianness,
    out: &mut Vec<T>,
) -> Result<(), PlanepackError> {
    if planes < 1 {
        return Err(PlanepackError::InvalidPlaneCount(planes));
    }

    let mut pos = 0;
    let mut streams: Vec<Vec<T>> = Vec::with_capacity(planes);
    for p in 0..planes {
        trace!("decoding plane {} of {}", p, planes);
        let mut stream = Vec::new();
        decode_plane(bytes, &mut pos, endian, &mut stream)?;
        streams.push(stream);
    }

    if pos != bytes.len() {
        return Err(PlanepackError::Decode(format!(
            "{} trailing bytes after final plane terminator",
            bytes.len() - pos
        )));
    }

    let total: usize = streams.iter().map(|s| s.len()).sum();
    for (p, stream) in streams.iter().enumerate() {
        // Plane p holds the indices congruent to p mod N below `total`.
        let expected = (total + planes - 1 - p) / planes;
        if stream.len() != expected {
            return Err(PlanepackError::Decode(format!(
                "plane {} holds {} elements, expected {} for a {}-element input",
                p,
                stream.len(),
                expected,
                total
            )));
        }
    }

    out.clear();
    out.resize(total, T::zero());
    for (p, stream) in streams.iter().enumerate() {
        for (k, &value) in stream.iter().enumerate() {
            out[p + k * planes] = value;
        }
    }

    Ok(())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
