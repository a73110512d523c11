//! The codec driver: owns the input buffer and the output sink for the
//! duration of one invocation, pads the input to an element-size boundary,
//! dispatches on the configured element width, and reports byte counts.
//!
//! The kernels below this layer never touch files; all I/O happens here.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::config::{ElementWidth, RleConfig};
use crate::error::PlanepackError;
use crate::kernels::control::Element;
use crate::kernels::planes;
use crate::utils;

//==================================================================================
// 1. The Encode Report
//==================================================================================

/// Byte-count summary of one encode invocation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    /// Size of the caller's input, before any padding.
    pub original_size: usize,
    /// Size after zero-padding to an element boundary, when padding occurred.
    /// Diagnostic only: the padding is never emitted as extra stream data.
    pub padded_size: Option<usize>,
    /// Total encoded bytes written, terminators included.
    pub encoded_size: usize,
    /// Plane count the input was split into.
    pub planes: usize,
}

//==================================================================================
// 2. Buffer-Level Entry Points
//==================================================================================

/// Encodes a byte buffer per `config`, appending the stream to `out`.
///
/// The input is never mutated; if its length is not a multiple of the element
/// width, a driver-owned copy is zero-padded up to the boundary first.
pub fn encode_bytes(
    input: &[u8],
    config: &RleConfig,
    out: &mut Vec<u8>,
) -> Result<EncodeReport, PlanepackError> {
    config.validate()?;
    debug!("encode config: {}", serde_json::to_string(config)?);

    let width = config.width.bytes();
    let mut padded_buf;
    let (data, padded_size) = if input.len() % width != 0 {
        padded_buf = input.to_vec();
        padded_buf.resize(input.len() + width - input.len() % width, 0);
        let len = padded_buf.len();
        (padded_buf.as_slice(), Some(len))
    } else {
        (input, None)
    };

    let start = out.len();
    match config.width {
        ElementWidth::W1 => encode_elements::<u8>(data, config, out)?,
        ElementWidth::W2 => encode_elements::<u16>(data, config, out)?,
        ElementWidth::W4 => encode_elements::<u32>(data, config, out)?,
    }

    Ok(EncodeReport {
        original_size: input.len(),
        padded_size,
        encoded_size: out.len() - start,
        planes: config.planes,
    })
}

/// Decodes a stream produced with the same `config`, appending the
/// reconstructed bytes to `out`.
///
/// If the original input was zero-padded to an element boundary on encode,
/// the padding bytes are part of the reconstruction; trimming them back is
/// the caller's concern, since the stream does not record the unpadded size.
pub fn decode_bytes(
    input: &[u8],
    config: &RleConfig,
    out: &mut Vec<u8>,
) -> Result<(), PlanepackError> {
    config.validate()?;

    match config.width {
        ElementWidth::W1 => decode_elements::<u8>(input, config, out),
        ElementWidth::W2 => decode_elements::<u16>(input, config, out),
        ElementWidth::W4 => decode_elements::<u32>(input, config, out),
    }
}

fn encode_elements<T: Element>(
    data: &[u8],
    config: &RleConfig,
    out: &mut Vec<u8>,
) -> Result<(), PlanepackError> {
    let elements: Vec<T> = utils::bytes_to_typed_vec(data)?;
    planes::encode_planes(&elements, config.planes, config.endianness, out)
}

fn decode_elements<T: Element>(
    input: &[u8],
    config: &RleConfig,
    out: &mut Vec<u8>,
) -> Result<(), PlanepackError> {
    let mut elements: Vec<T> = Vec::new();
    planes::decode_planes(input, config.planes, config.endianness, &mut elements)?;
    out.extend_from_slice(&utils::typed_slice_to_bytes(&elements));
    Ok(())
}

//==================================================================================
// 3. File-Level Entry Points
//==================================================================================

/// Reads `input_path` whole, encodes it per `config`, and writes the stream
/// to `output_path`. With `config.append` the sink is positioned at
/// end-of-file before encoding begins instead of being truncated.
pub fn encode_file(
    input_path: &Path,
    output_path: &Path,
    config: &RleConfig,
) -> Result<EncodeReport, PlanepackError> {
    let input = std::fs::read(input_path).map_err(|e| file_error(input_path, e))?;

    let mut encoded = Vec::new();
    let report = encode_bytes(&input, config, &mut encoded)?;

    let mut sink = open_sink(output_path, config.append)?;
    sink.write_all(&encoded)
        .map_err(|e| file_error(output_path, e))?;

    info!(
        "encoded \"{}\" ({} planes): {} -> {} bytes",
        input_path.display(),
        report.planes,
        report.original_size,
        report.encoded_size
    );
    Ok(report)
}

/// Reads an encoded stream from `input_path`, decodes it per `config`, and
/// writes the reconstructed bytes to `output_path`.
pub fn decode_file(
    input_path: &Path,
    output_path: &Path,
    config: &RleConfig,
) -> Result<(), PlanepackError> {
    let input = std::fs::read(input_path).map_err(|e| file_error(input_path, e))?;

    let mut decoded = Vec::new();
    decode_bytes(&input, config, &mut decoded)?;

    let mut sink = open_sink(output_path, config.append)?;
    sink.write_all(&decoded)
        .map_err(|e| file_error(output_path, e))?;

    info!(
        "decoded \"{}\" ({} planes): {} -> {} bytes",
        input_path.display(),
        config.planes,
        input.len(),
        decoded.len()
    );
    Ok(())
}

fn open_sink(path: &Path, append: bool) -> Result<File, PlanepackError> {
    let result = if append {
        OpenOptions::new().append(true).create(true).open(path)
    } else {
        File::create(path)
    };
    result.map_err(|e| file_error(path, e))
}

fn file_error(path: &Path, source: std::io::Error) -> PlanepackError {
    PlanepackError::File {
        path: path.display().to_string(),
        source,
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endianness;

    fn roundtrip_bytes(input: &[u8], config: &RleConfig) -> EncodeReport {
        let mut encoded = Vec::new();
        let report = encode_bytes(input, config, &mut encoded).unwrap();
        assert_eq!(report.encoded_size, encoded.len());

        let mut decoded = Vec::new();
        decode_bytes(&encoded, config, &mut decoded).unwrap();

        // Decoding reproduces the padded buffer; the prefix is the input.
        let expected_len = report.padded_size.unwrap_or(report.original_size);
        assert_eq!(decoded.len(), expected_len);
        assert_eq!(&decoded[..input.len()], input);
        assert!(decoded[input.len()..].iter().all(|&b| b == 0));
        report
    }

    #[test]
    fn test_roundtrip_default_config() {
        let input: Vec<u8> = b"aaaabcdeeeeeeeeeeeeeeef".to_vec();
        let report = roundtrip_bytes(&input, &RleConfig::default());
        assert_eq!(report.original_size, input.len());
        assert_eq!(report.padded_size, None);
    }

    #[test]
    fn test_width_two_pads_odd_input() {
        let input = vec![1u8, 2, 3, 4, 5];
        let config = RleConfig {
            width: ElementWidth::W2,
            ..RleConfig::default()
        };
        let report = roundtrip_bytes(&input, &config);
        assert_eq!(report.original_size, 5);
        assert_eq!(report.padded_size, Some(6));
    }

    #[test]
    fn test_width_four_big_endian_planes() {
        let input: Vec<u8> = (0..64).map(|i| i / 9).collect();
        let config = RleConfig {
            width: ElementWidth::W4,
            endianness: Endianness::Big,
            planes: 2,
            ..RleConfig::default()
        };
        roundtrip_bytes(&input, &config);
    }

    #[test]
    fn test_empty_input_all_widths() {
        for width in [ElementWidth::W1, ElementWidth::W2, ElementWidth::W4] {
            let config = RleConfig {
                width,
                planes: 3,
                ..RleConfig::default()
            };
            let mut encoded = Vec::new();
            let report = encode_bytes(&[], &config, &mut encoded).unwrap();
            // Exactly N terminator elements and nothing else.
            assert_eq!(report.encoded_size, 3 * width.bytes());
            assert!(encoded.iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_invalid_plane_count_produces_no_output() {
        let config = RleConfig {
            planes: 0,
            ..RleConfig::default()
        };
        let mut encoded = Vec::new();
        let result = encode_bytes(&[1, 2, 3], &config, &mut encoded);
        assert!(matches!(result, Err(PlanepackError::InvalidPlaneCount(0))));
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_encode_file_truncate_and_append() {
        let dir = std::env::temp_dir();
        let input_path = dir.join(format!("planepack_in_{}", std::process::id()));
        let output_path = dir.join(format!("planepack_out_{}", std::process::id()));

        let payload = vec![9u8; 40];
        std::fs::write(&input_path, &payload).unwrap();

        let config = RleConfig::default();
        let report = encode_file(&input_path, &output_path, &config).unwrap();
        let first_len = std::fs::metadata(&output_path).unwrap().len() as usize;
        assert_eq!(first_len, report.encoded_size);

        // Append mode doubles the file instead of truncating it.
        let append_config = RleConfig {
            append: true,
            ..RleConfig::default()
        };
        encode_file(&input_path, &output_path, &append_config).unwrap();
        let second_len = std::fs::metadata(&output_path).unwrap().len() as usize;
        assert_eq!(second_len, 2 * first_len);

        std::fs::remove_file(&input_path).unwrap();
        std::fs::remove_file(&output_path).unwrap();
    }

    #[test]
    fn test_missing_input_reports_path() {
        let config = RleConfig::default();
        let missing = Path::new("/nonexistent/planepack_missing.bin");
        let result = encode_file(missing, Path::new("/tmp/planepack_unused.bin"), &config);
        match result {
            Err(PlanepackError::File { path, .. }) => {
                assert!(path.contains("planepack_missing.bin"))
            }
            other => panic!("expected File error, got {:?}", other.map(|_| ())),
        }
    }
}
