//! The single source of truth for all planepack codec configuration.
//!
//! This module defines the unified `RleConfig` struct, which is designed to be
//! created once at the application boundary (e.g., from a caller's settings
//! file) and then passed down through the system by shared reference.
//!
//! The configuration is validated up front: an invalid plane count is rejected
//! before any encoding begins and before any output is produced.

use serde::{Deserialize, Serialize};

use crate::error::PlanepackError;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// The fixed width of the element the codec operates on.
///
/// Control words and payload values are each exactly one element wide, so the
/// width also determines the capacity of the control word's count field:
/// `2^(width*8 - 1) - 1` for both runs and literal spans.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElementWidth {
    /// **Default:** 8-bit elements with byte-sized control words. This is the
    /// configuration shipped by the original tool chain.
    #[default]
    W1,

    /// 16-bit elements with full-width (16-bit) control words.
    W2,

    /// 32-bit elements with full-width (32-bit) control words.
    W4,
}

impl ElementWidth {
    /// The element width in bytes.
    pub fn bytes(self) -> usize {
        match self {
            ElementWidth::W1 => 1,
            ElementWidth::W2 => 2,
            ElementWidth::W4 => 4,
        }
    }
}

/// The byte order used to serialize multi-byte control words and payload
/// elements. Irrelevant for `ElementWidth::W1`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Endianness {
    /// **Default:** the host's native byte order.
    #[default]
    Native,

    /// Most-significant-byte-first, for big-endian playback targets.
    Big,
}

//==================================================================================
// II. The Unified RleConfig
//==================================================================================

/// The single, unified configuration for one codec invocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RleConfig {
    /// Element width for the encoder and the control-word policy.
    #[serde(default)]
    pub width: ElementWidth,

    /// Byte order for serializing control words and payload elements.
    #[serde(default)]
    pub endianness: Endianness,

    /// Number of interleaved planes in the input. Each plane is encoded
    /// independently and followed by a zero-valued terminator element.
    #[serde(default = "default_planes")]
    pub planes: usize,

    /// If true, the file-level driver positions the output sink at
    /// end-of-file before encoding begins instead of truncating it.
    #[serde(default)]
    pub append: bool,
}

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            width: ElementWidth::default(),
            endianness: Endianness::default(),
            planes: default_planes(),
            append: false,
        }
    }
}

impl RleConfig {
    /// Checks the configuration before any encoding work starts.
    pub fn validate(&self) -> Result<(), PlanepackError> {
        if self.planes < 1 {
            return Err(PlanepackError::InvalidPlaneCount(self.planes));
        }
        Ok(())
    }
}

/// Helper for `serde` to default the plane count to a single plane.
fn default_planes() -> usize {
    1
}

//==================================================================================
// III. Unit Tests
//==================================================================================
