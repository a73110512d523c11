//! planepack: a run-length codec with plane de-interleaving, for packing
//! binary assets (bitplane graphics and the like) for resource-constrained
//! playback targets.
//!
//! The codec is an online, single-pass, greedy encoder with a one-element
//! lookback, emitting fixed-width control words whose capacity scales with
//! the element width (1, 2, or 4 bytes). Interleaved inputs can be split into
//! N planes, each encoded independently and framed by a zero terminator.
//!
//! Data flows one way: raw bytes -> plane splitter -> run-length encoder ->
//! output buffer. The `driver` module owns all buffers and file I/O; the
//! `kernels` modules are pure.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod driver;
pub mod kernels;

mod error;
mod utils;


//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use config::{ElementWidth, Endianness, RleConfig};
pub use driver::{decode_bytes, decode_file, encode_bytes, encode_file, EncodeReport};
pub use error::PlanepackError;

/// Routes the crate's `log` output to stderr via `env_logger`, honoring
/// `RUST_LOG`. Safe to call more than once.
pub fn enable_verbose_logging() {
    let _ = env_logger::builder().try_init();
}
