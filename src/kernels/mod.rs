//! The pure, stateless building blocks of the codec. Kernels never perform
//! I/O: they read caller-owned slices and append to caller-owned buffers.

pub mod control;
pub mod planes;
pub mod rle;
