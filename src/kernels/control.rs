//! The control-word policy: pure, per-width definitions of the control-word
//! bit layout and of the run/literal capacity limits.
//!
//! A control word is exactly one element wide. Its top bit (in the element's
//! numeric value, independent of serialization order) selects the token kind:
//! set for a run, clear for a literal span. The remaining bits hold the count
//! field, so both runs and literals are capped at `2^(width*8 - 1) - 1`
//! elements per token. A zero control word never encodes a token; it is the
//! plane terminator.

use bytemuck::Pod;
use num_traits::{PrimInt, Unsigned};

use crate::config::Endianness;

//==================================================================================
// 1. The Element Trait
//==================================================================================

/// An unsigned fixed-width integer the codec can operate on.
///
/// Implementations define the element width and how one element is serialized
/// to / deserialized from the output stream under a configured byte order.
pub trait Element: PrimInt + Unsigned + Pod + std::fmt::Debug + 'static {
    /// Element width in bytes.
    const WIDTH: usize;

    /// Appends one serialized element to the output buffer.
    fn put(self, endian: Endianness, out: &mut Vec<u8>);

    /// Reads one element from the front of `bytes`, or `None` if fewer than
    /// `WIDTH` bytes remain.
    fn take(bytes: &[u8], endian: Endianness) -> Option<Self>;
}

macro_rules! impl_element {
    ($T:ty, $w:expr) => {
        impl Element for $T {
            const WIDTH: usize = $w;

            fn put(self, endian: Endianness, out: &mut Vec<u8>) {
                match endian {
                    Endianness::Big => out.extend_from_slice(&self.to_be_bytes()),
                    Endianness::Native => out.extend_from_slice(&self.to_ne_bytes()),
                }
            }

            fn take(bytes: &[u8], endian: Endianness) -> Option<Self> {
                let raw: [u8; $w] = bytes.get(..$w)?.try_into().ok()?;
                Some(match endian {
                    Endianness::Big => <$T>::from_be_bytes(raw),
                    Endianness::Native => <$T>::from_ne_bytes(raw),
                })
            }
        }
    };
}

impl_element!(u8, 1);
impl_element!(u16, 2);
impl_element!(u32, 4);

//==================================================================================
// 2. Control-Word Layout & Capacity
//==================================================================================

/// The run flag: the top bit of the control word's numeric value.
pub fn run_flag<T: Element>() -> T {
    T::one() << (T::WIDTH * 8 - 1)
}

/// Mask selecting the count field of a control word.
pub fn count_mask<T: Element>() -> T {
    run_flag::<T>() - T::one()
}

/// Maximum repeat count a single run token can carry.
pub fn max_run<T: Element>() -> usize {
    (1usize << (T::WIDTH * 8 - 1)) - 1
}

/// Maximum number of elements a single literal token can carry.
pub fn max_literal<T: Element>() -> usize {
    max_run::<T>()
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
