//! The greedy, single-pass run-length encoder and the matching token decoder.
//!
//! The encoder consumes one element at a time with a one-element lookback and
//! decides, online, whether it is extending a run of identical values or a
//! literal span of non-repeating values. Tokens are `(control word, payload)`
//! pairs as laid out by the `control` module, written into a caller-owned
//! output buffer.
//!
//! The tricky part is the ambiguity at the tail of a literal span: the last
//! buffered element may turn out to be the first element of a new run. When
//! the second occurrence arrives, the encoder pops that element, flushes the
//! remaining literal span, and re-seeds the buffer with the popped value as a
//! fresh run candidate. This retroactive correction needs no lookahead and
//! guarantees a literal token never ends with an element that belongs to the
//! next run.

use log::trace;

use crate::config::Endianness;
use crate::error::PlanepackError;
use crate::kernels::control::{self, Element};

//==================================================================================
// 1. The Encoder State Machine
//==================================================================================

/// Stateful RLE encoder for one plane.
///
/// Holds EITHER a literal buffer with no active repeat, OR a single repeated
/// value with `repeats >= 1` counting occurrences beyond the first. A fresh
/// instance is created per plane; it owns no cross-plane state.
pub struct RleEncoder<'a, T: Element> {
    endian: Endianness,
    /// Literal buffer; also doubles as the one-element run-candidate holder.
    pending: Vec<T>,
    /// Occurrences of `pending[0]` beyond the first. Zero while buffering a
    /// literal span.
    repeats: usize,
    out: &'a mut Vec<u8>,
}

impl<'a, T: Element> RleEncoder<'a, T> {
    pub fn new(endian: Endianness, out: &'a mut Vec<u8>) -> Self {
        Self {
            endian,
            pending: Vec::new(),
            repeats: 0,
            out,
        }
    }

    /// Feeds one element to the encoder.
    pub fn add(&mut self, value: T) -> Result<(), PlanepackError> {
        let Some(&last) = self.pending.last() else {
            self.pending.push(value);
            return Ok(());
        };

        if value == last {
            if self.repeats == 0 && self.pending.len() >= 2 {
                // The span so far was noise, but its final element is really
                // the first of a new uniform run. Keep it out of the literal.
                let seed = self.pending.pop();
                trace!("fold: split run seed {:?} off literal", value);
                self.flush()?;
                if let Some(seed) = seed {
                    self.pending.push(seed);
                }
            }

            self.repeats += 1;

            // Count field at capacity: emit the run now.
            if self.repeats == control::max_run::<T>() - 1 {
                trace!("forced run flush at {} repeats", self.repeats);
                self.flush()?;
            }
        } else {
            if self.repeats > 0 {
                self.flush()?;
            }

            self.pending.push(value);

            if self.pending.len() == control::max_literal::<T>() {
                trace!("forced literal flush at {} elements", self.pending.len());
                self.flush()?;
            }
        }

        Ok(())
    }

    /// Emits the pending run or literal span as one token. No-op when empty.
    pub fn flush(&mut self) -> Result<(), PlanepackError> {
        if self.repeats > 0 {
            // Uniform data. The +1 restores the initial occurrence of the
            // value, which the repeat counter never counted.
            let count = self.repeats + 1;
            let ctrl = control::run_flag::<T>()
                | T::from(count).ok_or_else(|| {
                    PlanepackError::Internal(format!("run count {} exceeds element range", count))
                })?;
            trace!("emit run token: count={} value={:?}", count, self.pending[0]);
            ctrl.put(self.endian, self.out);
            self.pending[0].put(self.endian, self.out);
        } else if !self.pending.is_empty() {
            // Noisy data.
            let ctrl = T::from(self.pending.len()).ok_or_else(|| {
                PlanepackError::Internal(format!(
                    "literal length {} exceeds element range",
                    self.pending.len()
                ))
            })?;
            trace!("emit literal token: len={}", self.pending.len());
            ctrl.put(self.endian, self.out);
            for &value in &self.pending {
                value.put(self.endian, self.out);
            }
        }

        self.pending.clear();
        self.repeats = 0;
        Ok(())
    }
}

//==================================================================================
// 2. The Token Decoder
//==================================================================================

/// Decodes one plane's token stream starting at `*pos`, appending the
/// reconstructed elements to `out`.
///
/// Consumes tokens up to and including the zero terminator element and leaves
/// `*pos` just past it. A stream that ends before its terminator is a
/// `Decode` error.
pub fn decode_plane<T: Element>(
    bytes: &[u8],
    pos: &mut usize,
    endian: Endianness,
    out: &mut Vec<T>,
) -> Result<(), PlanepackError> {
    loop {
        let ctrl = T::take(&bytes[*pos..], endian).ok_or_else(|| {
            PlanepackError::Decode("Unexpected end of buffer: missing control word".to_string())
        })?;
        *pos += T::WIDTH;

        if ctrl == T::zero() {
            // Plane terminator.
            return Ok(());
        }

        if ctrl & control::run_flag::<T>() != T::zero() {
            let count = (ctrl & control::count_mask::<T>()).to_usize().ok_or_else(|| {
                PlanepackError::Internal("count field does not fit usize".to_string())
            })?;
            if count < 2 {
                return Err(PlanepackError::Decode(format!(
                    "run token with count {} (minimum is 2)",
                    count
                )));
            }
            let value = T::take(&bytes[*pos..], endian).ok_or_else(|| {
                PlanepackError::Decode("Unexpected end of buffer: missing run value".to_string())
            })?;
            *pos += T::WIDTH;
            out.extend(std::iter::repeat(value).take(count));
        } else {
            let len = ctrl.to_usize().ok_or_else(|| {
                PlanepackError::Internal("length field does not fit usize".to_string())
            })?;
            for _ in 0..len {
                let value = T::take(&bytes[*pos..], endian).ok_or_else(|| {
                    PlanepackError::Decode(
                        "Unexpected end of buffer: truncated literal span".to_string(),
                    )
                })?;
                *pos += T::WIDTH;
                out.push(value);
            }
        }
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
