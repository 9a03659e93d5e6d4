//! # Carry-Less Range Coding
//!
//! *Near-entropy compression one byte at a time, with no carry bookkeeping.*
//!
//! ## Intuition First
//!
//! Picture the number line split into bins, one per symbol, each bin as
//! wide as its symbol is probable. Encoding a message means repeatedly
//! zooming into the bin of the next symbol; the final, microscopic
//! interval identifies the whole message, and writing down its position
//! costs about `-log2(p)` bits per symbol.
//!
//! A range coder performs this zoom with integer registers: an interval
//! `[low, low + range)` is narrowed per symbol, and whenever the leading
//! byte of the interval is settled it is emitted and the registers shift
//! left. It is long division run in reverse.
//!
//! ## The Problem
//!
//! Before range coding, entropy coders forced a trade-off:
//!
//! - **Huffman coding**: fast, but every symbol costs a whole number of
//!   bits (a 99%-probable symbol still costs 1 bit instead of 0.015).
//! - **Bit-wise arithmetic coding**: optimal rate, but an emitted byte may
//!   later need a carry propagated through it, so encoders must buffer
//!   unbounded runs of `0xFF`.
//!
//! The carry-less range coder takes a third path: it renormalizes *early*,
//! whenever a carry could still reach the outgoing byte, collapsing the
//! interval instead of buffering. Each forced collapse wastes a fraction
//! of a bit; in exchange the encoder is a handful of integer operations
//! with no deferred state.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon    Entropy as the fundamental limit
//! 1976  Rissanen   Arithmetic coding: optimal rate
//! 1979  Martin     Range coding: arithmetic coding, a byte at a time
//! 1998  Schindler  Byte-oriented renormalization in practice
//! 1999  Subbotin   Carry-less renormalization: drop the carry entirely
//! 2001  7-Zip      LZMA ships a range coder to every desktop
//! ```
//!
//! ## Mathematical Formulation
//!
//! With scale `T = count_cum[last]`, each symbol `s` applies
//!
//! ```text
//! r     = range / T
//! low   = low + r * count_cum[s - 1]
//! range = r * count[s]
//! ```
//!
//! and renormalization emits the top `precision` bits whenever
//! `low XOR (low + range) < 2^(range_size - precision)` (no carry can
//! reach them), or forces a collapse when
//! `range < 2^(range_size - 2 * precision)`.
//!
//! ## Complexity Analysis
//!
//! - **Time**: O(1) arithmetic per encoded symbol plus O(log A) for the
//!   decoder's inverse search over an alphabet of size A; renormalization
//!   amortizes to O(1) chunk transfers per symbol.
//! - **Space**: O(1) — two registers and the caller's tables.
//!
//! ## Failure Modes
//!
//! 1. **Scale too large**: if `count_cum[last]` exceeds
//!    `2^(range_size - 2 * precision)`, the integer division can zero the
//!    range and the coder degenerates.
//! 2. **Table mismatch**: the decoder trusts that it is given the same
//!    tables, in the same order, as the encoder; a mismatch silently
//!    decodes garbage.
//!
//! ## Implementation Notes
//!
//! This crate provides [`range::RangeEncoder`] over any [`std::io::Write`]
//! sink and [`range::RangeDecoder`] over any seekable [`std::io::Read`]
//! source, with configurable register width, chunk precision, and byte
//! order ([`range::RangeConfig`]). The frequency model is the caller's:
//! `count`/`count_cum` slices are read, never stored or mutated.
//!
//! ## References
//!
//! - Martin, G. N. N. (1979). "Range encoding: an algorithm for removing redundancy from a digitised message."
//! - Subbotin, D. (1999). "Carryless rangecoder." (public-domain reference implementation)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod range;

pub use error::Error;
pub use range::{ByteOrder, RangeConfig, RangeDecoder, RangeEncoder};
