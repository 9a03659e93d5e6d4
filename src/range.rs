//! Carry-less range coding.
//!
//! A range coder keeps an integer interval `[low, low + range)` and
//! narrows it per symbol in proportion to the symbol's frequency. The
//! carry-less variant renormalizes whenever a chunk-boundary carry could
//! still occur, so emitted bytes are final the moment they are written
//! and no deferred carry propagation is needed.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{Error, Result};

/// Byte order of each renormalization chunk on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// Static configuration shared by a matched encoder/decoder pair.
///
/// A producing and a consuming coder must be constructed with identical
/// configurations; the stream itself carries no configuration data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeConfig {
    /// Working register width in bits. At most 128; must be a multiple of
    /// `precision` and wider than twice the `precision`.
    pub range_size: u32,
    /// Bits transferred per renormalization chunk; a nonzero multiple of 8.
    pub precision: u32,
    /// Byte order of each chunk on the wire.
    pub byte_order: ByteOrder,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            range_size: 64,
            precision: 8,
            byte_order: ByteOrder::Big,
        }
    }
}

impl RangeConfig {
    fn validate(&self) -> Result<()> {
        if self.precision == 0 || self.precision % 8 != 0 {
            return Err(Error::InvalidPrecision(self.precision));
        }
        if self.range_size > 128
            || self.range_size <= 2 * self.precision
            || self.range_size % self.precision != 0
        {
            return Err(Error::InvalidRangeSize {
                range_size: self.range_size,
                precision: self.precision,
            });
        }
        Ok(())
    }

    fn chunk_bytes(&self) -> usize {
        (self.precision / 8) as usize
    }

    /// Chunks written by the encoder's flush and read by the decoder's
    /// priming pass.
    fn flush_chunks(&self) -> u32 {
        self.range_size / self.precision
    }
}

/// The `low`/`range` register pair and the renormalization loops shared
/// by encoder and decoder.
///
/// Pure arithmetic; the owning coder supplies the chunk transfer. All
/// shifts and additions are truncated to `range_size` bits via `mask`.
#[derive(Clone, Debug)]
struct Registers {
    low: u128,
    range: u128,
    mask: u128,
    top: u128,
    bottom: u128,
    precision: u32,
    /// `range_size - precision`: position of the outgoing chunk in `low`.
    shift: u32,
}

impl Registers {
    fn new(config: &RangeConfig) -> Self {
        let mask = if config.range_size == 128 {
            u128::MAX
        } else {
            (1u128 << config.range_size) - 1
        };
        Self {
            low: 0,
            range: mask,
            mask,
            top: 1u128 << (config.range_size - config.precision),
            bottom: 1u128 << (config.range_size - 2 * config.precision),
            precision: config.precision,
            shift: config.range_size - config.precision,
        }
    }

    /// Narrow the interval to symbol `index`'s cumulative slot.
    ///
    /// `range` must already be divided by the scale.
    fn narrow(&mut self, count: &[u64], count_cum: &[u64], index: usize) {
        if index > 0 {
            let offset = count_cum[index - 1] as u128 * self.range;
            self.low = self.low.wrapping_add(offset) & self.mask;
        }
        self.range *= count[index] as u128;
    }

    /// Run both renormalization loops to a fixed point, invoking
    /// `transfer` once per emitted/consumed chunk.
    fn renormalize<F>(&mut self, mut transfer: F) -> Result<()>
    where
        F: FnMut(&Self) -> Result<()>,
    {
        // The top chunk is settled once the high `precision` bits of `low`
        // and `low + range` agree: no interval endpoint can carry into
        // them anymore. A sum that carries out of the register makes the
        // XOR at least `2^range_size`, which also ends the loop.
        loop {
            let (sum, carry) = self.low.overflowing_add(self.range);
            if carry || (self.low ^ sum) >= self.top {
                break;
            }
            transfer(self)?;
            self.range = (self.range << self.precision) & self.mask;
            self.low = (self.low << self.precision) & self.mask;
        }

        // Underflow: the interval straddles a chunk boundary but is too
        // narrow to settle it. Clamp `range` to the span below the
        // boundary and force the transfer.
        while self.range < self.bottom {
            transfer(self)?;
            self.range = (self.low.wrapping_neg() & (self.bottom - 1)) << self.precision;
            self.low = (self.low << self.precision) & self.mask;
        }

        Ok(())
    }

    /// The chunk the carry-less check has settled.
    fn settled_chunk(&self) -> u64 {
        (self.low >> self.shift) as u64
    }
}

fn put_chunk<W: Write>(writer: &mut W, chunk: u64, bytes: usize, order: ByteOrder) -> Result<()> {
    match order {
        ByteOrder::Big => {
            let raw = chunk.to_be_bytes();
            writer.write_all(&raw[8 - bytes..])?;
        }
        ByteOrder::Little => {
            let raw = chunk.to_le_bytes();
            writer.write_all(&raw[..bytes])?;
        }
    }
    Ok(())
}

fn get_chunk<R: Read>(reader: &mut R, bytes: usize, order: ByteOrder) -> Result<u64> {
    let mut raw = [0u8; 8];
    match order {
        ByteOrder::Big => {
            reader.read_exact(&mut raw[8 - bytes..])?;
            Ok(u64::from_be_bytes(raw))
        }
        ByteOrder::Little => {
            reader.read_exact(&mut raw[..bytes])?;
            Ok(u64::from_le_bytes(raw))
        }
    }
}

/// Carry-less range encoder over a byte sink.
///
/// Symbols are pushed with [`encode`](Self::encode); the session is closed
/// with [`finish`](Self::finish), which flushes the remaining register
/// content and returns the sink. `finish` consumes the encoder, so
/// finalization runs exactly once and encoding after it is
/// unrepresentable. Dropping an unfinished encoder abandons the stream.
pub struct RangeEncoder<W> {
    writer: W,
    regs: Registers,
    config: RangeConfig,
}

impl<W: Write> RangeEncoder<W> {
    /// Create an encoder with the default configuration: 64-bit registers,
    /// 8-bit chunks, big-endian.
    pub fn new(writer: W) -> Self {
        let config = RangeConfig::default();
        Self {
            regs: Registers::new(&config),
            writer,
            config,
        }
    }

    /// Create an encoder with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPrecision`] or [`Error::InvalidRangeSize`]
    /// if the configuration is rejected.
    pub fn with_config(writer: W, config: RangeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            regs: Registers::new(&config),
            writer,
            config,
        })
    }

    /// Encode one symbol.
    ///
    /// `count[i]` is the weight of symbol `i`, `count_cum[i]` the inclusive
    /// prefix sum of `count`, and `count_cum[last]` the total scale. The
    /// tables are trusted: malformed tables yield garbage output, not an
    /// error. The scale must not exceed `2^(range_size - 2 * precision)`.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the sink fails.
    pub fn encode(&mut self, count: &[u64], count_cum: &[u64], index: usize) -> Result<()> {
        let scale = count_cum[count_cum.len() - 1];
        debug_assert!(scale > 0 && scale as u128 <= self.regs.bottom);
        debug_assert!(index < count.len() && count[index] > 0);

        self.regs.range /= scale as u128;
        self.regs.narrow(count, count_cum, index);

        let writer = &mut self.writer;
        let bytes = self.config.chunk_bytes();
        let order = self.config.byte_order;
        self.regs
            .renormalize(|regs| put_chunk(writer, regs.settled_chunk(), bytes, order))
    }

    /// Flush the remaining register content and return the sink.
    ///
    /// Writes exactly `range_size / precision` chunks, so the decoder can
    /// always prime the same number of leading chunks regardless of how
    /// many symbols were coded.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the sink fails.
    pub fn finish(mut self) -> Result<W> {
        let bytes = self.config.chunk_bytes();
        for _ in 0..self.config.flush_chunks() {
            put_chunk(
                &mut self.writer,
                self.regs.settled_chunk(),
                bytes,
                self.config.byte_order,
            )?;
            self.regs.low = (self.regs.low << self.regs.precision) & self.regs.mask;
        }
        Ok(self.writer)
    }
}

/// Carry-less range decoder over a seekable byte source.
///
/// Construction rewinds the source to its start and primes the code
/// register from the encoder's finalization flush, so a freshly built
/// decoder is ready for [`decode`](Self::decode). The stream carries no
/// terminator; the caller must know how many symbols to recover.
#[derive(Debug)]
pub struct RangeDecoder<R> {
    reader: R,
    regs: Registers,
    code: u128,
    config: RangeConfig,
}

impl<R: Read + Seek> RangeDecoder<R> {
    /// Create a decoder with the default configuration and prime it.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the source cannot be rewound or holds
    /// fewer than `range_size / precision` chunks.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_config(reader, RangeConfig::default())
    }

    /// Create a decoder with an explicit configuration and prime it.
    ///
    /// # Errors
    /// Configuration rejections as for [`RangeEncoder::with_config`], or
    /// [`Error::Io`] as for [`RangeDecoder::new`].
    pub fn with_config(mut reader: R, config: RangeConfig) -> Result<Self> {
        config.validate()?;
        reader.seek(SeekFrom::Start(0))?;

        let regs = Registers::new(&config);
        let bytes = config.chunk_bytes();
        let mut code = 0u128;
        for _ in 0..config.flush_chunks() {
            let chunk = get_chunk(&mut reader, bytes, config.byte_order)?;
            code = ((code << config.precision) + chunk as u128) & regs.mask;
        }

        Ok(Self {
            reader,
            regs,
            code,
            config,
        })
    }

    /// Decode the next symbol and return its table index.
    ///
    /// The tables must match, position for position, the ones the encoder
    /// was given; a mismatch silently decodes wrong symbols.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the source fails, including running past
    /// the end of the stream.
    pub fn decode(&mut self, count: &[u64], count_cum: &[u64]) -> Result<usize> {
        let scale = count_cum[count_cum.len() - 1];
        debug_assert!(scale > 0 && scale as u128 <= self.regs.bottom);

        self.regs.range /= scale as u128;
        let target = (self.code.wrapping_sub(self.regs.low) & self.regs.mask) / self.regs.range;

        // Smallest index whose cumulative count exceeds the target. The
        // `<=` tie-break mirrors the encoder's interval placement; moving
        // it would desynchronize the two coders.
        let limit = (count_cum.len() as u64).min(1u64 << self.config.precision) as usize;
        let mut left = 0;
        let mut right = limit - 1;
        while left < right {
            let middle = (left + right) / 2;
            if count_cum[middle] as u128 <= target {
                left = middle + 1;
            } else {
                right = middle;
            }
        }

        self.regs.narrow(count, count_cum, left);

        let reader = &mut self.reader;
        let code = &mut self.code;
        let mask = self.regs.mask;
        let precision = self.regs.precision;
        let bytes = self.config.chunk_bytes();
        let order = self.config.byte_order;
        self.regs.renormalize(|_| {
            let chunk = get_chunk(reader, bytes, order)?;
            *code = ((*code << precision) + chunk as u128) & mask;
            Ok(())
        })?;

        Ok(left)
    }

    /// Return the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
