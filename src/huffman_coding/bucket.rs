//! Log-bucket coding of non-negative integers.
//!
//! A value splits into a bucket symbol (its 1-based bit length, with 0
//! reserved for the value 0) and `symbol - 1` raw payload bits. The symbol
//! goes through a Huffman table; the payload is written verbatim. This keeps
//! the entropy-coded alphabet tiny while the tail bits stay incompressible.

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::SbroError;
use crate::huffman_coding::huffman::Huffman;

/// A value's two-part representation: bucket symbol plus raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketCode {
    pub sym: u32,
    pub extra_bits: u8,
    pub extra_val: u32,
}

/// Split a value into its bucket symbol and payload.
pub fn encode(value: u32) -> BucketCode {
    if value == 0 {
        return BucketCode {
            sym: 0,
            extra_bits: 0,
            extra_val: 0,
        };
    }
    let k = value.ilog2();
    BucketCode {
        sym: k + 1,
        extra_bits: k as u8,
        extra_val: value - (1 << k),
    }
}

/// Rebuild a value from its bucket symbol and payload. `sym` must be 0..=32.
pub fn decode(sym: u32, extra_val: u32) -> u32 {
    if sym == 0 {
        return 0;
    }
    debug_assert!(sym <= 32);
    (1_u32 << (sym - 1)) + extra_val
}

/// Encode one value onto the stream: the huffman-coded symbol, then the raw
/// payload bits.
pub fn write_value(table: &Huffman, bw: &mut BitWriter, value: u32) {
    let enc = encode(value);
    table.encode_symbol(bw, enc.sym as usize);
    if enc.extra_bits > 0 {
        bw.out_bits(enc.extra_val, enc.extra_bits);
    }
}

/// Decode one value from the stream: a huffman-coded symbol, then the raw
/// payload bits it calls for. Symbols above 32 cannot name a representable
/// value and mark the stream corrupt.
pub fn read_value(table: &Huffman, br: &mut BitReader<'_>) -> Result<u32, SbroError> {
    let sym = u32::from(table.decode_symbol(br)?);
    if sym == 0 {
        return Ok(0);
    }
    if sym > 32 {
        return Err(SbroError::CorruptStream("bucket symbol out of range"));
    }
    let extra_bits = (sym - 1) as u8;
    let extra_val = if extra_bits > 0 { br.bits(extra_bits)? } else { 0 };
    Ok(decode(sym, extra_val))
}
