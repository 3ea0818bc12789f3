//! The compression module manages both directions of the sbro codec.
//!
//! Compression happens in the following steps:
//! - LZ77 parse: turn the input into commands of literal runs plus optional
//!   back-references into a 32 KiB window.
//! - Codebook build: tally symbol frequencies over the command stream and
//!   derive seven canonical Huffman tables (four context-selected literal
//!   tables, insert-length, copy-length, distance).
//! - Serialization: write the fixed container header, the code-length
//!   tables, and the entropy-coded bitstream.
//!
//! Decompression follows the inverse: parse the header, rebuild the seven
//! tables from their code lengths, then decode commands until the declared
//! raw size has been reconstructed.
//!
//! Both pipelines maintain a running reconstruction. The encoder compares
//! it against the input as a self-check; the decoder's copy *is* the output.

pub mod codebooks;
pub mod compress;
pub mod decompress;

/// Container magic, first four bytes of every sbro stream.
pub const MAGIC: [u8; 4] = *b"SBRO";
/// The only container version this codec reads or writes.
pub const VERSION: u8 = 1;
/// Bytes in the fixed header: magic, version, raw size, three alphabet
/// sizes, and the four 256-entry literal code-length tables.
pub const FIXED_HEADER_LEN: usize = 4 + 1 + 4 + 3 * 2 + 4 * 256;
