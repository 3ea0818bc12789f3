//! The huffman module builds and applies the canonical prefix codes used by
//! the sbro codec.
//!
//! Seven tables drive one stream: four 256-symbol literal tables selected by
//! the class of the previously emitted byte, plus one table each for the
//! insert-length, copy-length, and distance bucket symbols. The encoder
//! builds each table from frequency counts; the decoder rebuilds the same
//! table from the code lengths serialized in the container header. Both
//! sides assign codes with the DEFLATE canonical construction, so a
//! code-length vector alone pins the codes down bit-for-bit.
//!
//! The numeric fields themselves are not huffman-coded directly. They pass
//! through the bucket coder first, which splits a value into a small
//! entropy-coded bit-length class and a raw tail.

pub mod bucket;
pub mod huffman;
