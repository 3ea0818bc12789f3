//! The bitstream module forms the bit-level I/O subsystem for the sbro codec.
//!
//! The sbro container packs its entropy-coded payload LSB-first: within each
//! byte, the first bit written occupies the least significant position, and
//! bytes are emitted in stream order. The writer pads the trailing partial
//! byte with zero bits in the high positions; the reader treats those padding
//! bits as ordinary data and never validates them.
//!
//! This subsystem is designed to efficiently interface with the other modules
//! of the codec. It is not intended for more general use.

pub mod bitreader;
pub mod bitwriter;
