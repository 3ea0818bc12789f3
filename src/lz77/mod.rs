//! The lz77 module produces the dictionary parse that feeds the entropy
//! coder.
//!
//! The parser walks the input greedily. Bytes with no usable earlier
//! occurrence accumulate in a literal run; when a back-reference of at least
//! three bytes is found inside the 32 KiB window, the pending run and the
//! reference are sealed into one command. Replaying the command stream
//! against an empty buffer reproduces the input exactly, which the encoder
//! verifies before emitting anything.

pub mod parser;
