use log::debug;

use crate::bitstream::bitwriter::BitWriter;
use crate::compression::codebooks::Codebooks;
use crate::compression::{FIXED_HEADER_LEN, MAGIC, VERSION};
use crate::error::SbroError;
use crate::huffman_coding::bucket;
use crate::lz77::parser::{parse, MIN_MATCH};
use crate::tools::context::output_context;

/// Compress `input` into a self-described sbro container.
///
/// The container carries everything a decoder needs: the raw size, the
/// seven code-length tables, and the entropy-coded command stream. For a
/// fixed input the output is byte-identical across runs.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, SbroError> {
    let raw_size = u32::try_from(input.len())
        .map_err(|_| SbroError::InternalError("input exceeds the container's u32 size field"))?;

    let commands = parse(input);
    let books = Codebooks::build(&commands, input)?;

    // Fixed header, then the variable code-length runs.
    let mut out = Vec::with_capacity(FIXED_HEADER_LEN + 64 + input.len() / 2);
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&raw_size.to_le_bytes());
    out.extend_from_slice(&(books.ins_code_lens.len() as u16).to_le_bytes());
    out.extend_from_slice(&(books.cop_code_lens.len() as u16).to_le_bytes());
    out.extend_from_slice(&(books.dist_code_lens.len() as u16).to_le_bytes());
    for ctx in &books.lit_code_lens {
        out.extend_from_slice(ctx);
    }
    out.extend_from_slice(&books.ins_code_lens);
    out.extend_from_slice(&books.cop_code_lens);
    out.extend_from_slice(&books.dist_code_lens);

    // The bitstream follows the last code-length byte with no padding. The
    // reconstruction buffer supplies the literal contexts and doubles as
    // the encoder self-check.
    let mut bw = BitWriter::with_capacity(input.len() / 2 + 8);
    let mut recon: Vec<u8> = Vec::with_capacity(input.len());

    for cmd in &commands {
        bucket::write_value(&books.ins_len, &mut bw, cmd.literals.len() as u32);

        for &byte in &cmd.literals {
            books.lit[output_context(&recon)].encode_symbol(&mut bw, byte as usize);
            recon.push(byte);
        }

        bw.out_bit(cmd.matched.is_some() as u32);

        if let Some(m) = &cmd.matched {
            bucket::write_value(&books.cop_len, &mut bw, m.len - MIN_MATCH as u32);
            bucket::write_value(&books.dist, &mut bw, m.distance - 1);

            if m.distance == 0 || m.distance as usize > recon.len() {
                return Err(SbroError::InternalError(
                    "encoder met a distance past the reconstructed output",
                ));
            }
            let start = recon.len() - m.distance as usize;
            for k in 0..m.len as usize {
                let byte = recon[start + k];
                recon.push(byte);
            }
        }
    }

    if recon != input {
        return Err(SbroError::InternalError(
            "encoder reconstruction diverged from the input",
        ));
    }

    out.append(&mut bw.into_bytes());
    debug!(
        "compressed {} bytes to {} ({} commands)",
        input.len(),
        out.len(),
        commands.len()
    );
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_fields_are_byte_exact() {
        let out = compress(b"hello").unwrap();
        assert_eq!(&out[..4], b"SBRO");
        assert_eq!(out[4], 1);
        assert_eq!(u32::from_le_bytes(out[5..9].try_into().unwrap()), 5);
    }

    #[test]
    fn empty_input_is_header_only() {
        let out = compress(b"").unwrap();
        // Fixed header plus one degenerate length byte per dynamic table,
        // and no bitstream.
        assert_eq!(out.len(), FIXED_HEADER_LEN + 3);
        assert_eq!(u32::from_le_bytes(out[5..9].try_into().unwrap()), 0);
        assert_eq!(
            u16::from_le_bytes(out[9..11].try_into().unwrap()),
            1,
            "ins alphabet"
        );
    }

    #[test]
    fn identical_inputs_compress_identically() {
        let data = b"the quick brown fox jumps over the lazy dog 1234567890";
        assert_eq!(compress(data).unwrap(), compress(data).unwrap());
    }

    #[test]
    fn repetitive_input_shrinks() {
        let input = vec![0_u8; 65_536];
        let out = compress(&input).unwrap();
        assert!(out.len() < 1200, "compressed to {} bytes", out.len());
    }
}
