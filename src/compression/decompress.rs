use log::{debug, info};

use crate::bitstream::bitreader::BitReader;
use crate::compression::{FIXED_HEADER_LEN, MAGIC, VERSION};
use crate::error::SbroError;
use crate::huffman_coding::{bucket, huffman::Huffman};
use crate::tools::context::{output_context, CONTEXT_COUNT};

/// Decompress an sbro container back into the original bytes.
///
/// The header is validated, the seven Huffman tables are rebuilt from their
/// serialized code lengths, and commands are decoded until exactly
/// `raw_size` bytes have been reconstructed. Trailing padding bits in the
/// final byte are never inspected.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, SbroError> {
    if input.len() < MAGIC.len() {
        return Err(SbroError::TruncatedHeader);
    }
    if input[..MAGIC.len()] != MAGIC {
        return Err(SbroError::BadMagic);
    }
    if input.len() < FIXED_HEADER_LEN {
        return Err(SbroError::TruncatedHeader);
    }
    if input[4] != VERSION {
        return Err(SbroError::UnsupportedVersion(input[4]));
    }
    info!("Found a valid sbro signature.");

    let raw_size = u32::from_le_bytes(input[5..9].try_into().unwrap()) as usize;
    let ins_alphabet = u16::from_le_bytes(input[9..11].try_into().unwrap()) as usize;
    let cop_alphabet = u16::from_le_bytes(input[11..13].try_into().unwrap()) as usize;
    let dst_alphabet = u16::from_le_bytes(input[13..15].try_into().unwrap()) as usize;

    let tables_end = FIXED_HEADER_LEN + ins_alphabet + cop_alphabet + dst_alphabet;
    if input.len() < tables_end {
        return Err(SbroError::TruncatedHeader);
    }

    // Rebuild the four literal tables, then the three numeric tables, from
    // the code-length bytes laid out right after the fixed fields.
    let mut offset = 4 + 1 + 4 + 3 * 2;
    let mut lit: Vec<Huffman> = Vec::with_capacity(CONTEXT_COUNT);
    for _ in 0..CONTEXT_COUNT {
        lit.push(Huffman::from_code_lengths(&input[offset..offset + 256])?);
        offset += 256;
    }
    let ins_len = Huffman::from_code_lengths(&input[offset..offset + ins_alphabet])?;
    offset += ins_alphabet;
    let cop_len = Huffman::from_code_lengths(&input[offset..offset + cop_alphabet])?;
    offset += cop_alphabet;
    let dist = Huffman::from_code_lengths(&input[offset..offset + dst_alphabet])?;
    offset += dst_alphabet;

    debug!(
        "alphabets ins {}, cop {}, dst {}; raw size {}",
        ins_alphabet, cop_alphabet, dst_alphabet, raw_size
    );

    let mut br = BitReader::new(&input[offset..]);
    // Cap the up-front reservation; a hostile header can claim 4 GiB.
    let mut out: Vec<u8> = Vec::with_capacity(raw_size.min(1 << 26));

    while out.len() < raw_size {
        // Literal run.
        let literal_count = bucket::read_value(&ins_len, &mut br)?;
        for _ in 0..literal_count {
            let symbol = lit[output_context(&out)].decode_symbol(&mut br)?;
            out.push(symbol as u8);
            if out.len() > raw_size {
                return Err(SbroError::CorruptStream("literal run past declared size"));
            }
        }
        if out.len() >= raw_size {
            break;
        }

        if br.bit()? == 0 {
            continue;
        }

        // Back-reference. Widen before the +3/+1 bias so a hostile payload
        // cannot wrap.
        let match_len = u64::from(bucket::read_value(&cop_len, &mut br)?) + 3;
        let distance = u64::from(bucket::read_value(&dist, &mut br)?) + 1;
        if distance > out.len() as u64 {
            return Err(SbroError::CorruptStream("distance past start of output"));
        }

        // Copy byte by byte: an overlapping reference (distance < length)
        // re-reads bytes this same copy appended.
        let start = out.len() - distance as usize;
        for k in 0..match_len as usize {
            let byte = out[start + k];
            out.push(byte);
            if out.len() > raw_size {
                return Err(SbroError::CorruptStream("match run past declared size"));
            }
        }
    }

    if out.len() != raw_size {
        return Err(SbroError::SizeMismatch {
            expected: raw_size,
            actual: out.len(),
        });
    }
    Ok(out)
}
