use log::debug;

use crate::error::SbroError;
use crate::huffman_coding::{bucket, huffman::Huffman};
use crate::lz77::parser::{Command, MIN_MATCH};
use crate::tools::context::{output_context, CONTEXT_COUNT};

/// The seven Huffman tables that drive one stream, plus the code-length
/// vectors serialized into the container header.
///
/// The literal tables span the full byte alphabet. The three numeric tables
/// use a dynamic alphabet sized to the highest bucket symbol the command
/// stream actually produced, so a stream of short matches pays for a short
/// table.
#[derive(Debug)]
pub struct Codebooks {
    pub lit: [Huffman; CONTEXT_COUNT],
    pub ins_len: Huffman,
    pub cop_len: Huffman,
    pub dist: Huffman,

    pub lit_code_lens: [Vec<u8>; CONTEXT_COUNT],
    pub ins_code_lens: Vec<u8>,
    pub cop_code_lens: Vec<u8>,
    pub dist_code_lens: Vec<u8>,
}

impl Codebooks {
    /// Tally frequencies over the command stream and build all seven tables.
    ///
    /// The literal tally needs the byte that precedes each literal in the
    /// *output*, so the commands are replayed against a shadow buffer as
    /// they are counted. The shadow must equal the original input when the
    /// tally ends; anything else is a parser bug, not a caller error.
    pub fn build(commands: &[Command], original: &[u8]) -> Result<Self, SbroError> {
        let mut lit_freq = [[0_u64; 256]; CONTEXT_COUNT];
        let mut ins_freq: Vec<u64> = vec![0];
        let mut cop_freq: Vec<u64> = vec![0];
        let mut dist_freq: Vec<u64> = vec![0];
        let mut shadow: Vec<u8> = Vec::with_capacity(original.len());

        for cmd in commands {
            for &byte in &cmd.literals {
                lit_freq[output_context(&shadow)][byte as usize] += 1;
                shadow.push(byte);
            }
            bump_bucket(&mut ins_freq, cmd.literals.len() as u32);

            if let Some(m) = &cmd.matched {
                bump_bucket(&mut cop_freq, m.len - MIN_MATCH as u32);
                bump_bucket(&mut dist_freq, m.distance - 1);

                if m.distance == 0 || m.distance as usize > shadow.len() {
                    return Err(SbroError::InternalError(
                        "parser emitted a distance past the reconstructed output",
                    ));
                }
                let start = shadow.len() - m.distance as usize;
                for k in 0..m.len as usize {
                    let byte = shadow[start + k];
                    shadow.push(byte);
                }
            }
        }

        if shadow != original {
            return Err(SbroError::InternalError(
                "command stream does not reconstruct the input",
            ));
        }

        let lit = lit_freq.map(|freqs| Huffman::from_freqs(&freqs));
        let lit_code_lens = std::array::from_fn(|ctx| lit[ctx].code_len.clone());

        let ins_len = Huffman::from_freqs(&ins_freq);
        let cop_len = Huffman::from_freqs(&cop_freq);
        let dist = Huffman::from_freqs(&dist_freq);

        let ins_code_lens = dynamic_lengths(&ins_len);
        let cop_code_lens = dynamic_lengths(&cop_len);
        let dist_code_lens = dynamic_lengths(&dist);

        debug!(
            "codebook alphabets: ins {}, cop {}, dst {}",
            ins_code_lens.len(),
            cop_code_lens.len(),
            dist_code_lens.len()
        );

        Ok(Self {
            lit,
            ins_len,
            cop_len,
            dist,
            lit_code_lens,
            ins_code_lens,
            cop_code_lens,
            dist_code_lens,
        })
    }
}

/// Count one value in a dynamic-alphabet frequency vector, growing the
/// vector so the bucket symbol is addressable.
fn bump_bucket(freqs: &mut Vec<u64>, value: u32) {
    let sym = bucket::encode(value).sym as usize;
    if freqs.len() <= sym {
        freqs.resize(sym + 1, 0);
    }
    freqs[sym] += 1;
}

/// A dynamic table's serialized lengths. Never empty; a table with no used
/// symbols serializes as the single-symbol degenerate code.
fn dynamic_lengths(table: &Huffman) -> Vec<u8> {
    let mut lengths = table.code_len.clone();
    if lengths.is_empty() {
        lengths.push(1);
    }
    lengths
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lz77::parser::{parse, Match};

    #[test]
    fn alphabets_track_used_symbols() {
        let input = b"abcabcabcabc";
        let commands = parse(input);
        let books = Codebooks::build(&commands, input).unwrap();

        // One command: "abc" then a match of len 9, distance 3. Insert
        // length 3 buckets to symbol 2, copy value 6 to symbol 3, distance
        // value 2 to symbol 2.
        assert_eq!(books.ins_code_lens.len(), 3);
        assert_eq!(books.cop_code_lens.len(), 4);
        assert_eq!(books.dist_code_lens.len(), 3);
    }

    #[test]
    fn literal_tallies_follow_context() {
        let input = b"abcabcabcabc";
        let commands = parse(input);
        let books = Codebooks::build(&commands, input).unwrap();

        // 'a' is tallied at stream start (context 3); 'b' and 'c' follow
        // letters (context 0).
        assert_eq!(books.lit[3].code_len[b'a' as usize], 1);
        assert!(books.lit[0].code_len[b'b' as usize] > 0);
        assert!(books.lit[0].code_len[b'c' as usize] > 0);
    }

    #[test]
    fn empty_stream_builds_degenerate_tables() {
        let books = Codebooks::build(&[], b"").unwrap();
        assert_eq!(books.ins_code_lens, vec![1]);
        assert_eq!(books.cop_code_lens, vec![1]);
        assert_eq!(books.dist_code_lens, vec![1]);
    }

    #[test]
    fn mismatched_stream_is_an_internal_error() {
        let commands = vec![Command {
            literals: b"x".to_vec(),
            matched: None,
        }];
        assert!(matches!(
            Codebooks::build(&commands, b"yz"),
            Err(SbroError::InternalError(
                "command stream does not reconstruct the input"
            ))
        ));
    }

    #[test]
    fn bad_distance_is_an_internal_error() {
        let commands = vec![Command {
            literals: b"a".to_vec(),
            matched: Some(Match {
                len: 3,
                distance: 5,
            }),
        }];
        assert!(matches!(
            Codebooks::build(&commands, b"a"),
            Err(SbroError::InternalError(_))
        ));
    }
}
