use std::collections::HashMap;

use log::debug;

/// Sliding window the parser may reference back into.
pub const WINDOW_SIZE: usize = 32 * 1024;
/// Shortest back-reference worth emitting.
pub const MIN_MATCH: usize = 3;
/// How many prior occurrences of a trigram are tried per position.
const MAX_CANDIDATES: usize = 64;
/// A match this long ends the candidate search early.
const GOOD_MATCH: usize = 258;

/// A back-reference: copy `len` bytes starting `distance` bytes back in the
/// reconstructed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub len: u32,
    pub distance: u32,
}

/// One unit of the parse: a literal run (possibly empty) and an optional
/// back-reference. Only the final command may lack a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub literals: Vec<u8>,
    pub matched: Option<Match>,
}

/// Greedily parse `input` into a command stream.
pub fn parse(input: &[u8]) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut literals: Vec<u8> = Vec::with_capacity(256);
    let mut table: HashMap<u32, Vec<u32>> = HashMap::with_capacity(input.len() / 4 + 1);

    let n = input.len();
    let mut i = 0;
    while i < n {
        let mut best_len = 0_usize;
        let mut best_dist = 0_usize;

        if i + MIN_MATCH <= n {
            if let Some(candidates) = table.get(&trigram(input, i)) {
                let max_len = (n - i).min(WINDOW_SIZE);
                // Newest first, so a tie in length lands on the closest
                // (cheapest) distance.
                for &pos in candidates.iter().rev().take(MAX_CANDIDATES) {
                    let pos = pos as usize;
                    let distance = i - pos;
                    if distance == 0 || distance > WINDOW_SIZE {
                        continue;
                    }
                    let mut len = 0;
                    while len < max_len && input[pos + len] == input[i + len] {
                        len += 1;
                    }
                    if len >= MIN_MATCH && len > best_len {
                        best_len = len;
                        best_dist = distance;
                        if len >= GOOD_MATCH {
                            break;
                        }
                    }
                }
            }
        }

        if best_len >= MIN_MATCH {
            commands.push(Command {
                literals: std::mem::take(&mut literals),
                matched: Some(Match {
                    len: best_len as u32,
                    distance: best_dist as u32,
                }),
            });
            for consumed in i..i + best_len {
                insert_trigram(&mut table, input, consumed);
            }
            i += best_len;
        } else {
            literals.push(input[i]);
            insert_trigram(&mut table, input, i);
            i += 1;
        }
    }

    if !literals.is_empty() {
        commands.push(Command {
            literals,
            matched: None,
        });
    }

    debug!("parsed {} bytes into {} commands", n, commands.len());
    commands
}

fn trigram(input: &[u8], pos: usize) -> u32 {
    (u32::from(input[pos]) << 16) | (u32::from(input[pos + 1]) << 8) | u32::from(input[pos + 2])
}

/// Record `pos` as an occurrence of its trigram. Buckets that outgrow four
/// times the candidate cap are trimmed from the front to twice the cap,
/// which bounds memory while keeping the newest, best-locality entries.
fn insert_trigram(table: &mut HashMap<u32, Vec<u32>>, input: &[u8], pos: usize) {
    if pos + MIN_MATCH > input.len() {
        return;
    }
    let bucket = table.entry(trigram(input, pos)).or_default();
    bucket.push(pos as u32);
    if bucket.len() > MAX_CANDIDATES * 4 {
        let excess = bucket.len() - MAX_CANDIDATES * 2;
        bucket.drain(..excess);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Replay a command stream against an empty buffer.
    fn replay(commands: &[Command]) -> Vec<u8> {
        let mut out = Vec::new();
        for cmd in commands {
            out.extend_from_slice(&cmd.literals);
            if let Some(m) = &cmd.matched {
                let start = out.len() - m.distance as usize;
                for k in 0..m.len as usize {
                    out.push(out[start + k]);
                }
            }
        }
        out
    }

    #[test]
    fn empty_input_yields_no_commands() {
        assert!(parse(b"").is_empty());
    }

    #[test]
    fn short_input_is_one_literal_run() {
        let commands = parse(b"ab");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].literals, b"ab");
        assert!(commands[0].matched.is_none());
    }

    #[test]
    fn repeated_trigram_becomes_a_match() {
        let commands = parse(b"abcabcabcabc");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].literals, b"abc");
        assert_eq!(
            commands[0].matched,
            Some(Match {
                len: 9,
                distance: 3
            })
        );
    }

    #[test]
    fn run_of_one_byte_self_overlaps() {
        let input = vec![0_u8; 1000];
        let commands = parse(&input);
        assert_eq!(replay(&commands), input);
        let m = commands[0].matched.as_ref().unwrap();
        assert_eq!(m.distance, 1);
        assert!(m.len >= 900);
    }

    #[test]
    fn replay_reproduces_mixed_input() {
        let mut input = Vec::new();
        for i in 0..2000_u32 {
            input.extend_from_slice(format!("line {} of the log\n", i % 37).as_bytes());
        }
        let commands = parse(&input);
        assert_eq!(replay(&commands), input);
    }

    #[test]
    fn matches_never_reach_past_the_window() {
        let mut input = vec![0x55_u8; 8];
        input.extend(std::iter::repeat(0xAA_u8).take(WINDOW_SIZE + 100));
        input.extend_from_slice(&[0x55; 8]);
        let commands = parse(&input);
        assert_eq!(replay(&commands), input);
        for cmd in &commands {
            if let Some(m) = &cmd.matched {
                assert!(m.distance as usize <= WINDOW_SIZE);
                assert!(m.len as usize <= WINDOW_SIZE);
            }
        }
    }

    #[test]
    fn trimmed_buckets_still_reconstruct() {
        // One trigram repeated far past the trim threshold.
        let input = vec![b'z'; 300_000];
        let commands = parse(&input);
        assert_eq!(replay(&commands), input);
    }
}
