//! Longest common subsequence length.
//!
//! [`lcs_dp`] is the production engine. [`lcs_exhaustive`] enumerates every
//! subsequence of both inputs and exists to cross-check the DP on short inputs.

use crate::libs::error::{MatchError, Result};
use std::collections::HashSet;

/// Longest input accepted by the exhaustive engine.
///
/// Work and memory grow as `2^n + 2^m`; at 20 residues each side already holds
/// about a million subsequences.
pub const EXHAUSTIVE_MAX_LEN: usize = 20;

/// LCS length by dynamic programming, O(n·m) time and space.
///
/// ```
/// use seqmatch::libs::lcs::lcs_dp;
/// assert_eq!(lcs_dp(b"AGCAT", b"GAC"), 2);
/// assert_eq!(lcs_dp(b"ACDE", b""), 0);
/// ```
pub fn lcs_dp(s1: &[u8], s2: &[u8]) -> usize {
    let n = s1.len();
    let m = s2.len();

    // row/column 0 are the empty prefixes
    let mut d = vec![vec![0usize; m + 1]; n + 1];

    for i in 1..=n {
        for j in 1..=m {
            let up = d[i - 1][j];
            let left = d[i][j - 1];
            let mut diag = d[i - 1][j - 1];
            if s1[i - 1] == s2[j - 1] {
                diag += 1;
            }
            d[i][j] = up.max(left).max(diag);
        }
    }

    d[n][m]
}

/// All `2^n` subsequences of `seq`, the empty one included.
///
/// Bit `j` of the enumeration index selects `seq[j]`.
pub fn all_subsequences(seq: &[u8]) -> Vec<Vec<u8>> {
    let total: usize = 1 << seq.len();
    let mut subsequences = Vec::with_capacity(total);

    for bits in 0..total {
        let subseq: Vec<u8> = seq
            .iter()
            .enumerate()
            .filter(|(j, _)| (bits >> j) & 1 == 1)
            .map(|(_, &c)| c)
            .collect();
        subsequences.push(subseq);
    }

    subsequences
}

/// LCS length by brute force.
///
/// No length check is made here; callers gate inputs with [`check_exhaustive_len`].
///
/// ```
/// use seqmatch::libs::lcs::{lcs_dp, lcs_exhaustive};
/// assert_eq!(lcs_exhaustive(b"AGCAT", b"GAC"), lcs_dp(b"AGCAT", b"GAC"));
/// ```
pub fn lcs_exhaustive(s1: &[u8], s2: &[u8]) -> usize {
    let subseqs1: HashSet<Vec<u8>> = all_subsequences(s1).into_iter().collect();

    all_subsequences(s2)
        .iter()
        .filter(|s| subseqs1.contains(*s))
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
}

/// Rejects sequences too long for [`lcs_exhaustive`].
pub fn check_exhaustive_len(seq: &[u8]) -> Result<()> {
    if seq.len() > EXHAUSTIVE_MAX_LEN {
        return Err(MatchError::SequenceTooLong {
            len: seq.len(),
            max: EXHAUSTIVE_MAX_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_lcs_dp() {
        assert_eq!(lcs_dp(b"AGCAT", b"GAC"), 2);
        assert_eq!(lcs_dp(b"ABCBDAB", b"BDCABA"), 4);
        assert_eq!(lcs_dp(b"ACDEFGHIK", b"ACDEFGHIK"), 9);
        assert_eq!(lcs_dp(b"", b"ACD"), 0);
        assert_eq!(lcs_dp(b"", b""), 0);
        assert_eq!(lcs_dp(b"AAAA", b"CCCC"), 0);
    }

    #[test]
    fn test_all_subsequences() {
        let subs = all_subsequences(b"ABC");
        assert_eq!(subs.len(), 8);
        assert_eq!(subs[0], b"".to_vec());
        assert_eq!(subs[5], b"AC".to_vec());
        assert_eq!(subs[7], b"ABC".to_vec());

        assert_eq!(all_subsequences(b""), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_lcs_exhaustive() {
        assert_eq!(lcs_exhaustive(b"AGCAT", b"GAC"), 2);
        assert_eq!(lcs_exhaustive(b"ABCBDAB", b"BDCABA"), 4);
        assert_eq!(lcs_exhaustive(b"ACD", b""), 0);
        assert_eq!(lcs_exhaustive(b"WWW", b"YYY"), 0);
    }

    #[test]
    fn test_dp_matches_exhaustive_on_random_input() {
        let mut rng = SmallRng::seed_from_u64(42);
        let alphabet = b"ACGT";

        for _ in 0..200 {
            let n = rng.gen_range(0..=9);
            let m = rng.gen_range(0..=9);
            let s1: Vec<u8> = (0..n)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            let s2: Vec<u8> = (0..m)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();

            assert_eq!(
                lcs_dp(&s1, &s2),
                lcs_exhaustive(&s1, &s2),
                "{:?} vs {:?}",
                String::from_utf8_lossy(&s1),
                String::from_utf8_lossy(&s2)
            );
        }
    }

    #[test]
    fn test_check_exhaustive_len() {
        assert!(check_exhaustive_len(&[b'A'; EXHAUSTIVE_MAX_LEN]).is_ok());
        match check_exhaustive_len(&[b'A'; EXHAUSTIVE_MAX_LEN + 1]) {
            Err(MatchError::SequenceTooLong { len, max }) => {
                assert_eq!(len, 21);
                assert_eq!(max, 20);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
