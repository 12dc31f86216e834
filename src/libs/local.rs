//! Smith-Waterman-style local alignment under a [`PenaltyMatrix`].
//!
//! Linear gap costs come from the matrix itself: `penalty(c, GAP)` for a residue
//! of the first sequence against a gap, `penalty(GAP, c)` for the reverse.

use crate::libs::penalty::{PenaltyMatrix, GAP};

/// Which predecessor produced a cell's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Start of an alignment, or a base row/column cell
    #[default]
    None,
    Up,
    Left,
    Diag,
}

/// Where to look for the cell an alignment ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Only the last row, i.e. alignments that consume the end of the first sequence
    #[default]
    LastRow,
    /// Every cell, classic Smith-Waterman
    FullTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    pub score: i32,
    /// Aligned fragment of the first sequence, `*` for gaps
    pub aligned1: String,
    /// Aligned fragment of the second sequence, `*` for gaps
    pub aligned2: String,
    /// Half-open residue range of the first sequence covered by the alignment
    pub range1: (usize, usize),
    /// Half-open residue range of the second sequence covered by the alignment
    pub range2: (usize, usize),
}

/// DP scores and backtrace pointers, both `(n + 1) x (m + 1)`.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    pub scores: Vec<Vec<i32>>,
    pub trace: Vec<Vec<Direction>>,
}

/// Fills the score and backtrace tables.
///
/// Scores are floored at zero. When several predecessors share the maximum,
/// `Left` is preferred, then `Diag`, then `Up`. A cell scoring exactly zero
/// keeps `Direction::None`.
pub fn fill_tables(s1: &[u8], s2: &[u8], matrix: &PenaltyMatrix) -> ScoreTable {
    let n = s1.len();
    let m = s2.len();

    let mut scores = vec![vec![0i32; m + 1]; n + 1];
    let mut trace = vec![vec![Direction::None; m + 1]; n + 1];

    for i in 1..=n {
        let c1 = s1[i - 1];
        for j in 1..=m {
            let c2 = s2[j - 1];
            let up = scores[i - 1][j] + matrix.get_penalty(c1, GAP);
            let left = scores[i][j - 1] + matrix.get_penalty(GAP, c2);
            let diag = scores[i - 1][j - 1] + matrix.get_penalty(c1, c2);

            let best = up.max(left).max(diag);
            if best > 0 {
                scores[i][j] = best;
                trace[i][j] = if left == best {
                    Direction::Left
                } else if diag == best {
                    Direction::Diag
                } else {
                    Direction::Up
                };
            }
        }
    }

    ScoreTable { scores, trace }
}

/// Locates the highest-scoring cell, returning `(score, i, j)`.
///
/// Only strictly greater scores replace the current best, so the first cell in
/// scan order wins ties. With no positive cell the score is 0 and the cell is a
/// base cell whose backtrace is empty.
pub fn best_cell(table: &ScoreTable, scan: ScanMode) -> (i32, usize, usize) {
    let n = table.scores.len() - 1;

    match scan {
        ScanMode::LastRow => {
            let mut best = (0, n, 0);
            for (j, &score) in table.scores[n].iter().enumerate().skip(1) {
                if score > best.0 {
                    best = (score, n, j);
                }
            }
            best
        }
        ScanMode::FullTable => {
            let mut best = (0, 0, 0);
            for (i, row) in table.scores.iter().enumerate().skip(1) {
                for (j, &score) in row.iter().enumerate().skip(1) {
                    if score > best.0 {
                        best = (score, i, j);
                    }
                }
            }
            best
        }
    }
}

/// Follows backtrace pointers from `(i, j)` until a `None` cell.
///
/// Returns the two aligned fragments, in sequence order, and the cell the walk
/// stopped at.
pub fn traceback(
    trace: &[Vec<Direction>],
    s1: &[u8],
    s2: &[u8],
    mut i: usize,
    mut j: usize,
) -> (Vec<u8>, Vec<u8>, (usize, usize)) {
    let mut aligned1 = vec![];
    let mut aligned2 = vec![];

    loop {
        match trace[i][j] {
            Direction::Up => {
                aligned1.push(s1[i - 1]);
                aligned2.push(GAP);
                i -= 1;
            }
            Direction::Left => {
                aligned1.push(GAP);
                aligned2.push(s2[j - 1]);
                j -= 1;
            }
            Direction::Diag => {
                aligned1.push(s1[i - 1]);
                aligned2.push(s2[j - 1]);
                i -= 1;
                j -= 1;
            }
            Direction::None => break,
        }
    }

    // built from the end backwards
    aligned1.reverse();
    aligned2.reverse();

    (aligned1, aligned2, (i, j))
}

/// Best local alignment of `s1` against `s2`.
///
/// ```
/// use seqmatch::libs::local::{local_alignment, ScanMode};
/// use seqmatch::libs::penalty::PenaltyMatrix;
///
/// let matrix = PenaltyMatrix::simple(b"ACDEF", 1, -1, -1);
/// let aln = local_alignment(b"ACD", b"ACDE", &matrix, ScanMode::LastRow);
/// assert_eq!(aln.score, 3);
/// assert_eq!(aln.aligned1, "ACD");
/// assert_eq!(aln.aligned2, "ACD");
/// ```
pub fn local_alignment(
    s1: &[u8],
    s2: &[u8],
    matrix: &PenaltyMatrix,
    scan: ScanMode,
) -> Alignment {
    let table = fill_tables(s1, s2, matrix);
    let (score, end_i, end_j) = best_cell(&table, scan);
    let (aligned1, aligned2, (start_i, start_j)) =
        traceback(&table.trace, s1, s2, end_i, end_j);

    Alignment {
        score,
        aligned1: String::from_utf8_lossy(&aligned1).into_owned(),
        aligned2: String::from_utf8_lossy(&aligned2).into_owned(),
        range1: (start_i, end_i),
        range2: (start_j, end_j),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn strip_gaps(s: &str) -> Vec<u8> {
        s.bytes().filter(|&c| c != GAP).collect()
    }

    #[test]
    fn test_prefix_match() {
        let matrix = PenaltyMatrix::simple(b"ACDEF", 1, -1, -1);

        let aln = local_alignment(b"ACD", b"ACDF", &matrix, ScanMode::LastRow);
        assert_eq!(aln.score, 3);
        assert_eq!(aln.aligned1, "ACD");
        assert_eq!(aln.aligned2, "ACD");
        assert_eq!(aln.range1, (0, 3));
        assert_eq!(aln.range2, (0, 3));
    }

    #[test]
    fn test_alignment_with_gap() {
        let matrix = PenaltyMatrix::simple(b"ACDE", 2, -1, -1);

        let aln = local_alignment(b"ACDE", b"ACE", &matrix, ScanMode::LastRow);
        assert_eq!(aln.score, 5);
        assert_eq!(aln.aligned1, "ACDE");
        assert_eq!(aln.aligned2, "AC*E");
    }

    #[test]
    fn test_no_positive_pair() {
        let matrix = PenaltyMatrix::simple(b"ACDW", 1, -1, -1);

        for scan in [ScanMode::LastRow, ScanMode::FullTable] {
            let aln = local_alignment(b"WWW", b"ACD", &matrix, scan);
            assert_eq!(aln.score, 0);
            assert_eq!(aln.aligned1, "");
            assert_eq!(aln.aligned2, "");
        }

        let aln = local_alignment(b"", b"ACD", &matrix, ScanMode::LastRow);
        assert_eq!(aln, Alignment::default());
    }

    #[test]
    fn test_last_row_vs_full_table() {
        let matrix = PenaltyMatrix::simple(b"ACDW", 1, -1, -1);

        // the match sits above the last row
        let aln = local_alignment(b"ACDWWW", b"ACD", &matrix, ScanMode::LastRow);
        assert_eq!(aln.score, 0);
        assert_eq!(aln.aligned1, "");

        let aln = local_alignment(b"ACDWWW", b"ACD", &matrix, ScanMode::FullTable);
        assert_eq!(aln.score, 3);
        assert_eq!(aln.aligned1, "ACD");
        assert_eq!(aln.aligned2, "ACD");
        assert_eq!(aln.range1, (0, 3));
    }

    #[test]
    fn test_tie_break_prefers_left_then_diag() {
        let matrix = PenaltyMatrix::simple(b"A", 1, -1, 0);

        // (1, 2): left = 1, diag = 1
        let table = fill_tables(b"A", b"AA", &matrix);
        assert_eq!(table.trace[1][1], Direction::Diag);
        assert_eq!(table.trace[1][2], Direction::Left);

        let (a1, a2, start) = traceback(&table.trace, b"A", b"AA", 1, 2);
        assert_eq!(a1, b"A*".to_vec());
        assert_eq!(a2, b"AA".to_vec());
        assert_eq!(start, (0, 0));

        // (2, 1): up = 1, diag = 1
        let table = fill_tables(b"AA", b"A", &matrix);
        assert_eq!(table.trace[2][1], Direction::Diag);
    }

    #[test]
    fn test_zero_cells_have_no_direction() {
        let matrix = PenaltyMatrix::simple(b"AC", 1, -1, -1);
        let table = fill_tables(b"AC", b"CA", &matrix);

        for (i, row) in table.scores.iter().enumerate() {
            for (j, &score) in row.iter().enumerate() {
                assert!(score >= 0);
                if score == 0 {
                    assert_eq!(table.trace[i][j], Direction::None);
                }
            }
        }
    }

    #[test]
    fn test_random_alignments_are_well_formed() {
        let matrix = PenaltyMatrix::blosum62();
        let alphabet = b"ARNDCQEGHILKMFPSTWYV";
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..100 {
            let n = rng.gen_range(0..30);
            let m = rng.gen_range(0..30);
            let s1: Vec<u8> = (0..n).map(|_| alphabet[rng.gen_range(0..20)]).collect();
            let s2: Vec<u8> = (0..m).map(|_| alphabet[rng.gen_range(0..20)]).collect();

            for scan in [ScanMode::LastRow, ScanMode::FullTable] {
                let aln = local_alignment(&s1, &s2, &matrix, scan);
                assert!(aln.score >= 0);
                assert_eq!(aln.aligned1.len(), aln.aligned2.len());
                assert_eq!(strip_gaps(&aln.aligned1), s1[aln.range1.0..aln.range1.1].to_vec());
                assert_eq!(strip_gaps(&aln.aligned2), s2[aln.range2.0..aln.range2.1].to_vec());
            }
        }
    }
}
