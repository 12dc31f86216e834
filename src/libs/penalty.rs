use crate::libs::error::{MatchError, Result};
use indexmap::IndexSet;
use itertools::Itertools;
use std::io::{BufRead, Write};

/// The gap marker, both in matrix files and in aligned output.
pub const GAP: u8 = b'*';

const BLOSUM62_AAS: &[u8; 20] = b"ARNDCQEGHILKMFPSTWYV";

#[rustfmt::skip]
const BLOSUM62: [[i32; 20]; 20] = [
    [ 4,-1,-2,-2, 0,-1,-1, 0,-2,-1,-1,-1,-1,-2,-1, 1, 0,-3,-2, 0], // A
    [-1, 5, 0,-2,-3, 1, 0,-2, 0,-3,-2, 2,-1,-3,-2,-1,-1,-3,-2,-3], // R
    [-2, 0, 6, 1,-3, 0, 0, 0, 1,-3,-3, 0,-2,-3,-2, 1, 0,-4,-2,-3], // N
    [-2,-2, 1, 6,-3, 0, 2,-1,-1,-3,-4,-1,-3,-3,-1, 0,-1,-4,-3,-3], // D
    [ 0,-3,-3,-3, 9,-3,-4,-3,-3,-1,-1,-3,-1,-2,-3,-1,-1,-2,-2,-1], // C
    [-1, 1, 0, 0,-3, 5, 2,-2, 0,-3,-2, 1, 0,-3,-1, 0,-1,-2,-1,-2], // Q
    [-1, 0, 0, 2,-4, 2, 5,-2, 0,-3,-3, 1,-2,-3,-1, 0,-1,-3,-2,-2], // E
    [ 0,-2, 0,-1,-3,-2,-2, 6,-2,-4,-4,-2,-3,-3,-2, 0,-2,-2,-3,-3], // G
    [-2, 0, 1,-1,-3, 0, 0,-2, 8,-3,-3,-1,-2,-1,-2,-1,-2,-2, 2,-3], // H
    [-1,-3,-3,-3,-1,-3,-3,-4,-3, 4, 2,-3, 1, 0,-3,-2,-1,-3,-1, 3], // I
    [-1,-2,-3,-4,-1,-2,-3,-4,-3, 2, 4,-2, 2, 0,-3,-2,-1,-2,-1, 1], // L
    [-1, 2, 0,-1,-3, 1, 1,-2,-1,-3,-2, 5,-1,-3,-1, 0,-1,-3,-2,-2], // K
    [-1,-1,-2,-3,-1, 0,-2,-3,-2, 1, 2,-1, 5, 0,-2,-1,-1,-1,-1, 1], // M
    [-2,-3,-3,-3,-2,-3,-3,-3,-1, 0, 0,-3, 0, 6,-4,-2,-2, 1, 3,-1], // F
    [-1,-2,-2,-1,-3,-1,-1,-2,-2,-3,-3,-1,-2,-4, 7,-1,-1,-4,-3,-2], // P
    [ 1,-1, 1, 0,-1, 0, 0, 0,-1,-2,-2, 0,-1,-2,-1, 4, 1,-3,-2,-2], // S
    [ 0,-1, 0,-1,-1,-1,-1,-2,-2,-1,-1,-1,-1,-2,-1, 1, 5,-2,-2, 0], // T
    [-3,-3,-4,-4,-2,-2,-3,-2,-2,-3,-2,-3,-1, 1,-4,-3,-2,11, 2,-3], // W
    [-2,-2,-2,-3,-2,-1,-2,-3, 2,-1,-1,-2,-1, 3,-3,-2,-2, 2, 7,-1], // Y
    [ 0,-3,-3,-3,-1,-2,-2,-3,-3, 3, 1,-2, 1,-1,-2,-2, 0,-3,-1, 4], // V
];

/// Substitution and gap scores for ordered pairs of bytes.
///
/// Pairs that were never set score [`PenaltyMatrix::default_penalty`]. Nothing is
/// mirrored: `set_penalty(a, b, ..)` leaves `(b, a)` untouched.
#[derive(Debug, Clone)]
pub struct PenaltyMatrix {
    matrix: Vec<Option<i32>>,
    default: i32,
    chars: IndexSet<u8>,
}

impl Default for PenaltyMatrix {
    fn default() -> Self {
        Self {
            matrix: vec![None; 256 * 256],
            default: 0,
            chars: IndexSet::new(),
        }
    }
}

impl PenaltyMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score returned for pairs that were never populated.
    pub fn with_default(mut self, default: i32) -> Self {
        self.default = default;
        self
    }

    pub fn default_penalty(&self) -> i32 {
        self.default
    }

    pub fn get_penalty(&self, c1: u8, c2: u8) -> i32 {
        self.matrix[Self::idx(c1, c2)].unwrap_or(self.default)
    }

    pub fn set_penalty(&mut self, c1: u8, c2: u8, penalty: i32) {
        self.chars.insert(c1);
        self.chars.insert(c2);
        self.matrix[Self::idx(c1, c2)] = Some(penalty);
    }

    /// Whether the pair has an explicit entry.
    pub fn contains(&self, c1: u8, c2: u8) -> bool {
        self.matrix[Self::idx(c1, c2)].is_some()
    }

    /// Characters that appear in any explicit entry, in first-seen order.
    pub fn chars(&self) -> impl Iterator<Item = u8> + '_ {
        self.chars.iter().copied()
    }

    fn idx(c1: u8, c2: u8) -> usize {
        (c1 as usize) * 256 + (c2 as usize)
    }

    /// Identity-style matrix over `alphabet`, with `gap` for every residue/gap pair.
    ///
    /// ```
    /// use seqmatch::libs::penalty::{PenaltyMatrix, GAP};
    /// let m = PenaltyMatrix::simple(b"ACDEF", 1, -1, -1);
    /// assert_eq!(m.get_penalty(b'A', b'A'), 1);
    /// assert_eq!(m.get_penalty(b'A', b'C'), -1);
    /// assert_eq!(m.get_penalty(b'A', GAP), -1);
    /// assert_eq!(m.get_penalty(GAP, b'F'), -1);
    /// assert_eq!(m.get_penalty(b'W', b'W'), 0);
    /// ```
    pub fn simple(alphabet: &[u8], match_score: i32, mismatch: i32, gap: i32) -> Self {
        let mut m = Self::new();
        for &c1 in alphabet {
            for &c2 in alphabet {
                let score = if c1 == c2 { match_score } else { mismatch };
                m.set_penalty(c1, c2, score);
            }
        }
        for &c in alphabet {
            m.set_penalty(c, GAP, gap);
            m.set_penalty(GAP, c, gap);
        }
        m
    }

    /// BLOSUM62 over the 20 standard amino acids, with `*` as the gap row/column.
    pub fn blosum62() -> Self {
        let mut m = Self::new();
        for (i, &c1) in BLOSUM62_AAS.iter().enumerate() {
            for (j, &c2) in BLOSUM62_AAS.iter().enumerate() {
                m.set_penalty(c1, c2, BLOSUM62[i][j]);
            }
            m.set_penalty(c1, GAP, -4);
        }
        for &c in BLOSUM62_AAS {
            m.set_penalty(GAP, c, -4);
        }
        m.set_penalty(GAP, GAP, 1);
        m
    }

    /// Load from name (preset) or file.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "blosum62" => Ok(Self::blosum62()),
            _ => Self::from_file(name),
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let reader = crate::reader(path)?;
        let m = Self::from_reader(reader)?;
        log::debug!(
            "Loaded penalty matrix from [{}] with {} characters",
            path,
            m.chars.len()
        );
        Ok(m)
    }

    /// Parses a matrix file.
    ///
    /// The column header is a line starting with `$` followed by the characters,
    /// e.g. `$ A R N *`. A header made only of single characters, as in NCBI
    /// matrix files, is also accepted. Every other line is a row: the row
    /// character, then one integer per header column. Lines starting with `#`
    /// are comments.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut m = Self::new();
        let mut header: Vec<u8> = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let lineno = i + 1;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('$') {
                header = rest.split_whitespace().map(|s| s.as_bytes()[0]).collect();
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if header.is_empty() {
                if parts.iter().all(|s| s.len() == 1 && s.parse::<i32>().is_err()) {
                    header = parts.iter().map(|s| s.as_bytes()[0]).collect();
                    continue;
                }
                return Err(MatchError::MatrixFormat {
                    line: lineno,
                    message: "row found before the column header".to_string(),
                });
            }

            let row_char = parts[0].as_bytes()[0];
            let values = &parts[1..];
            if values.len() > header.len() {
                return Err(MatchError::MatrixFormat {
                    line: lineno,
                    message: format!(
                        "{} values for {} columns",
                        values.len(),
                        header.len()
                    ),
                });
            }
            for (j, value) in values.iter().enumerate() {
                let penalty = value.parse::<i32>().map_err(|_| MatchError::MatrixFormat {
                    line: lineno,
                    message: format!("invalid score [{}]", value),
                })?;
                m.set_penalty(row_char, header[j], penalty);
            }
        }

        Ok(m)
    }

    /// Writes the matrix in the `$`-header layout read by [`PenaltyMatrix::from_reader`].
    pub fn to_writer(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        let chars: Vec<u8> = self.chars().collect();
        writer.write_fmt(format_args!(
            "$ {}\n",
            chars.iter().map(|&c| c as char).join(" ")
        ))?;
        for &c1 in &chars {
            writer.write_fmt(format_args!(
                "{} {}\n",
                c1 as char,
                chars.iter().map(|&c2| self.get_penalty(c1, c2)).join(" ")
            ))?;
        }
        Ok(())
    }
}
