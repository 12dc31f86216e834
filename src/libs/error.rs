use std::fmt;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug)]
pub enum MatchError {
    /// A best-match search was asked to scan a corpus with no records
    EmptyCorpus,
    /// A record or query with no residues
    EmptySequence {
        /// The record name, or `query`
        name: String,
    },
    /// Input too long for the exhaustive LCS engine
    SequenceTooLong {
        /// Length of the offending sequence
        len: usize,
        /// The accepted maximum
        max: usize,
    },
    /// Malformed penalty matrix file
    MatrixFormat {
        /// The line number (1-based)
        line: usize,
        /// A human-readable message explaining the error
        message: String,
    },
    Io(std::io::Error),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::EmptyCorpus => write!(f, "The corpus contains no sequences"),
            MatchError::EmptySequence { name } => {
                write!(f, "Sequence [{}] has no residues", name)
            }
            MatchError::SequenceTooLong { len, max } => write!(
                f,
                "Sequence of length {} exceeds the exhaustive search limit of {}",
                len, max
            ),
            MatchError::MatrixFormat { line, message } => {
                write!(f, "Matrix format error at line {}: {}", line, message)
            }
            MatchError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MatchError {
    fn from(e: std::io::Error) -> Self {
        MatchError::Io(e)
    }
}
