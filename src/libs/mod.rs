pub mod corpus;
pub mod error;
pub mod io;
pub mod lcs;
pub mod local;
pub mod penalty;
pub mod search;

pub use corpus::{Corpus, Sequence};
pub use error::MatchError;
pub use local::{Alignment, ScanMode};
pub use penalty::PenaltyMatrix;
pub use search::{BestMatch, Engine, Hit};
