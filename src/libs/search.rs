//! Best-match search of a query over a [`Corpus`].
//!
//! Every record is scored independently; the winner is the first record holding
//! the maximal score. The parallel variant scores records with rayon and then
//! reduces in corpus order, so both variants agree on ties.

use crate::libs::corpus::{Corpus, Sequence};
use crate::libs::error::{MatchError, Result};
use crate::libs::lcs::{check_exhaustive_len, lcs_dp, lcs_exhaustive};
use crate::libs::local::{local_alignment, Alignment, ScanMode};
use crate::libs::penalty::PenaltyMatrix;
use rayon::prelude::*;

/// Scoring strategy used for each query/record comparison.
#[derive(Debug, Clone, Copy)]
pub enum Engine<'m> {
    /// LCS length by dynamic programming
    LcsDp,
    /// LCS length by subsequence enumeration, short inputs only
    LcsExhaustive,
    /// Local alignment score, query as the first sequence
    Local {
        matrix: &'m PenaltyMatrix,
        scan: ScanMode,
    },
}

impl<'m> Engine<'m> {
    /// Validates inputs before any scoring starts.
    pub fn check(&self, corpus: &Corpus, query: &[u8]) -> Result<()> {
        if corpus.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }
        if let Engine::LcsExhaustive = self {
            check_exhaustive_len(query)?;
            for record in corpus {
                check_exhaustive_len(record.seq())?;
            }
        }
        Ok(())
    }

    /// Scores a single pair. Only the local engine yields an alignment.
    pub fn score(&self, query: &[u8], target: &[u8]) -> (i32, Option<Alignment>) {
        match self {
            Engine::LcsDp => (lcs_dp(target, query) as i32, None),
            Engine::LcsExhaustive => (lcs_exhaustive(target, query) as i32, None),
            Engine::Local { matrix, scan } => {
                let aln = local_alignment(query, target, matrix, *scan);
                (aln.score, Some(aln))
            }
        }
    }
}

/// Score of one corpus record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub index: usize,
    pub score: i32,
    pub alignment: Option<Alignment>,
}

/// The winning record, borrowed from the corpus.
#[derive(Debug, Clone)]
pub struct BestMatch<'c> {
    pub index: usize,
    pub record: &'c Sequence,
    pub score: i32,
    /// Aligned query and record fragments, local alignment only
    pub alignment: Option<Alignment>,
}

/// Scores every record, in corpus order.
pub fn score_all(corpus: &Corpus, query: &[u8], engine: &Engine) -> Result<Vec<Hit>> {
    engine.check(corpus, query)?;

    let hits = corpus
        .iter()
        .enumerate()
        .map(|(index, record)| to_hit(index, record, query, engine))
        .collect();

    Ok(hits)
}

/// Scores every record on the rayon pool; the result is in corpus order.
pub fn par_score_all(corpus: &Corpus, query: &[u8], engine: &Engine) -> Result<Vec<Hit>> {
    engine.check(corpus, query)?;

    let hits = corpus
        .records()
        .par_iter()
        .enumerate()
        .map(|(index, record)| to_hit(index, record, query, engine))
        .collect();

    Ok(hits)
}

/// Finds the best-scoring record.
///
/// ```
/// use seqmatch::libs::corpus::Corpus;
/// use seqmatch::libs::search::{best_match, Engine};
///
/// let corpus = Corpus::from_records(&[("p1", "WWAC"), ("p2", "AGCAT")]).unwrap();
/// let best = best_match(&corpus, b"GAC", &Engine::LcsDp).unwrap();
/// assert_eq!(best.record.name(), "p1");
/// assert_eq!(best.score, 2);
/// ```
pub fn best_match<'c>(corpus: &'c Corpus, query: &[u8], engine: &Engine) -> Result<BestMatch<'c>> {
    let hits = score_all(corpus, query, engine)?;
    reduce(corpus, hits)
}

/// [`best_match`] with records scored in parallel.
pub fn par_best_match<'c>(
    corpus: &'c Corpus,
    query: &[u8],
    engine: &Engine,
) -> Result<BestMatch<'c>> {
    let hits = par_score_all(corpus, query, engine)?;
    reduce(corpus, hits)
}

fn to_hit(index: usize, record: &Sequence, query: &[u8], engine: &Engine) -> Hit {
    let (score, alignment) = engine.score(query, record.seq());
    log::debug!("{}\t{}", record.name(), score);
    Hit {
        index,
        score,
        alignment,
    }
}

// Hits must be in corpus order; replacement needs a strictly greater score.
fn reduce(corpus: &Corpus, hits: Vec<Hit>) -> Result<BestMatch<'_>> {
    let mut best: Option<Hit> = None;
    for hit in hits {
        match &best {
            Some(cur) if hit.score <= cur.score => {}
            _ => best = Some(hit),
        }
    }

    let best = best.ok_or(MatchError::EmptyCorpus)?;
    let record = corpus.get(best.index).ok_or(MatchError::EmptyCorpus)?;
    log::info!(
        "Best match [{}] at index {} with score {}",
        record.name(),
        best.index,
        best.score
    );

    Ok(BestMatch {
        index: best.index,
        record,
        score: best.score,
        alignment: best.alignment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::from_records(&[("p1", "ACDE"), ("p2", "ACDF")]).unwrap()
    }

    #[test]
    fn test_local_tie_keeps_first() {
        let corpus = corpus();
        let matrix = PenaltyMatrix::simple(b"ACDEF", 1, -1, -1);
        let engine = Engine::Local {
            matrix: &matrix,
            scan: ScanMode::LastRow,
        };

        let best = best_match(&corpus, b"ACD", &engine).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.record.name(), "p1");
        assert_eq!(best.score, 3);

        let aln = best.alignment.unwrap();
        assert_eq!(aln.aligned1, "ACD");
        assert_eq!(aln.aligned2, "ACD");
    }

    #[test]
    fn test_returns_borrowed_record() {
        let corpus = corpus();
        let best = best_match(&corpus, b"CDF", &Engine::LcsDp).unwrap();
        assert_eq!(best.index, 1);
        assert!(std::ptr::eq(best.record, corpus.get(1).unwrap()));
        assert_eq!(best.score, 3);
        assert!(best.alignment.is_none());
    }

    #[test]
    fn test_all_zero_scores_pick_first() {
        let corpus = corpus();
        let best = best_match(&corpus, b"WWW", &Engine::LcsDp).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::new();
        let err = best_match(&corpus, b"ACD", &Engine::LcsDp).unwrap_err();
        assert!(matches!(err, MatchError::EmptyCorpus));

        let err = par_best_match(&corpus, b"ACD", &Engine::LcsDp).unwrap_err();
        assert!(matches!(err, MatchError::EmptyCorpus));
    }

    #[test]
    fn test_exhaustive_guard() {
        let long = "A".repeat(21);
        let corpus = Corpus::from_records(&[("short", "ACD"), ("long", long.as_str())]).unwrap();
        let err = best_match(&corpus, b"ACD", &Engine::LcsExhaustive).unwrap_err();
        assert!(matches!(err, MatchError::SequenceTooLong { len: 21, .. }));

        let corpus = corpus_short();
        let err = best_match(&corpus, long.as_bytes(), &Engine::LcsExhaustive).unwrap_err();
        assert!(matches!(err, MatchError::SequenceTooLong { .. }));
    }

    fn corpus_short() -> Corpus {
        Corpus::from_records(&[("a", "AGCAT"), ("b", "GGAC"), ("c", "TTT")]).unwrap()
    }

    #[test]
    fn test_engines_agree_on_lcs() {
        let corpus = corpus_short();
        let dp = best_match(&corpus, b"GAC", &Engine::LcsDp).unwrap();
        let ex = best_match(&corpus, b"GAC", &Engine::LcsExhaustive).unwrap();
        assert_eq!(dp.index, ex.index);
        assert_eq!(dp.score, ex.score);
        assert_eq!(dp.record.name(), "b");
        assert_eq!(dp.score, 3);

        let hits = score_all(&corpus, b"GAC", &Engine::LcsDp).unwrap();
        let scores: Vec<i32> = hits.iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![2, 3, 0]);
    }

    #[test]
    fn test_parallel_is_deterministic() {
        let mut records = vec![];
        for i in 0..64 {
            // every fourth record ties for the top score
            let seq = if i % 4 == 1 { "MKVLAAGW" } else { "MKVQQQQQ" };
            records.push((format!("s{}", i), seq.to_string()));
        }
        let refs: Vec<(&str, &str)> = records
            .iter()
            .map(|(n, s)| (n.as_str(), s.as_str()))
            .collect();
        let corpus = Corpus::from_records(&refs).unwrap();

        let matrix = PenaltyMatrix::blosum62();
        let engine = Engine::Local {
            matrix: &matrix,
            scan: ScanMode::FullTable,
        };

        let serial = best_match(&corpus, b"KVLAAG", &engine).unwrap();
        for _ in 0..5 {
            let parallel = par_best_match(&corpus, b"KVLAAG", &engine).unwrap();
            assert_eq!(parallel.index, serial.index);
            assert_eq!(parallel.score, serial.score);
            assert_eq!(parallel.alignment, serial.alignment);
        }
        assert_eq!(serial.record.name(), "s1");

        assert_eq!(
            par_score_all(&corpus, b"KVLAAG", &engine).unwrap(),
            score_all(&corpus, b"KVLAAG", &engine).unwrap()
        );
    }
}
