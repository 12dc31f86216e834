use crate::libs::error::{MatchError, Result};

/// A named residue string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    description: Option<String>,
    seq: Vec<u8>,
}

impl Sequence {
    /// Fails if `seq` is empty.
    pub fn new(name: &str, seq: &[u8]) -> Result<Self> {
        if seq.is_empty() {
            return Err(MatchError::EmptySequence {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            description: None,
            seq: seq.to_vec(),
        })
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Reference sequences in load order.
///
/// Order matters: best-match scans break ties in favor of the earliest record.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<Sequence>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Sequence) {
        self.records.push(record);
    }

    /// Builds a corpus from `(name, residues)` pairs.
    ///
    /// ```
    /// use seqmatch::libs::corpus::Corpus;
    /// let corpus = Corpus::from_records(&[("p1", "ACDE"), ("p2", "ACDF")]).unwrap();
    /// assert_eq!(corpus.len(), 2);
    /// assert_eq!(corpus.get(1).unwrap().name(), "p2");
    ///
    /// assert!(Corpus::from_records(&[("p1", "")]).is_err());
    /// ```
    pub fn from_records(records: &[(&str, &str)]) -> Result<Self> {
        let mut corpus = Self::new();
        for (name, seq) in records {
            corpus.push(Sequence::new(name, seq.as_bytes())?);
        }
        Ok(corpus)
    }

    /// Loads all records of a FASTA file. `stdin` and `.gz` are accepted.
    pub fn from_path(infile: &str) -> Result<Self> {
        let reader = crate::reader(infile)?;
        let mut fa_in = noodles_fasta::io::Reader::new(reader);

        let mut corpus = Self::new();
        for result in fa_in.records() {
            let record = result?;
            let name = String::from_utf8_lossy(record.name().as_ref()).into_owned();
            let mut sequence = Sequence::new(&name, record.sequence().as_ref())?;
            if let Some(desc) = record.description() {
                sequence = sequence.with_description(&String::from_utf8_lossy(desc.as_ref()));
            }
            corpus.push(sequence);
        }
        log::info!("Loaded {} sequences from [{}]", corpus.len(), infile);

        Ok(corpus)
    }

    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Sequence] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
