//! Extraction of DsDoc batches from source text
//!
//! A documentation line is any line containing the comment prefix, so
//! trailing comments after code count too. Consecutive documentation lines
//! form one batch.

/// The comment prefix DsDoc uses unless configured otherwise
pub const DEFAULT_PREFIX: &str = "//*";

/// One contiguous run of documentation lines, prefixes removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Name of the file (or other origin) the batch came from
    pub source: String,
    /// 1-based line of the first batch line in the source
    pub start_line: u32,
    pub lines: Vec<String>,
}

/// Splits source text into batches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extractor {
    prefix: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl Extractor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Every batch in `text`, in file order
    pub fn extract(&self, source: &str, text: &str) -> Vec<Batch> {
        let mut batches = Vec::new();
        let mut current: Option<Batch> = None;

        for (index, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match line.find(&self.prefix) {
                Some(at) => {
                    let content = line[at + self.prefix.len()..].trim();
                    current
                        .get_or_insert_with(|| Batch {
                            source: source.to_string(),
                            start_line: u32::try_from(index + 1).unwrap_or(u32::MAX),
                            lines: Vec::new(),
                        })
                        .lines
                        .push(content.to_string());
                }
                None => batches.extend(current.take()),
            }
        }
        batches.extend(current);
        batches
    }
}
