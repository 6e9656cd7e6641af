//! Tabular Dataset Loading
//!
//! Parses the delimited treatment-recommendation dataset into an immutable
//! store of header-keyed records. The store is built once at load time and
//! replaced wholesale on reload; matching and export both consume the same
//! snapshot.
//!
//! Two dialect modes exist. The compliant mode handles quoted fields with
//! embedded delimiters and newlines; when the compliant parser rejects the
//! input the store falls back to a naive comma split. The fallback is a
//! documented degraded mode: `mode()` reports which parser produced the
//! records, and the downgrade is logged.

use crate::error::AdvisorError;
use serde::Serialize;

/// Which dialect parser produced the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    /// Standards-compliant dialect: quoted fields may contain commas and
    /// newlines, embedded quotes are doubled
    Quoted,
    /// Naive comma split; quoting is not honored
    NaiveSplit,
}

/// One dataset row. Values are positional against the store's header
/// sequence; the count is validated at parse time.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    /// Field values in header order
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Immutable snapshot of the recommendation dataset
#[derive(Debug, Clone)]
pub struct TabularStore {
    headers: Vec<String>,
    records: Vec<Record>,
    mode: ParseMode,
}

impl TabularStore {
    /// Store with zero headers and zero records (the degraded state when the
    /// dataset resource is unavailable)
    pub fn empty() -> Self {
        Self {
            headers: Vec::new(),
            records: Vec::new(),
            mode: ParseMode::Quoted,
        }
    }

    /// Parse raw dataset text after dropping `skip_leading_lines` lines
    /// (dataset title and blank line precede the real header row).
    ///
    /// Empty input after skipping yields an empty store, not an error.
    pub fn parse(raw_text: &str, skip_leading_lines: usize) -> Self {
        let body = skip_lines(raw_text, skip_leading_lines);
        if body.trim().is_empty() {
            return Self::empty();
        }

        match Self::parse_quoted(body) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("compliant CSV parse failed, using naive split: {}", e);
                Self::parse_naive(body)
            }
        }
    }

    /// Parse with a forced dialect mode. `NaiveSplit` reproduces the
    /// degraded behavior (quoting not honored) for callers and tests that
    /// need it deterministically.
    pub fn parse_with_mode(raw_text: &str, skip_leading_lines: usize, mode: ParseMode) -> Self {
        match mode {
            ParseMode::Quoted => Self::parse(raw_text, skip_leading_lines),
            ParseMode::NaiveSplit => {
                let body = skip_lines(raw_text, skip_leading_lines);
                if body.trim().is_empty() {
                    return Self::empty();
                }
                Self::parse_naive(body)
            }
        }
    }

    /// Load the dataset from disk. Callers that must never fail (the session
    /// constructor) map the error to an empty store.
    pub fn load(path: &std::path::Path, skip_leading_lines: usize) -> Result<Self, AdvisorError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AdvisorError::DatasetUnavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self::parse(&raw, skip_leading_lines))
    }

    fn parse_quoted(text: &str) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            // Short rows fill missing trailing cells with ""; extra cells
            // beyond the header count are dropped.
            let values = (0..headers.len())
                .map(|i| row.get(i).unwrap_or("").to_string())
                .collect();
            records.push(Record { values });
        }

        Ok(Self {
            headers,
            records,
            mode: ParseMode::Quoted,
        })
    }

    fn parse_naive(text: &str) -> Self {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());

        let headers: Vec<String> = match lines.next() {
            Some(header_line) => header_line.split(',').map(str::to_string).collect(),
            None => return Self::empty(),
        };

        let records = lines
            .map(|line| {
                let cols: Vec<&str> = line.split(',').collect();
                let values = (0..headers.len())
                    .map(|i| cols.get(i).copied().unwrap_or("").to_string())
                    .collect();
                Record { values }
            })
            .collect();

        Self {
            headers,
            records,
            mode: ParseMode::NaiveSplit,
        }
    }

    /// Header sequence; order drives display and export column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Records in dataset order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Which dialect parser produced this store
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Field value of `record` under the named header
    pub fn field<'a>(&self, record: &'a Record, header: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == header)?;
        record.values.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drop the first `n` lines of `text` (newline-delimited)
fn skip_lines(text: &str, n: usize) -> &str {
    text.splitn(n + 1, '\n').nth(n).unwrap_or("")
}
