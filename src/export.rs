//! Recommendation Export
//!
//! Serializes the current recommendation rows back to delimited text for
//! download. The output carries a UTF-8 byte-order marker so spreadsheet
//! tools pick the right encoding, and fields are quoted only when they
//! contain a comma, a quote, or a newline (embedded quotes doubled).

use chrono::NaiveDate;

use crate::data::Record;
use crate::error::AdvisorError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encode headers plus rows as BOM-prefixed CSV bytes.
///
/// Empty `rows` is a caller-level precondition violation ("nothing to
/// export"); no bytes are produced.
pub fn encode(headers: &[String], rows: &[Record]) -> Result<Vec<u8>, AdvisorError> {
    if rows.is_empty() {
        return Err(AdvisorError::NothingToExport);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| AdvisorError::Export(e.to_string()))?;
    for row in rows {
        writer
            .write_record(row.values())
            .map_err(|e| AdvisorError::Export(e.to_string()))?;
    }

    let mut body = writer
        .into_inner()
        .map_err(|e| AdvisorError::Export(e.to_string()))?;
    // Rows are newline-joined, no trailing terminator
    if body.last() == Some(&b'\n') {
        body.pop();
    }

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Download filename: `<prefix>_<first token of the predicted label>_<ISO date>.csv`
pub fn export_filename(prefix: &str, predicted_label: &str, date: NaiveDate) -> String {
    let token = predicted_label
        .split_whitespace()
        .next()
        .unwrap_or(predicted_label);
    format!("{}_{}_{}.csv", prefix, token, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TabularStore;

    fn rows_from(raw: &str) -> (Vec<String>, Vec<Record>) {
        let store = TabularStore::parse(raw, 0);
        (store.headers().to_vec(), store.records().to_vec())
    }

    #[test]
    fn test_encode_plain_rows() {
        let (headers, rows) = rows_from("작물,병해,약제\n고추,탄저병,약제A\n");
        let bytes = encode(&headers, &rows).unwrap();

        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert_eq!(text, "작물,병해,약제\n고추,탄저병,약제A");
    }

    #[test]
    fn test_field_with_comma_is_quoted() {
        let (headers, rows) = rows_from("h1,h2\n\"a,b\",c\n");
        let bytes = encode(&headers, &rows).unwrap();
        let text = std::str::from_utf8(&bytes[3..]).unwrap();

        assert_eq!(text, "h1,h2\n\"a,b\",c");
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        let (headers, rows) = rows_from("h\n\"say \"\"hi\"\"\"\n");
        let bytes = encode(&headers, &rows).unwrap();
        let text = std::str::from_utf8(&bytes[3..]).unwrap();

        assert_eq!(text, "h\n\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_quoting_round_trips() {
        // A comma-bearing field, encoded then split naively on commas
        // outside quotes, reconstructs to the original value
        let original = "약제A, 약제B";
        let (headers, rows) = rows_from(&format!("h1,h2\n\"{}\",x\n", original));
        let bytes = encode(&headers, &rows).unwrap();
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        let data_row = text.lines().nth(1).unwrap();

        let fields = split_outside_quotes(data_row);
        assert_eq!(fields, vec![original.to_string(), "x".to_string()]);
    }

    #[test]
    fn test_empty_rows_rejected() {
        let headers = vec!["h".to_string()];
        let err = encode(&headers, &[]);

        assert!(matches!(err, Err(AdvisorError::NothingToExport)));
    }

    #[test]
    fn test_filename_uses_first_label_token() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        assert_eq!(
            export_filename("권장농약", "탄저병 (97.2%)", date),
            "권장농약_탄저병_2026-08-30.csv"
        );
        assert_eq!(
            export_filename("권장농약", "역병", date),
            "권장농약_역병_2026-08-30.csv"
        );
    }

    // Minimal quote-aware splitter for the round-trip property only
    fn split_outside_quotes(row: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = row.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        fields.push(current);
        fields
    }
}
