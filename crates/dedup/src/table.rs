use crate::error::DedupError;
use crate::model::{Record, RecordSet};

/// Parse delimited text into records. The first row names the columns; data
/// rows may be shorter or longer than the header and are kept as-is.
pub fn read_records(data: &str, delimiter: u8) -> Result<RecordSet, DedupError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DedupError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DedupError::Parse(e.to_string()))?;
        records.push(Record {
            row: i + 1,
            fields: record.iter().map(|f| f.to_string()).collect(),
        });
    }

    Ok(RecordSet { headers, records })
}

/// Serialize records back to delimited text under the same header.
pub fn write_records(
    headers: &[String],
    records: &[Record],
    delimiter: u8,
) -> Result<String, DedupError> {
    if headers.is_empty() {
        return Ok(String::new());
    }

    // Rows may be ragged, so the writer must not enforce a uniform width.
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| DedupError::Io(e.to_string()))?;
    for record in records {
        writer
            .write_record(&record.fields)
            .map_err(|e| DedupError::Io(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DedupError::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DedupError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_basic() {
        let csv = "\
VendorName,ProductID
Acme Corp,P1
Globex,G7
";
        let set = read_records(csv, b',').unwrap();
        assert_eq!(set.headers, vec!["VendorName", "ProductID"]);
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].row, 1);
        assert_eq!(set.records[0].fields, vec!["Acme Corp", "P1"]);
        assert_eq!(set.records[1].row, 2);
    }

    #[test]
    fn read_preserves_raw_values() {
        let csv = "a,b\n  padded  ,007\n";
        let set = read_records(csv, b',').unwrap();
        assert_eq!(set.records[0].fields, vec!["  padded  ", "007"]);
    }

    #[test]
    fn read_ragged_rows() {
        let csv = "a,b\nonly\nx,y,extra\n";
        let set = read_records(csv, b',').unwrap();
        assert_eq!(set.records[0].fields.len(), 1);
        assert_eq!(set.records[1].fields.len(), 3);
    }

    #[test]
    fn read_quoted_delimiter() {
        let csv = "name,id\n\"Acme, Corp.\",P1\n";
        let set = read_records(csv, b',').unwrap();
        assert_eq!(set.records[0].fields[0], "Acme, Corp.");
    }

    #[test]
    fn read_empty_input() {
        let set = read_records("", b',').unwrap();
        assert!(set.headers.is_empty());
        assert!(set.records.is_empty());
    }

    #[test]
    fn read_tab_delimited() {
        let tsv = "a\tb\n1\t2\n";
        let set = read_records(tsv, b'\t').unwrap();
        assert_eq!(set.records[0].fields, vec!["1", "2"]);
    }

    #[test]
    fn write_round_trip() {
        let csv = "VendorName,ProductID\nAcme Corp,P1\n\"Acme, Corp.\",P2\n";
        let set = read_records(csv, b',').unwrap();
        let out = write_records(&set.headers, &set.records, b',').unwrap();
        assert_eq!(out, csv);
    }

    #[test]
    fn write_empty_headers_yields_empty_output() {
        let out = write_records(&[], &[], b',').unwrap();
        assert_eq!(out, "");
    }
}
