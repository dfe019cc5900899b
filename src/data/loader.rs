use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder, StringRecord};

use super::model::{Dataset, Record};
use crate::error::{ReportError, Result};

/// Fields per row: context, symbol, count.
const FIELDS_PER_ROW: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a counts file from disk.
///
/// Any failure to open the file is reported as [`ReportError::InputNotFound`];
/// parse failures come from [`load_reader`].
pub fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| ReportError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;
    log::info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse headerless `context,symbol,count` CSV from any reader.
///
/// The whole input is consumed before returning, so a bad row anywhere
/// fails the load and nothing downstream sees a partial dataset.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset> {
    // `flexible` so the field count is checked here, per row, instead of
    // against whatever the first row happened to contain.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut row = StringRecord::new();

    loop {
        match reader.read_record(&mut row) {
            Ok(true) => records.push(parse_row(&row)?),
            Ok(false) => break,
            Err(e) => return Err(classify_read_error(e)),
        }
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_row(row: &StringRecord) -> Result<Record> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    if row.len() != FIELDS_PER_ROW {
        return Err(ReportError::MalformedRow {
            line,
            reason: format!("expected {FIELDS_PER_ROW} fields, found {}", row.len()),
        });
    }

    row.deserialize::<Record>(None)
        .map_err(|e| ReportError::MalformedRow {
            line,
            reason: format!("count '{}' is not an integer ({e})", &row[2]),
        })
}

/// Invalid UTF-8 is a property of the row; anything else is an I/O problem.
fn classify_read_error(e: csv::Error) -> ReportError {
    match e.kind() {
        ErrorKind::Utf8 { pos, err } => ReportError::MalformedRow {
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            reason: format!("field {} is not valid UTF-8", err.field() + 1),
        },
        _ => ReportError::Read(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn rows_are_kept_in_file_order() {
        let input = "A,x,3\nA,y,5\nB,z,2\n";
        let ds = load_reader(input.as_bytes()).unwrap();
        assert_eq!(
            ds.records(),
            &[
                Record::new("A", "x", 3),
                Record::new("A", "y", 5),
                Record::new("B", "z", 2),
            ]
        );
    }

    #[test]
    fn empty_input_is_an_empty_dataset() {
        let ds = load_reader("".as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn negative_and_large_counts_parse() {
        let ds = load_reader("c,s,-4\nc,t,9000000000\n".as_bytes()).unwrap();
        assert_eq!(ds.records()[0].count, -4);
        assert_eq!(ds.records()[1].count, 9_000_000_000);
    }

    #[test]
    fn non_integer_count_is_malformed() {
        let err = load_reader("ctxA,sym1,abc\n".as_bytes()).unwrap_err();
        match err {
            ReportError::MalformedRow { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("abc"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fractional_count_is_malformed() {
        let err = load_reader("A,x,1.5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { .. }));
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let err = load_reader("A,x,1\nB,y\n".as_bytes()).unwrap_err();
        match err {
            ReportError::MalformedRow { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 2"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = load_reader("A,x,1,extra\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn bad_row_after_good_rows_fails_whole_load() {
        let err = load_reader("A,x,1\nA,y,2\nA,z,nope\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let input = "\"a,b\",\",\",7\n\"x\ny\",q,1\n";
        let ds = load_reader(input.as_bytes()).unwrap();
        assert_eq!(ds.records()[0], Record::new("a,b", ",", 7));
        assert_eq!(ds.records()[1], Record::new("x\ny", "q", 1));
    }

    #[test]
    fn fields_are_not_trimmed() {
        let ds = load_reader(" A , x ,3\n".as_bytes()).unwrap();
        assert_eq!(ds.records()[0], Record::new(" A ", " x ", 3));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let input: &[u8] = b"A,x,1\n\xff\xfe,y,2\n";
        let err = load_reader(input).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ab,c,4").unwrap();
        writeln!(file, "ab,d,1").unwrap();
        let ds = load(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1], Record::new("ab", "d", 1));
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context_counts.csv");
        let err = load(&path).unwrap_err();
        match err {
            ReportError::InputNotFound { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
