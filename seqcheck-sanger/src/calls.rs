//! Per-position call tables written by the trace decoder.
//!
//! Each non-comment row describes one called peak. The fields used here are
//! the secondary base call (column 3), its quality (column 9), the scan
//! position (column 17) and the base position index (last column). Several
//! rows sharing a position index are evidence of a heterozygous call.

use std::io::BufRead;
use std::path::Path;

use serde::Serialize;

use seqcheck_core::utils::get_dynamic_reader;

use crate::consts::{
    CALL_SEPARATOR, CALL_TABLE_COMMENT, MIN_CALL_TABLE_FIELDS, QUALITY_FIELD,
    SCAN_POSITION_FIELD, SECONDARY_CALL_FIELD,
};
use crate::error::{Result, SangerError};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PositionCallRecord {
    pub secondary_call: String,
    pub quality: String,
    pub scan_position: String,
    pub position_index: i64,
}

impl PositionCallRecord {
    ///
    /// Parse one whitespace separated row.
    ///
    /// # Arguments
    /// - line: the row
    /// - line_number: 1-based, for error messages
    ///
    pub fn parse(line: &str, line_number: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() < MIN_CALL_TABLE_FIELDS {
            return Err(SangerError::MalformedCallRecord {
                line: line_number,
                reason: format!(
                    "expected at least {} fields, found {}",
                    MIN_CALL_TABLE_FIELDS,
                    fields.len()
                ),
            });
        }

        // guarded by the length check above
        let index_field = fields[fields.len() - 1];
        let position_index =
            index_field
                .parse::<i64>()
                .map_err(|_| SangerError::MalformedCallRecord {
                    line: line_number,
                    reason: format!("position index '{}' is not an integer", index_field),
                })?;

        Ok(PositionCallRecord {
            secondary_call: fields[SECONDARY_CALL_FIELD].to_string(),
            quality: fields[QUALITY_FIELD].to_string(),
            scan_position: fields[SCAN_POSITION_FIELD].to_string(),
            position_index,
        })
    }
}

///
/// All rows of a call table, in file order.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallTable {
    pub records: Vec<PositionCallRecord>,
}

impl CallTable {
    ///
    /// Read a call table, skipping blank lines and `#` comments.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut records = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with(CALL_TABLE_COMMENT) {
                continue;
            }
            records.push(PositionCallRecord::parse(&line, i + 1)?);
        }

        Ok(CallTable { records })
    }

    ///
    /// Read a call table from disk (plain or gzip'd).
    ///
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = get_dynamic_reader(path.as_ref())?;
        Self::from_reader(reader)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    ///
    /// Secondary calls recorded at `target_index`, `/`-joined in table order.
    ///
    pub fn het_call(&self, target_index: i64) -> String {
        extract_het_call(self, target_index)
    }
}

///
/// Join the secondary calls of every record at `target_index` with `/`.
///
/// An empty string means the table holds no record at that index, which is
/// the common case for homozygous positions.
///
pub fn extract_het_call(call_table: &CallTable, target_index: i64) -> String {
    call_table
        .records
        .iter()
        .filter(|record| record.position_index == target_index)
        .map(|record| record.secondary_call.as_str())
        .collect::<Vec<&str>>()
        .join(CALL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::path::PathBuf;

    fn record(call: &str, index: i64) -> PositionCallRecord {
        PositionCallRecord {
            secondary_call: call.to_string(),
            quality: "40".to_string(),
            scan_position: "1000".to_string(),
            position_index: index,
        }
    }

    fn row(call: &str, quality: u32, scan: u32, index: i64) -> String {
        let mut fields: Vec<String> = (0..20).map(|i| format!("f{}", i)).collect();
        fields[SECONDARY_CALL_FIELD] = call.to_string();
        fields[QUALITY_FIELD] = quality.to_string();
        fields[SCAN_POSITION_FIELD] = scan.to_string();
        fields[19] = index.to_string();
        fields.join(" ")
    }

    #[fixture]
    fn call_table() -> CallTable {
        CallTable {
            records: vec![record("A", 10), record("T", 10), record("G", 15)],
        }
    }

    #[rstest]
    fn test_het_call(call_table: CallTable) {
        assert_eq!(extract_het_call(&call_table, 10), "A/T");
        assert_eq!(call_table.het_call(15), "G");
        assert_eq!(call_table.het_call(20), "");
    }

    #[rstest]
    fn test_het_call_empty_table() {
        assert_eq!(CallTable::default().het_call(1), "");
    }

    #[rstest]
    fn test_parse_row() {
        let record = PositionCallRecord::parse(&row("R", 37, 5120, 211), 1).unwrap();
        assert_eq!(record.secondary_call, "R");
        assert_eq!(record.quality, "37");
        assert_eq!(record.scan_position, "5120");
        assert_eq!(record.position_index, 211);
    }

    #[rstest]
    fn test_from_reader_skips_comments() {
        let text = format!(
            "# call table\n{}\n\n{}\n# trailing\n{}\n",
            row("A", 40, 100, 3),
            row("G", 12, 104, 3),
            row("C", 50, 130, 4)
        );
        let table = CallTable::from_reader(text.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.het_call(3), "A/G");
        assert_eq!(table.het_call(4), "C");
    }

    #[rstest]
    fn test_tabs_and_repeated_spaces() {
        let text = row("T", 20, 10, 8).replace(' ', "\t  ");
        let table = CallTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.het_call(8), "T");
    }

    #[rstest]
    fn test_short_row() {
        let result = CallTable::from_reader("a b c\n".as_bytes());
        assert!(matches!(
            result,
            Err(SangerError::MalformedCallRecord { line: 1, .. })
        ));
    }

    #[rstest]
    fn test_non_integer_index() {
        let text = format!("# header\n{}", row("A", 1, 1, 0).replace(" 0", " x"));
        let result = CallTable::from_reader(text.as_bytes());
        assert!(matches!(
            result,
            Err(SangerError::MalformedCallRecord { line: 2, .. })
        ));
    }

    #[rstest]
    fn test_from_path() {
        let path = PathBuf::from("../tests/data/sanger/sample_01.ab1.tab");
        let table = CallTable::from_path(path).unwrap();
        assert_eq!(table.het_call(20), "C/T");
        assert_eq!(table.het_call(21), "G");
    }
}
