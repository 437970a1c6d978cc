/// Extension of raw capillary trace files.
pub const AB1_EXT: &str = "ab1";

/// Suffix appended to a trace file name for its plain basecall file.
pub const SEQ_SUFFIX: &str = ".seq";

/// Suffix appended to a trace file name for its per-position call table.
pub const TAB_SUFFIX: &str = ".tab";

/// Joins the bases of an ambiguity code and the calls of a het call.
pub const CALL_SEPARATOR: &str = "/";

/// Comment marker in call tables.
pub const CALL_TABLE_COMMENT: char = '#';

/// Column of the secondary base call in a call table row.
pub const SECONDARY_CALL_FIELD: usize = 3;

/// Column of the quality value in a call table row.
pub const QUALITY_FIELD: usize = 9;

/// Column of the scan position in a call table row.
pub const SCAN_POSITION_FIELD: usize = 17;

/// Minimum number of columns in a call table row.
pub const MIN_CALL_TABLE_FIELDS: usize = SCAN_POSITION_FIELD + 1;
