//! Defaults and environment variable names shared across the workspace.

/// Environment variable pointing at a TOML configuration file.
///
/// # Example
///
/// ```bash
/// export SEQCHECK_CONFIG=~/.config/seqcheck.toml
/// ```
pub const SEQCHECK_CONFIG_ENV: &str = "SEQCHECK_CONFIG";

/// Bases fetched upstream of a single-position query.
pub const DEFAULT_UPSTREAM: i64 = 20;

/// Bases fetched downstream of a single-position query.
pub const DEFAULT_DOWNSTREAM: i64 = 20;

/// Genome assembly used when none is given.
pub const DEFAULT_GENOME_VERSION: &str = "hg19";

/// Root of the UCSC DAS server.
pub const DEFAULT_DAS_URL: &str = "http://genome.ucsc.edu/cgi-bin/das";

/// Separator between chromosome and position.
pub const CHROM_SEPARATOR: char = ':';

/// Canonical separator between range start and end.
pub const RANGE_DELIMITER: char = ',';

/// Alternative range separator accepted on input.
pub const ALT_RANGE_DELIMITER: char = '-';

/// Chromosome prefix dropped during normalization.
pub const CHROM_PREFIX: &str = "chr";
