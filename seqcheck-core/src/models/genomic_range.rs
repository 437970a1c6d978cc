use std::fmt::{self, Display};

use crate::consts::{
    ALT_RANGE_DELIMITER, CHROM_PREFIX, CHROM_SEPARATOR, DEFAULT_DOWNSTREAM, DEFAULT_UPSTREAM,
    RANGE_DELIMITER,
};
use crate::errors::RegionError;
use crate::models::BoundaryPolicy;

///
/// GenomicRange struct, a chromosome interval in the 1-based, inclusive
/// coordinates used by genome browsers.
///
/// Always rendered in the canonical `chrom:start,end` form, without a `chr`
/// prefix, regardless of how the input was written.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct GenomicRange {
    chrom: String,
    start: i64,
    end: i64,
}

impl GenomicRange {
    ///
    /// Create a new range. `start` may be negative; whether that is allowed
    /// is decided by the resolver's [`BoundaryPolicy`].
    ///
    pub fn new(chrom: &str, start: i64, end: i64) -> Result<Self, RegionError> {
        let chrom = chrom.strip_prefix(CHROM_PREFIX).unwrap_or(chrom);
        if chrom.is_empty() {
            return Err(RegionError::Typography(format!("{}:{},{}", chrom, start, end)));
        }
        if start > end {
            return Err(RegionError::InvalidCoordinate {
                location: format!("{}:{},{}", chrom, start, end),
                reason: "range start is after range end".to_string(),
            });
        }

        Ok(GenomicRange {
            chrom: chrom.to_string(),
            start,
            end,
        })
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    ///
    /// Number of bases covered by the range, both ends included.
    ///
    pub fn width(&self) -> i64 {
        self.end - self.start + 1
    }

    ///
    /// Get the canonical `chrom:start,end` string of the range
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.chrom, CHROM_SEPARATOR, self.start, RANGE_DELIMITER, self.end
        )
    }
}

impl Display for GenomicRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

///
/// Turns location strings into [`GenomicRange`]s.
///
/// A location is either a literal range (`chr15:48762864-48762904`,
/// `15:48762864,48762904`) or a single position (`15:48762884`) that is
/// widened by `upstream` and `downstream` bases.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionResolver {
    pub upstream: i64,
    pub downstream: i64,
    pub policy: BoundaryPolicy,
}

impl Default for RegionResolver {
    fn default() -> Self {
        RegionResolver {
            upstream: DEFAULT_UPSTREAM,
            downstream: DEFAULT_DOWNSTREAM,
            policy: BoundaryPolicy::default(),
        }
    }
}

impl RegionResolver {
    pub fn new(upstream: i64, downstream: i64) -> Self {
        RegionResolver {
            upstream,
            downstream,
            policy: BoundaryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    ///
    /// Check the punctuation of a location without interpreting it.
    ///
    /// Exactly one `:` is required and at most one range delimiter
    /// (`,` or `-`) is allowed.
    ///
    pub fn validate(location: &str) -> Result<(), RegionError> {
        let colons = location.matches(CHROM_SEPARATOR).count();
        let delimiters = location
            .chars()
            .filter(|c| *c == RANGE_DELIMITER || *c == ALT_RANGE_DELIMITER)
            .count();

        if colons != 1 || delimiters > 1 {
            return Err(RegionError::Typography(location.to_string()));
        }
        Ok(())
    }

    /// True when `location` names a single position rather than a range.
    pub fn is_position(location: &str) -> bool {
        !location.contains([RANGE_DELIMITER, ALT_RANGE_DELIMITER])
    }

    ///
    /// Resolve a location into a [`GenomicRange`].
    ///
    /// # Arguments
    /// - location: `chrom:pos` or `chrom:start-end` / `chrom:start,end`
    ///
    pub fn resolve(&self, location: &str) -> Result<GenomicRange, RegionError> {
        let location: String = location.chars().filter(|c| !c.is_whitespace()).collect();
        Self::validate(&location)?;

        // validate() guarantees a single separator
        let (chrom, coords) = location
            .split_once(CHROM_SEPARATOR)
            .ok_or_else(|| RegionError::Typography(location.clone()))?;

        let parse = |value: &str| -> Result<i64, RegionError> {
            value.parse::<i64>().map_err(|_| RegionError::InvalidCoordinate {
                location: location.clone(),
                reason: format!("'{}' is not a whole number", value),
            })
        };

        let literal = coords.split_once([RANGE_DELIMITER, ALT_RANGE_DELIMITER]);
        let (start, end) = match literal {
            Some((start, end)) => (parse(start)?, parse(end)?),
            None => {
                let pos = parse(coords)?;
                let start = pos.checked_sub(self.upstream);
                let end = pos.checked_add(self.downstream);
                start.zip(end).ok_or_else(|| RegionError::InvalidCoordinate {
                    location: location.clone(),
                    reason: "window extends past the coordinate range".to_string(),
                })?
            }
        };

        let start = self
            .policy
            .bound(start, 1)
            .ok_or_else(|| RegionError::NegativeCoordinate(location.clone()))?;

        GenomicRange::new(chrom, start, end)
    }
}

///
/// Resolve a location with the given windows and the default policy.
///
pub fn resolve(location: &str, upstream: i64, downstream: i64) -> Result<GenomicRange, RegionError> {
    RegionResolver::new(upstream, downstream).resolve(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("15:48762884", 20, 20, "15:48762864,48762904")]
    #[case("chr1:169314424", 200, 200, "1:169314224,169314624")]
    #[case("X:1000", 5, 10, "X:995,1010")]
    #[case("chr2: 5000", 0, 0, "2:5000,5000")]
    fn test_resolve_position(
        #[case] location: &str,
        #[case] upstream: i64,
        #[case] downstream: i64,
        #[case] expected: &str,
    ) {
        let range = resolve(location, upstream, downstream).unwrap();
        assert_eq!(range.to_string(), expected);
    }

    #[rstest]
    #[case("15:48762864-48762904")]
    #[case("15:48762864,48762904")]
    #[case("chr15:48762864-48762904")]
    #[case("chr15:48762864,48762904")]
    fn test_resolve_literal_range_ignores_windows(#[case] location: &str) {
        let range = resolve(location, 7, 9).unwrap();
        assert_eq!(range.chrom(), "15");
        assert_eq!(range.start(), 48762864);
        assert_eq!(range.end(), 48762904);
        assert_eq!(range.as_string(), "15:48762864,48762904");
    }

    #[rstest]
    #[case("151671617")]
    #[case("15::1671617,")]
    #[case("15:1671617,,1671680")]
    #[case("15:1671--617")]
    #[case("15:1671-617,700")]
    #[case("1:2:3")]
    fn test_resolve_typography_error(#[case] location: &str) {
        let result = resolve(location, 20, 20);
        assert!(matches!(result, Err(RegionError::Typography(_))));
    }

    #[rstest]
    fn test_resolve_non_numeric_position() {
        let result = resolve("15:abc", 20, 20);
        assert!(matches!(result, Err(RegionError::InvalidCoordinate { .. })));
    }

    #[rstest]
    #[case("1:9223372036854775807", 20, 20)]
    #[case("1:10", i64::MIN, 0)]
    fn test_resolve_window_overflow(
        #[case] location: &str,
        #[case] upstream: i64,
        #[case] downstream: i64,
    ) {
        let result = resolve(location, upstream, downstream);
        assert!(matches!(result, Err(RegionError::InvalidCoordinate { .. })));
    }

    #[rstest]
    fn test_resolve_inverted_literal_range() {
        let result = resolve("15:200,100", 20, 20);
        assert!(matches!(result, Err(RegionError::InvalidCoordinate { .. })));
    }

    #[rstest]
    fn test_negative_start_passes_through_by_default() {
        let range = resolve("3:10", 25, 5).unwrap();
        assert_eq!(range.start(), -15);
        assert_eq!(range.as_string(), "3:-15,15");
    }

    #[rstest]
    fn test_negative_start_clamped() {
        let resolver = RegionResolver::new(25, 5).with_policy(BoundaryPolicy::Clamp);
        let range = resolver.resolve("3:10").unwrap();
        assert_eq!(range.as_string(), "3:1,15");
    }

    #[rstest]
    fn test_negative_start_rejected() {
        let resolver = RegionResolver::new(25, 5).with_policy(BoundaryPolicy::Reject);
        assert!(matches!(
            resolver.resolve("3:10"),
            Err(RegionError::NegativeCoordinate(_))
        ));
    }

    #[rstest]
    #[case("1:100", true)]
    #[case("1:100,200", false)]
    #[case("1:100-200", false)]
    fn test_is_position(#[case] location: &str, #[case] expected: bool) {
        assert_eq!(RegionResolver::is_position(location), expected);
    }

    #[rstest]
    fn test_width() {
        let range = GenomicRange::new("chr15", 48762864, 48762904).unwrap();
        assert_eq!(range.chrom(), "15");
        assert_eq!(range.width(), 41);
    }
}
