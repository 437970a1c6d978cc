use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegionError {
    #[error("Only one colon and no more than one comma/dash is allowed: {0}")]
    Typography(String),

    #[error("Invalid coordinate in {location}: {reason}")]
    InvalidCoordinate { location: String, reason: String },

    #[error("Range for {0} starts below the first base of the chromosome")]
    NegativeCoordinate(String),
}
