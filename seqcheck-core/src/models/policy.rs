use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

///
/// What to do with a coordinate or slice bound that falls below the first
/// valid position.
///
/// Applies both to range starts computed as `pos - upstream` and to the
/// upstream context window of a reverse anchor.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// Keep the value as computed.
    #[default]
    PassThrough,
    /// Raise the value to the first valid position.
    Clamp,
    /// Fail the request.
    Reject,
}

impl BoundaryPolicy {
    ///
    /// Apply the policy to `value` given the lowest valid position `floor`.
    ///
    /// Returns `None` when the policy is [`BoundaryPolicy::Reject`] and the
    /// value underflows; callers turn that into their own error.
    ///
    pub fn bound(&self, value: i64, floor: i64) -> Option<i64> {
        if value >= floor {
            return Some(value);
        }
        match self {
            BoundaryPolicy::PassThrough => Some(value),
            BoundaryPolicy::Clamp => Some(floor),
            BoundaryPolicy::Reject => None,
        }
    }
}

impl Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::PassThrough => write!(f, "pass-through"),
            BoundaryPolicy::Clamp => write!(f, "clamp"),
            BoundaryPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pass-through" | "passthrough" => Ok(BoundaryPolicy::PassThrough),
            "clamp" => Ok(BoundaryPolicy::Clamp),
            "reject" => Ok(BoundaryPolicy::Reject),
            _ => Err(format!("Invalid boundary policy: {}", s)),
        }
    }
}
