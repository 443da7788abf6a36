//! Request tokens deciding which response may update the image display.

use serde::{Deserialize, Serialize};

/// Sequence number of an action that claimed the image display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic issuer of [`RequestToken`]s.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issues a token newer than every token issued before.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    #[must_use]
    pub const fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// How responses for superseded requests are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Only the most recently issued request may update the image display.
    #[default]
    LatestWins,
    /// Every response updates the image display when it arrives.
    ArrivalOrder,
}

impl OrderingPolicy {
    /// Returns whether a response carrying `token` may update the display.
    #[must_use]
    pub const fn admits(self, sequence: &RequestSequence, token: RequestToken) -> bool {
        match self {
            Self::LatestWins => sequence.is_latest(token),
            Self::ArrivalOrder => true,
        }
    }
}

impl std::fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LatestWins => write!(f, "latest_wins"),
            Self::ArrivalOrder => write!(f, "arrival_order"),
        }
    }
}

impl std::str::FromStr for OrderingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "latest_wins" => Ok(Self::LatestWins),
            "arrival_order" => Ok(Self::ArrivalOrder),
            other => Err(format!(
                "unknown ordering policy '{other}' (expected latest_wins or arrival_order)"
            )),
        }
    }
}
