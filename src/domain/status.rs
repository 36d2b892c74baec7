use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Stock health of a product, derived from its stock and demand.
///
/// Never stored: every read recomputes it with [`Status::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Healthy,
    Low,
    Critical,
}

impl Status {
    /// Classifies a (stock, demand) pair.
    ///
    /// Stock strictly above demand is healthy, an exact match is low (so 0/0
    /// is low too), anything below demand is critical.
    pub fn classify(stock: u64, demand: u64) -> Self {
        match stock.cmp(&demand) {
            Ordering::Greater => Status::Healthy,
            Ordering::Equal => Status::Low,
            Ordering::Less => Status::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Healthy => "HEALTHY",
            Status::Low => "LOW",
            Status::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEALTHY" => Ok(Status::Healthy),
            "LOW" => Ok(Status::Low),
            "CRITICAL" => Ok(Status::Critical),
            other => Err(InventoryError::InvalidArgument(format!(
                "status must be one of HEALTHY, LOW, CRITICAL (got {other:?})"
            ))),
        }
    }
}
