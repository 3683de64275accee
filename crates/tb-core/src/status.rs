//! Status buckets used by the aggregate counters.
//!
//! `status` itself stays an open string set on [`crate::Ticket`]; only the
//! three named buckets are counted separately, everything else is `Other`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Open,
    Closed,
    Pending,
    Other,
}

impl StatusBucket {
    /// Exact, case-sensitive match. `"Open"` is `Other`.
    pub fn classify(status: Option<&str>) -> Self {
        match status {
            Some("open") => Self::Open,
            Some("closed") => Self::Closed,
            Some("pending") => Self::Pending,
            _ => Self::Other,
        }
    }
}
