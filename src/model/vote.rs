use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cast vote. Append-only: never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Username of the voter who cast it.
    pub user_id: String,
    pub party_name: String,
    pub timestamp: DateTime<Utc>,
    pub booth_id: String,
}

/// A ballot submitted from the voting booth.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotChoice {
    pub party_name: String,
}
