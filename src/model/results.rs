use serde::{Deserialize, Serialize};

/// One row of the tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyResult {
    pub name: String,
    pub votes: u64,
    /// Share of all votes cast, 0 to 100.
    pub percentage: f64,
}

/// How many registered voters have voted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turnout {
    pub total: usize,
    pub voted: usize,
    pub percentage: f64,
}

/// The results tab of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsView {
    pub results: Vec<PartyResult>,
    pub turnout: Turnout,
}
