use serde::{Deserialize, Serialize};

/// A registered party. Only `votes` changes after registration, and only
/// when a vote is cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Unique; this is the lookup key.
    pub name: String,
    /// Display glyph.
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manifesto: String,
    /// Running counter of votes cast for this party.
    #[serde(default)]
    pub votes: u64,
}

/// A party registration request from the admin dashboard.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PartySpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manifesto: String,
}

impl From<PartySpec> for Party {
    fn from(spec: PartySpec) -> Self {
        Self {
            name: spec.name,
            symbol: spec.symbol,
            description: spec.description,
            manifesto: spec.manifesto,
            votes: 0,
        }
    }
}
