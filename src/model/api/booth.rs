use serde::{Deserialize, Serialize};

use crate::model::{party::Party, vote::Vote};

use super::session::View;

/// A party as listed in the voting booth. Running counts stay hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyCard {
    pub name: String,
    pub symbol: String,
    pub description: String,
}

impl From<&Party> for PartyCard {
    fn from(party: &Party) -> Self {
        Self {
            name: party.name.clone(),
            symbol: party.symbol.clone(),
            description: party.description.clone(),
        }
    }
}

/// The party information dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub manifesto: String,
}

impl From<&Party> for PartyInfo {
    fn from(party: &Party) -> Self {
        Self {
            name: party.name.clone(),
            symbol: party.symbol.clone(),
            description: party.description.clone(),
            manifesto: party.manifesto.clone(),
        }
    }
}

/// The thank-you screen shown once a vote is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThankYou {
    pub view: View,
    pub message: String,
    pub vote: Vote,
}

impl ThankYou {
    pub fn new(vote: Vote) -> Self {
        Self {
            view: View::ThankYou,
            message: "Your vote has been recorded successfully.".to_string(),
            vote,
        }
    }
}
