use chrono::{DateTime, Utc};

use crate::model::{
    election::ElectionDocument,
    results::{PartyResult, Turnout},
};

/// Voting needs the election switched on AND `now` inside a fully specified
/// window. Both ends of the window are inclusive.
pub fn is_voting_open(doc: &ElectionDocument, now: DateTime<Utc>) -> bool {
    let settings = &doc.election_settings;
    match (settings.start_time, settings.end_time) {
        (Some(start), Some(end)) => settings.is_active && start <= now && now <= end,
        _ => false,
    }
}

/// Has the voter with this username cast a vote?
pub fn has_voted(doc: &ElectionDocument, user_id: &str) -> bool {
    doc.votes.iter().any(|vote| vote.user_id == user_id)
}

/// Per-party counts and shares, in registration order.
///
/// Shares are taken over all votes cast; with no votes every share is 0.
pub fn tally(doc: &ElectionDocument) -> Vec<PartyResult> {
    let total_votes = doc.votes.len().max(1) as f64;
    doc.parties
        .iter()
        .map(|party| PartyResult {
            name: party.name.clone(),
            votes: party.votes,
            percentage: party.votes as f64 / total_votes * 100.0,
        })
        .collect()
}

/// How many registered voters have cast a vote.
pub fn turnout(doc: &ElectionDocument) -> Turnout {
    let total = doc.users.len();
    let voted = doc.votes.len();
    let percentage = if total > 0 {
        voted as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    Turnout {
        total,
        voted,
        percentage,
    }
}
