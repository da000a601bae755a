use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::model::{
    admin::{Admin, Credentials},
    election::{ElectionDocument, ElectionSettings, SettingsPatch},
    party::{Party, PartySpec},
    vote::Vote,
    voter::{Voter, VoterRegistration},
};

use super::{
    queries::{has_voted, is_voting_open},
    ElectionError, Rejection,
};

/// Who a successful login belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authenticated {
    Admin(Admin),
    Voter(Voter),
}

/// Check login credentials. Never changes the document.
///
/// The admin is matched first. A voter additionally needs voting to be open
/// at `now` and must not have voted yet.
pub fn authenticate(
    doc: &ElectionDocument,
    credentials: &Credentials,
    now: DateTime<Utc>,
) -> Result<Authenticated, ElectionError> {
    if doc.admin.verify(credentials) {
        return Ok(Authenticated::Admin(doc.admin.clone()));
    }

    let voter = doc
        .users
        .iter()
        .find(|voter| voter.verify(credentials))
        .ok_or(Rejection::InvalidCredentials)?;

    if !is_voting_open(doc, now) {
        return Err(Rejection::ElectionNotActive.into());
    }
    if has_voted(doc, &voter.username) {
        return Err(Rejection::AlreadyVoted.into());
    }

    Ok(Authenticated::Voter(voter.clone()))
}

/// Add a voter to the roll.
///
/// Usernames and voter IDs must both be unused. The admin's username is
/// taken too, since the admin is matched first at login.
pub fn register_voter(
    doc: &mut ElectionDocument,
    registration: VoterRegistration,
) -> Result<&Voter, ElectionError> {
    if registration.username.is_empty()
        || registration.password.is_empty()
        || registration.voter_id.is_empty()
    {
        return Err(ElectionError::validation("All fields are required!"));
    }
    if !doc.election_settings.registration_open {
        return Err(Rejection::RegistrationClosed.into());
    }
    if registration.username == doc.admin.username
        || doc.users.iter().any(|voter| {
            voter.username == registration.username || voter.voter_id == registration.voter_id
        })
    {
        return Err(ElectionError::validation("User or Voter ID already exists!"));
    }

    info!("Registered voter {}", registration.username);
    doc.users.push(registration.into());
    Ok(doc.users.last().unwrap()) // Just pushed.
}

/// Add a party to the ballot with no votes. Names must be unique.
pub fn register_party(doc: &mut ElectionDocument, spec: PartySpec) -> Result<&Party, ElectionError> {
    if spec.name.is_empty() || spec.symbol.is_empty() {
        return Err(ElectionError::validation(
            "Party name and symbol are required!",
        ));
    }
    if doc.party(&spec.name).is_some() {
        return Err(ElectionError::validation("Party already exists!"));
    }

    info!("Registered party {}", spec.name);
    doc.parties.push(spec.into());
    Ok(doc.parties.last().unwrap()) // Just pushed.
}

/// Record one vote for `party_name` by the voter `username`.
///
/// The party counter and the vote log change together or not at all.
pub fn cast_vote(
    doc: &mut ElectionDocument,
    username: &str,
    party_name: &str,
    booth_id: &str,
    now: DateTime<Utc>,
) -> Result<Vote, ElectionError> {
    if has_voted(doc, username) {
        return Err(Rejection::AlreadyVoted.into());
    }
    let party = doc
        .parties
        .iter_mut()
        .find(|party| party.name == party_name)
        .ok_or_else(|| ElectionError::PartyNotFound(party_name.to_string()))?;

    let vote = Vote {
        user_id: username.to_string(),
        party_name: party_name.to_string(),
        timestamp: now,
        booth_id: booth_id.to_string(),
    };
    party.votes += 1;
    doc.votes.push(vote.clone());

    info!("Recorded vote at {booth_id}");
    Ok(vote)
}

/// Merge `patch` into the election settings.
///
/// The window is not checked for order: an end before the start is stored
/// as given and simply keeps voting closed.
pub fn update_election_settings(
    doc: &mut ElectionDocument,
    patch: SettingsPatch,
) -> &ElectionSettings {
    let settings = &mut doc.election_settings;
    settings.apply(patch);
    if settings.window_inverted() {
        warn!("Election window ends before it starts; voting will stay closed");
    }
    info!(
        "Election settings updated: active={}, registration_open={}",
        settings.is_active, settings.registration_open
    );
    settings
}
