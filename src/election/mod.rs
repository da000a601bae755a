//! Election rules over the whole document: read-only queries and the
//! operations that change it.
//!
//! Every operation checks all of its preconditions before touching the
//! document, so a rejected operation leaves it exactly as it was.

use thiserror::Error;

pub mod operations;
pub mod queries;

pub use operations::{
    authenticate, cast_vote, register_party, register_voter, update_election_settings,
    Authenticated,
};
pub use queries::{has_voted, is_voting_open, tally, turnout};

/// Why an election operation refused to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    /// Missing or duplicate input. The message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),
    /// A party that does not exist was named.
    #[error("Party not found: {0}")]
    PartyNotFound(String),
    /// The request was well-formed but policy forbids it.
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("election not active")]
    ElectionNotActive,
    #[error("already voted")]
    AlreadyVoted,
    #[error("registration closed")]
    RegistrationClosed,
}

impl ElectionError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
