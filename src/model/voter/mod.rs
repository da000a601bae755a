use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::admin::{credentials_match, Credentials};

/// Role tag stored alongside every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Voter,
}

impl Role {
    /// Serde default for the admin account.
    pub(crate) fn admin() -> Self {
        Self::Admin
    }

    /// Serde default for voter accounts.
    pub(crate) fn voter() -> Self {
        Self::Voter
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Admin => "admin",
                Self::Voter => "voter",
            }
        )
    }
}

/// A registered voter. Never mutated or removed once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    /// Unique, case-sensitive login name. Votes refer to voters by this.
    pub username: String,
    /// Plaintext; see [`credentials_match`].
    pub password: String,
    pub voter_id: String,
    #[serde(default = "Role::voter")]
    pub role: Role,
}

impl Voter {
    /// Does this voter own the given credentials?
    pub fn verify(&self, credentials: &Credentials) -> bool {
        self.username == credentials.username
            && credentials_match(&self.password, &credentials.password)
    }
}

/// A voter registration request from the admin dashboard.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRegistration {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub voter_id: String,
}

impl From<VoterRegistration> for Voter {
    fn from(registration: VoterRegistration) -> Self {
        Self {
            username: registration.username,
            password: registration.password,
            voter_id: registration.voter_id,
            role: Role::Voter,
        }
    }
}

/// What the dashboard shows about a voter: never the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterSummary {
    pub username: String,
    pub voter_id: String,
    pub has_voted: bool,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Voter {
        pub fn example() -> Self {
            Self {
                username: "v1".into(),
                password: "p1".into(),
                voter_id: "VOTER001".into(),
                role: Role::Voter,
            }
        }

        pub fn example2() -> Self {
            Self {
                username: "v2".into(),
                password: "p2".into(),
                voter_id: "VOTER002".into(),
                role: Role::Voter,
            }
        }
    }

    impl VoterRegistration {
        pub fn example() -> Self {
            Self {
                username: "v1".into(),
                password: "p1".into(),
                voter_id: "VOTER001".into(),
            }
        }
    }
}
