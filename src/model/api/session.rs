use serde::{Deserialize, Serialize};

use crate::model::voter::Role;

/// The screens a session moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Login,
    AdminDashboard,
    VotingBooth,
    ThankYou,
}

/// Response to a successful login: who is signed in and where they go next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub role: Role,
    pub username: String,
    pub view: View,
}

impl SessionView {
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            username: username.into(),
            view: View::AdminDashboard,
        }
    }

    pub fn voter(username: impl Into<String>) -> Self {
        Self {
            role: Role::Voter,
            username: username.into(),
            view: View::VotingBooth,
        }
    }
}
