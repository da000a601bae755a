use serde::{Deserialize, Serialize};

use super::voter::Role;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_VOTER_ID: &str = "ADMIN001";

/// The single administrator account, as stored in the document.
///
/// The password is kept in plaintext, exactly as submitted. This is a known
/// insecure default; every comparison goes through [`credentials_match`] so a
/// hashing scheme can be swapped in there without touching callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub voter_id: String,
    #[serde(default = "Role::admin")]
    pub role: Role,
}

impl Admin {
    /// Does this admin own the given credentials?
    pub fn verify(&self, credentials: &Credentials) -> bool {
        self.username == credentials.username
            && credentials_match(&self.password, &credentials.password)
    }
}

impl Default for Admin {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            voter_id: DEFAULT_ADMIN_VOTER_ID.to_string(),
            role: Role::Admin,
        }
    }
}

/// Raw credentials, received from the login form.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Compare a stored password against a submitted one.
pub fn credentials_match(stored: &str, submitted: &str) -> bool {
    stored == submitted
}
