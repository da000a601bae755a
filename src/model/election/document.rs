use serde::{Deserialize, Serialize};

use crate::model::{admin::Admin, party::Party, vote::Vote, voter::Voter};

use super::settings::ElectionSettings;

/// The key under which the document is persisted.
pub const DOCUMENT_KEY: &str = "election_db";

/// The whole persisted state. Every operation reads all of it and writes all
/// of it back; there is no narrower unit of update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionDocument {
    pub admin: Admin,
    #[serde(default)]
    pub users: Vec<Voter>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub election_settings: ElectionSettings,
}

impl ElectionDocument {
    /// Look up a voter on the roll by username.
    pub fn voter(&self, username: &str) -> Option<&Voter> {
        self.users.iter().find(|voter| voter.username == username)
    }

    /// Look up a party by its exact name.
    pub fn party(&self, name: &str) -> Option<&Party> {
        self.parties.iter().find(|party| party.name == name)
    }
}


#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use crate::model::admin::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

    use super::*;

    #[test]
    fn default_document_shape() {
        let value = serde_json::to_value(ElectionDocument::default()).unwrap();
        assert_eq!(value["admin"]["username"], DEFAULT_ADMIN_USERNAME);
        assert_eq!(value["admin"]["password"], DEFAULT_ADMIN_PASSWORD);
        assert_eq!(value["admin"]["voterId"], "ADMIN001");
        assert_eq!(value["admin"]["role"], "admin");
        assert_eq!(value["users"], serde_json::json!([]));
        assert_eq!(value["electionSettings"]["startTime"], serde_json::Value::Null);
        assert_eq!(value["electionSettings"]["isActive"], false);
        assert_eq!(value["electionSettings"]["registrationOpen"], true);
        assert_eq!(value["electionSettings"]["minVotingAge"], 18);
        assert_eq!(
            value["electionSettings"]["boothLocations"],
            serde_json::json!(["Booth A", "Booth B", "Booth C"])
        );
    }

    #[test]
    fn reads_minimal_document_layout() {
        let raw = r#"{
            "admin": {"username": "admin", "password": "admin123"},
            "users": [{"username": "v1", "password": "p1", "voterId": "X1"}],
            "parties": [{"name": "Alpha", "symbol": "A", "votes": 0}],
            "votes": [],
            "electionSettings": {"startTime": "2024-05-01T09:00", "endTime": null, "isActive": true}
        }"#;
        let doc: ElectionDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.voter("v1").unwrap().voter_id, "X1");
        assert_eq!(doc.party("Alpha").unwrap().description, "");
        assert!(doc.election_settings.start_time.is_some());
        assert!(doc.voter("V1").is_none());
    }
}
