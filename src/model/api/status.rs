use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{election::ElectionSettings, timestamp};

/// Publicly visible election status, shown on the login screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionStatus {
    pub voting_open: bool,
    #[serde(with = "timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub registration_open: bool,
}

impl ElectionStatus {
    pub fn new(settings: &ElectionSettings, voting_open: bool) -> Self {
        Self {
            voting_open,
            start_time: settings.start_time,
            end_time: settings.end_time,
            is_active: settings.is_active,
            registration_open: settings.registration_open,
        }
    }
}
