use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::timestamp;

pub const DEFAULT_MIN_VOTING_AGE: u32 = 18;
pub const DEFAULT_BOOTH_LOCATIONS: [&str; 3] = ["Booth A", "Booth B", "Booth C"];

/// Election timing and gates.
///
/// Voting is open only when `is_active` is set AND the current time falls
/// within `[start_time, end_time]`; a missing bound keeps voting closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionSettings {
    #[serde(default, with = "timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub registration_open: bool,
    #[serde(default = "default_min_voting_age")]
    pub min_voting_age: u32,
    #[serde(default = "default_booth_locations")]
    pub booth_locations: Vec<String>,
}

impl ElectionSettings {
    /// Merge every field present in `patch` into these settings.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(registration_open) = patch.registration_open {
            self.registration_open = registration_open;
        }
        if let Some(min_voting_age) = patch.min_voting_age {
            self.min_voting_age = min_voting_age;
        }
        if let Some(booth_locations) = patch.booth_locations {
            self.booth_locations = booth_locations;
        }
    }

    /// Both bounds are set and the end comes before the start.
    pub fn window_inverted(&self) -> bool {
        matches!((self.start_time, self.end_time), (Some(start), Some(end)) if start > end)
    }
}

impl Default for ElectionSettings {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            is_active: false,
            registration_open: true,
            min_voting_age: DEFAULT_MIN_VOTING_AGE,
            booth_locations: default_booth_locations(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_min_voting_age() -> u32 {
    DEFAULT_MIN_VOTING_AGE
}

fn default_booth_locations() -> Vec<String> {
    DEFAULT_BOOTH_LOCATIONS.iter().map(|s| s.to_string()).collect()
}

/// A partial update to [`ElectionSettings`]. Absent fields are left alone; an
/// explicit `null` for a time bound clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, deserialize_with = "timestamp::deserialize_patch")]
    pub start_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_patch")]
    pub end_time: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
    pub registration_open: Option<bool>,
    pub min_voting_age: Option<u32>,
    pub booth_locations: Option<Vec<String>>,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use chrono::Duration;

    use super::*;

    impl ElectionSettings {
        /// Active, with a window bracketing the current time.
        pub fn open_example() -> Self {
            let now = Utc::now();
            Self {
                start_time: Some(now - Duration::hours(1)),
                end_time: Some(now + Duration::hours(1)),
                is_active: true,
                ..Self::default()
            }
        }
    }
}
