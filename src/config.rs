use std::path::PathBuf;

use chrono::Duration;
use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::store::{JsonFileStore, Store};

pub const DEFAULT_BOOTH_ID: &str = "BOOTH-001";
pub const DEFAULT_NOTICE_TTL: u32 = 3;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    pub(crate) auth_ttl: u32,
    #[serde(default = "default_booth_id")]
    pub(crate) booth_id: String,
    #[serde(default = "default_notice_ttl")]
    pub(crate) notice_ttl: u32,
    // secrets
    pub(crate) jwt_secret: String,
}

fn default_booth_id() -> String {
    DEFAULT_BOOTH_ID.to_string()
}

fn default_notice_ttl() -> u32 {
    DEFAULT_NOTICE_TTL
}

impl Config {
    /// Valid lifetime of auth token cookies in seconds.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// Secret key used to sign JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Identifier of this booth, stamped on every vote cast through it.
    pub fn booth_id(&self) -> &str {
        &self.booth_id
    }

    /// Seconds before a notice is dismissed by the client.
    pub fn notice_ttl(&self) -> u32 {
        self.notice_ttl
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the store fairing and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!("Serving as booth {}", config.booth_id());

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the document store.
#[derive(Deserialize)]
struct StoreConfig {
    store_dir: PathBuf,
}

/// A fairing that loads the store config, opens the election document
/// (seeding it on first run), and places a [`Store`] into managed state.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election store",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<StoreConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load store config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Open the backend and make sure a document exists.
        let backend = match JsonFileStore::open(&config.store_dir) {
            Ok(backend) => backend,
            Err(e) => {
                error!("Failed to open store in {}: {e}", config.store_dir.display());
                return Err(rocket);
            }
        };
        let store = Store::new(backend);
        match store.load() {
            Ok(doc) => info!(
                "Opened election document at {} ({} voters, {} parties, {} votes)",
                store.describe(),
                doc.users.len(),
                doc.parties.len(),
                doc.votes.len()
            ),
            Err(e) => {
                error!("Failed to load election document: {e}");
                return Err(rocket);
            }
        }

        // Manage the state.
        rocket = rocket.manage(store);
        Ok(rocket)
    }
}

#[cfg(test)]
mod examples {
    use super::*;

    impl Config {
        pub fn example() -> Self {
            Self {
                auth_ttl: 3600,
                booth_id: "BOOTH-TEST".to_string(),
                notice_ttl: DEFAULT_NOTICE_TTL,
                jwt_secret: "test jwt secret".to_string(),
            }
        }
    }
}
