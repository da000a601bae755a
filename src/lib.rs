#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{figment::Figment, Build, Rocket};

use config::{ConfigFairing, StoreFairing};
use logging::LoggerFairing;

pub mod api;
pub mod config;
pub mod election;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use config::Config;

/// Build the booth server from `Rocket.toml` and `ROCKET_*` variables.
pub fn build() -> Rocket<Build> {
    rocket_for_figment(rocket::Config::figment())
}

fn rocket_for_figment(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(ConfigFairing)
        .attach(StoreFairing)
        .attach(LoggerFairing)
        .mount("/", api::routes())
        .register("/", api::catchers())
}

/// A server over its own store directory with fixed test settings.
#[cfg(test)]
pub(crate) fn rocket_for_store_dir(store_dir: &std::path::Path) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("log_level", "off"))
        .merge(("store_dir", store_dir.to_string_lossy().into_owned()))
        .merge(("auth_ttl", 3600))
        .merge(("jwt_secret", "test jwt secret"))
        .merge(("booth_id", "BOOTH-TEST"))
        .merge(("notice_ttl", config::DEFAULT_NOTICE_TTL));
    rocket_for_figment(figment)
}
