use chrono::Utc;
use rocket::{serde::json::Json, Route};

use crate::{election, error::Result, model::api::ElectionStatus, store::Store};

pub fn routes() -> Vec<Route> {
    routes![get_election]
}

/// Status banner on the login screen. Needs no session.
#[get("/election")]
async fn get_election(store: Store) -> Result<Json<ElectionStatus>> {
    let doc = store.run(Store::load).await?;
    let voting_open = election::is_voting_open(&doc, Utc::now());
    Ok(Json(ElectionStatus::new(&doc.election_settings, voting_open)))
}
