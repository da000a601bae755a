use chrono::Utc;
use rocket::{serde::json::Json, Route, State};

use crate::{
    election::{self, ElectionError, Rejection},
    error::{Error, Result},
    model::{
        api::{PartyCard, PartyInfo, ThankYou},
        auth::AuthToken,
        election::ElectionDocument,
        vote::BallotChoice,
        voter::Voter,
    },
    store::Store,
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![get_booth, get_party_info, cast_ballot]
}

/// The voter named by a token must still be on the roll: the document may
/// have been reset since the token was issued.
fn ensure_registered(doc: &ElectionDocument, token: &AuthToken<Voter>) -> Result<()> {
    doc.voter(token.username())
        .map(|_| ())
        .ok_or_else(|| Rejection::InvalidCredentials.into())
}

#[get("/booth")]
async fn get_booth(token: AuthToken<Voter>, store: Store) -> Result<Json<Vec<PartyCard>>> {
    let doc = store.run(Store::load).await?;
    ensure_registered(&doc, &token)?;
    if election::has_voted(&doc, token.username()) {
        return Err(Rejection::AlreadyVoted.into());
    }
    Ok(Json(doc.parties.iter().map(PartyCard::from).collect()))
}

#[get("/booth/parties/<name>")]
async fn get_party_info(
    token: AuthToken<Voter>,
    name: &str,
    store: Store,
) -> Result<Json<PartyInfo>> {
    let doc = store.run(Store::load).await?;
    ensure_registered(&doc, &token)?;
    doc.party(name)
        .map(|party| Json(PartyInfo::from(party)))
        .ok_or_else(|| ElectionError::PartyNotFound(name.to_string()).into())
}

#[post("/booth/vote", data = "<choice>", format = "json")]
async fn cast_ballot(
    token: AuthToken<Voter>,
    choice: Json<BallotChoice>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<ThankYou>> {
    let party_name = choice.into_inner().party_name;
    let booth_id = config.booth_id().to_string();
    let vote = store
        .run(move |store| {
            store.transact(|doc| {
                ensure_registered(doc, &token)?;
                election::cast_vote(doc, token.username(), &party_name, &booth_id, Utc::now())
                    .map_err(Error::from)
            })
        })
        .await?;
    Ok(Json(ThankYou::new(vote)))
}
