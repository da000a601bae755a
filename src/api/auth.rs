use chrono::Utc;
use log::info;
use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    election::{self, Authenticated},
    error::Result,
    model::{
        admin::{Admin, Credentials},
        api::SessionView,
        auth::{AuthToken, AUTH_TOKEN_COOKIE},
        voter::Voter,
    },
    store::Store,
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![login, logout]
}

#[post("/auth/login", data = "<credentials>", format = "json")]
pub async fn login(
    cookies: &CookieJar<'_>,
    credentials: Json<Credentials>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<SessionView>> {
    let doc = store.run(Store::load).await?;

    let session = match election::authenticate(&doc, &credentials, Utc::now())? {
        Authenticated::Admin(admin) => {
            let token = AuthToken::<Admin>::new(&admin.username);
            cookies.add(token.into_cookie(config)?);
            SessionView::admin(admin.username)
        }
        Authenticated::Voter(voter) => {
            let token = AuthToken::<Voter>::new(&voter.username);
            cookies.add(token.into_cookie(config)?);
            SessionView::voter(voter.username)
        }
    };

    info!("{} logged in as {}", session.username, session.role);
    Ok(Json(session))
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar<'_>) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}
