use rocket::{http::Status, serde::json::Json, Catcher, Request, Route};

use crate::{config::DEFAULT_NOTICE_TTL, model::api::Notice, Config};

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod booth;
pub(crate) mod public;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(public::routes());
    routes.extend(admin::routes());
    routes.extend(booth::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

/// Turn any unhandled failure (a failed guard, a malformed body, an unknown
/// route) into a notice so clients only ever see one error shape.
#[catch(default)]
fn default_catcher(status: Status, req: &Request<'_>) -> (Status, Json<Notice>) {
    let message = match status.code {
        401 => "Please log in to continue",
        403 => "You are not allowed to do that",
        404 => "Not found",
        400 | 422 => "Malformed request",
        _ => status.reason().unwrap_or("Something went wrong"),
    };
    let notice_ttl = req
        .rocket()
        .state::<Config>()
        .map(Config::notice_ttl)
        .unwrap_or(DEFAULT_NOTICE_TTL);
    (status, Json(Notice::error(message, notice_ttl)))
}
