use rocket::{serde::json::Json, Route, State};

use crate::{
    election::{self, has_voted},
    error::{Error, Result},
    model::{
        admin::Admin,
        api::Notice,
        auth::AuthToken,
        election::{ElectionSettings, SettingsPatch},
        party::{Party, PartySpec},
        results::ResultsView,
        voter::{VoterRegistration, VoterSummary},
    },
    store::Store,
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![
        get_voters,
        create_voter,
        get_parties,
        create_party,
        get_settings,
        modify_settings,
        toggle_active,
        toggle_registration,
        get_results,
    ]
}

#[get("/admin/voters")]
async fn get_voters(_token: AuthToken<Admin>, store: Store) -> Result<Json<Vec<VoterSummary>>> {
    let doc = store.run(Store::load).await?;
    let voters = doc
        .users
        .iter()
        .map(|voter| VoterSummary {
            username: voter.username.clone(),
            voter_id: voter.voter_id.clone(),
            has_voted: has_voted(&doc, &voter.username),
        })
        .collect();
    Ok(Json(voters))
}

#[post("/admin/voters", data = "<registration>", format = "json")]
async fn create_voter(
    _token: AuthToken<Admin>,
    registration: Json<VoterRegistration>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<Notice>> {
    let registration = registration.into_inner();
    store
        .run(move |store| {
            store.transact(|doc| {
                election::register_voter(doc, registration)
                    .map(|_| ())
                    .map_err(Error::from)
            })
        })
        .await?;
    Ok(Json(Notice::success(
        "User added successfully!",
        config.notice_ttl(),
    )))
}

#[get("/admin/parties")]
async fn get_parties(_token: AuthToken<Admin>, store: Store) -> Result<Json<Vec<Party>>> {
    Ok(Json(store.run(Store::load).await?.parties))
}

#[post("/admin/parties", data = "<spec>", format = "json")]
async fn create_party(
    _token: AuthToken<Admin>,
    spec: Json<PartySpec>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<Notice>> {
    let spec = spec.into_inner();
    store
        .run(move |store| {
            store.transact(|doc| {
                election::register_party(doc, spec)
                    .map(|_| ())
                    .map_err(Error::from)
            })
        })
        .await?;
    Ok(Json(Notice::success(
        "Party added successfully!",
        config.notice_ttl(),
    )))
}

#[get("/admin/settings")]
async fn get_settings(_token: AuthToken<Admin>, store: Store) -> Result<Json<ElectionSettings>> {
    Ok(Json(store.run(Store::load).await?.election_settings))
}

#[patch("/admin/settings", data = "<patch>", format = "json")]
async fn modify_settings(
    _token: AuthToken<Admin>,
    patch: Json<SettingsPatch>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<Notice>> {
    let patch = patch.into_inner();
    update_settings(store, config, move |_| patch).await
}

/// Start or stop the election.
#[post("/admin/settings/active")]
async fn toggle_active(
    _token: AuthToken<Admin>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<Notice>> {
    update_settings(store, config, |settings| SettingsPatch {
        is_active: Some(!settings.is_active),
        ..SettingsPatch::default()
    })
    .await
}

/// Open or close voter registration.
#[post("/admin/settings/registration")]
async fn toggle_registration(
    _token: AuthToken<Admin>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<Notice>> {
    update_settings(store, config, |settings| SettingsPatch {
        registration_open: Some(!settings.registration_open),
        ..SettingsPatch::default()
    })
    .await
}

/// Apply the patch built from the current settings, inside one transaction.
async fn update_settings<F>(store: Store, config: &Config, make_patch: F) -> Result<Json<Notice>>
where
    F: FnOnce(&ElectionSettings) -> SettingsPatch + Send + 'static,
{
    store
        .run(move |store| {
            store.transact(|doc| -> Result<()> {
                let patch = make_patch(&doc.election_settings);
                election::update_election_settings(doc, patch);
                Ok(())
            })
        })
        .await?;
    Ok(Json(Notice::success(
        "Election settings updated!",
        config.notice_ttl(),
    )))
}

#[get("/admin/results")]
async fn get_results(_token: AuthToken<Admin>, store: Store) -> Result<Json<ResultsView>> {
    let doc = store.run(Store::load).await?;
    Ok(Json(ResultsView {
        results: election::tally(&doc),
        turnout: election::turnout(&doc),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json::json,
    };

    use crate::model::{api::NoticeKind, voter::Voter};

    use super::*;

    async fn post_json<T: rocket::serde::Serialize>(
        client: &Client,
        uri: rocket::http::uri::Origin<'_>,
        body: &T,
    ) -> (Status, Notice) {
        let response = client
            .post(uri.to_string())
            .header(ContentType::JSON)
            .body(json!(body).to_string())
            .dispatch()
            .await;
        let status = response.status();
        (status, response.into_json().await.unwrap())
    }

    #[backend_test(admin)]
    async fn register_and_list_voters(client: Client, store: Store) {
        let (status, notice) =
            post_json(&client, uri!(create_voter), &VoterRegistration::example()).await;
        assert_eq!(Status::Ok, status);
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "User added successfully!");
        assert_eq!(store.load().unwrap().users, vec![Voter::example()]);

        let response = client.get(uri!(get_voters)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let body = response.into_string().await.unwrap();
        assert!(!body.contains("p1"), "passwords must not be listed");
        let voters: Vec<VoterSummary> = rocket::serde::json::from_str(&body).unwrap();
        assert_eq!(
            voters,
            vec![VoterSummary {
                username: "v1".into(),
                voter_id: "VOTER001".into(),
                has_voted: false,
            }]
        );
    }

    #[backend_test(admin)]
    async fn bad_voter_registrations(client: Client, store: Store) {
        let mut missing = VoterRegistration::example();
        missing.voter_id.clear();
        let (status, notice) = post_json(&client, uri!(create_voter), &missing).await;
        assert_eq!(Status::BadRequest, status);
        assert_eq!(notice.message, "All fields are required!");

        post_json(&client, uri!(create_voter), &VoterRegistration::example()).await;
        let mut duplicate = VoterRegistration::example();
        duplicate.voter_id = "VOTER999".into();
        let (status, notice) = post_json(&client, uri!(create_voter), &duplicate).await;
        assert_eq!(Status::BadRequest, status);
        assert_eq!(notice.message, "User or Voter ID already exists!");

        assert_eq!(store.load().unwrap().users.len(), 1);
    }

    #[backend_test(admin)]
    async fn closed_registration_is_forbidden(client: Client, store: Store) {
        let response = client.post(uri!(toggle_registration)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        assert!(!store.load().unwrap().election_settings.registration_open);

        let (status, notice) =
            post_json(&client, uri!(create_voter), &VoterRegistration::example()).await;
        assert_eq!(Status::Forbidden, status);
        assert_eq!(notice.message, "registration closed");
        assert!(store.load().unwrap().users.is_empty());
    }

    #[backend_test(admin)]
    async fn register_and_list_parties(client: Client) {
        let (status, _) = post_json(&client, uri!(create_party), &PartySpec::example()).await;
        assert_eq!(Status::Ok, status);
        let (status, _) = post_json(&client, uri!(create_party), &PartySpec::example2()).await;
        assert_eq!(Status::Ok, status);

        let (status, notice) = post_json(&client, uri!(create_party), &PartySpec::example()).await;
        assert_eq!(Status::BadRequest, status);
        assert_eq!(notice.message, "Party already exists!");

        let (status, notice) = post_json(
            &client,
            uri!(create_party),
            &json!({ "name": "Gamma", "symbol": "" }),
        )
        .await;
        assert_eq!(Status::BadRequest, status);
        assert_eq!(notice.message, "Party name and symbol are required!");

        let parties: Vec<Party> = client
            .get(uri!(get_parties))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(parties, vec![Party::example(), Party::example2()]);
    }

    #[backend_test(admin)]
    async fn patch_settings(client: Client) {
        let response = client
            .patch(uri!(modify_settings))
            .header(ContentType::JSON)
            .body(
                json!({
                    "startTime": "2024-06-01T09:00",
                    "endTime": "2024-06-01T17:30:00Z",
                    "minVotingAge": 21,
                })
                .to_string(),
            )
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        let settings: ElectionSettings = client
            .get(uri!(get_settings))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(
            settings.start_time,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap())
        );
        assert_eq!(
            settings.end_time,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap())
        );
        assert_eq!(settings.min_voting_age, 21);
        assert!(!settings.is_active);
        assert!(settings.registration_open);

        // An explicit null clears a bound; absent fields stay.
        client
            .patch(uri!(modify_settings))
            .header(ContentType::JSON)
            .body(json!({ "endTime": null }).to_string())
            .dispatch()
            .await;
        let settings: ElectionSettings = client
            .get(uri!(get_settings))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert!(settings.start_time.is_some());
        assert_eq!(settings.end_time, None);
    }

    #[backend_test(admin)]
    async fn toggles_flip_flags(client: Client, store: Store) {
        client.post(uri!(toggle_active)).dispatch().await;
        assert!(store.load().unwrap().election_settings.is_active);
        client.post(uri!(toggle_active)).dispatch().await;
        assert!(!store.load().unwrap().election_settings.is_active);

        client.post(uri!(toggle_registration)).dispatch().await;
        client.post(uri!(toggle_registration)).dispatch().await;
        assert!(store.load().unwrap().election_settings.registration_open);
    }

    #[backend_test(admin)]
    async fn results_report_tally_and_turnout(client: Client, store: Store) {
        store
            .transact(|doc| -> Result<()> {
                doc.election_settings = ElectionSettings::open_example();
                election::register_party(doc, PartySpec::example())?;
                election::register_party(doc, PartySpec::example2())?;
                election::register_voter(doc, VoterRegistration::example())?;
                election::register_voter(
                    doc,
                    VoterRegistration {
                        username: "v2".into(),
                        password: "p2".into(),
                        voter_id: "VOTER002".into(),
                    },
                )?;
                election::cast_vote(doc, "v1", "Beta", "BOOTH-TEST", Utc::now())?;
                Ok(())
            })
            .unwrap();

        let results: ResultsView = client
            .get(uri!(get_results))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(results.results.len(), 2);
        assert_eq!(results.results[0].votes, 0);
        assert_eq!(results.results[1].votes, 1);
        assert_eq!(results.results[1].percentage, 100.0);
        assert_eq!(results.turnout.total, 2);
        assert_eq!(results.turnout.voted, 1);
        assert_eq!(results.turnout.percentage, 50.0);
    }

    #[backend_test]
    async fn admin_routes_need_admin_token(client: Client, store: Store) {
        let response = client.get(uri!(get_voters)).dispatch().await;
        assert_eq!(Status::Unauthorized, response.status());
        let notice: Notice = response.into_json().await.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);

        let (status, _) = post_json(&client, uri!(create_party), &PartySpec::example()).await;
        assert_eq!(Status::Unauthorized, status);
        let response = client.post(uri!(toggle_active)).dispatch().await;
        assert_eq!(Status::Unauthorized, response.status());
        assert!(store.load().unwrap().parties.is_empty());
        assert!(!store.load().unwrap().election_settings.is_active);
    }

    #[backend_test(voter)]
    async fn voter_cannot_use_admin_routes(client: Client, store: Store) {
        let before = store.load().unwrap();

        let response = client.get(uri!(get_results)).dispatch().await;
        assert_eq!(Status::Forbidden, response.status());
        let (status, _) = post_json(&client, uri!(create_party), &PartySpec::example2()).await;
        assert_eq!(Status::Forbidden, status);

        assert_eq!(store.load().unwrap(), before);
    }
}
