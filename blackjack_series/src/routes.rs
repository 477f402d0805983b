//! The action surface of a match over HTTP. Every handler performs at most one state machine step.

use crate::error::UserError;
use crate::store::{MatchId, MatchStore};
use actix_web::{delete, get, http::header::ContentType, post, web, HttpResponse};
use blackjack_lib::{Card, SeriesState, SeriesStep, SeriesView};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct MatchResponse {
    match_id: MatchId,
    state: SeriesView,
}

#[derive(Serialize)]
struct HitResponse {
    card: Card,
    state: SeriesView,
}

#[derive(Serialize)]
struct StepResponse {
    step: SeriesStep,
    state: SeriesView,
}

#[derive(Deserialize)]
struct StartParams {
    /// The caller's previous match, discarded when the new one starts.
    replace: Option<MatchId>,
}

/// Starts a brand new series. Passing `?replace={id}` discards the caller's previous match, so restarting never
/// leaves an orphaned match behind.
#[post("/matches")]
async fn start_match(
    params: web::Query<StartParams>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    let state = SeriesState::start(&mut rand::thread_rng())?;
    let view = SeriesView::from(&state);
    let match_id = store.create(state, params.replace.as_deref())?;
    log::info!("match {match_id} started");
    Ok(HttpResponse::Created().json(MatchResponse {
        match_id,
        state: view,
    }))
}

/// Returns the current view of a match with the dealer's hole card masked while the player acts.
#[get("/matches/{id}")]
async fn get_state(
    path: web::Path<MatchId>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    let state = store.get(&path)?;
    Ok(HttpResponse::Ok().json(SeriesView::from(&state)))
}

#[post("/matches/{id}/hit")]
async fn player_hit(
    path: web::Path<MatchId>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    let response = store.update(&path, |state| {
        let card = state.player_hit()?;
        Ok(HitResponse {
            card,
            state: SeriesView::from(&*state),
        })
    })?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/matches/{id}/stand")]
async fn player_stand(
    path: web::Path<MatchId>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    let view = store.update(&path, |state| {
        state.player_stand()?;
        Ok(SeriesView::from(&*state))
    })?;
    Ok(HttpResponse::Ok().json(view))
}

/// Steps the dealer once. Clients call this repeatedly while `dealer_drawing` is set.
#[post("/matches/{id}/advance")]
async fn advance_dealer_turn(
    path: web::Path<MatchId>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    let response = store.update(&path, |state| {
        let step = state.advance_dealer_turn(&mut rand::thread_rng())?;
        Ok(StepResponse {
            step,
            state: SeriesView::from(&*state),
        })
    })?;
    if let SeriesStep::RoundResolved {
        series_over: true, ..
    } = response.step
    {
        log::info!("match {} finished", path.as_str());
    }
    Ok(HttpResponse::Ok().json(response))
}

/// Returns the final result. Answers 409 while the series is still being played.
#[get("/matches/{id}/result")]
async fn get_series_result(
    path: web::Path<MatchId>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    let result = store.get(&path)?.result()?;
    Ok(HttpResponse::Ok().json(result))
}

/// Plain text rendering of the table, handy from a terminal.
#[get("/matches/{id}/table")]
async fn render_table(
    path: web::Path<MatchId>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    let state = store.get(&path)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(SeriesView::from(&state).to_string()))
}

#[delete("/matches/{id}")]
async fn abandon_match(
    path: web::Path<MatchId>,
    store: web::Data<MatchStore>,
) -> Result<HttpResponse, UserError> {
    if store.remove(&path)? {
        log::info!("match {} abandoned", path.as_str());
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(UserError::MatchNotFound(path.into_inner()))
    }
}

/// Registers every match route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(start_match)
        .service(get_state)
        .service(player_hit)
        .service(player_stand)
        .service(advance_dealer_turn)
        .service(get_series_result)
        .service(render_table)
        .service(abandon_match);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use blackjack_lib::{Deck, Rank, Suit};
    use serde_json::Value;

    fn scripted(ranks: &[Rank]) -> SeriesState {
        let cards = ranks
            .iter()
            .map(|rank| Card::new(*rank, Suit::Spades))
            .collect();
        SeriesState::with_deck(Deck::stacked(cards)).unwrap()
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(App::new().app_data($store.clone()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn start_match_deals_two_cards_each() {
        let store = web::Data::new(MatchStore::new());
        let app = app!(store);

        let req = test::TestRequest::post().uri("/matches").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        let id = body["match_id"].as_str().unwrap();
        assert_eq!(body["state"]["round_number"], 1);
        assert_eq!(body["state"]["player_hand"].as_array().unwrap().len(), 2);
        assert_eq!(body["state"]["dealer_hand"][1]["face"], "down");
        assert_eq!(body["state"]["phase"], "player_turn");
        assert!(store.get(id).is_ok());
    }

    #[actix_web::test]
    async fn unknown_match_is_not_found() {
        let store = web::Data::new(MatchStore::new());
        let app = app!(store);

        for req in [
            test::TestRequest::get().uri("/matches/missing").to_request(),
            test::TestRequest::post().uri("/matches/missing/hit").to_request(),
            test::TestRequest::post().uri("/matches/missing/advance").to_request(),
            test::TestRequest::delete().uri("/matches/missing").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn hit_returns_the_drawn_card() {
        let store = web::Data::new(MatchStore::new());
        let id = store
            .create(
                scripted(&[Rank::Five, Rank::Six, Rank::Ten, Rank::Seven, Rank::Nine]),
                None,
            )
            .unwrap();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/matches/{id}/hit"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["card"]["rank"], "Nine");
        assert_eq!(body["state"]["player_total"], 20);
        assert_eq!(body["state"]["phase"], "player_turn");
    }

    #[actix_web::test]
    async fn busting_reveals_the_dealer() {
        let store = web::Data::new(MatchStore::new());
        let id = store
            .create(
                scripted(&[Rank::King, Rank::Queen, Rank::Ten, Rank::Seven, Rank::Two]),
                None,
            )
            .unwrap();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/matches/{id}/hit"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["state"]["player_total"], 22);
        assert_eq!(body["state"]["phase"], "dealer_reveal");
        assert_eq!(body["state"]["hole_card_revealed"], true);
        assert_eq!(body["state"]["dealer_total"], 17);

        let req = test::TestRequest::post()
            .uri(&format!("/matches/{id}/hit"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn invalid_action_leaves_the_match_unchanged() {
        let store = web::Data::new(MatchStore::new());
        let state = scripted(&[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Seven]);
        let id = store.create(state.clone(), None).unwrap();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/matches/{id}/advance"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "cannot advance the dealer during the player turn phase"
        );
        assert_eq!(store.get(&id).unwrap(), state);
    }

    #[actix_web::test]
    async fn stand_then_advance_resolves_the_round() {
        let store = web::Data::new(MatchStore::new());
        let id = store
            .create(
                scripted(&[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Seven]),
                None,
            )
            .unwrap();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/matches/{id}/stand"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["dealer_drawing"], true);

        let req = test::TestRequest::post()
            .uri(&format!("/matches/{id}/advance"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["step"]["step"], "round_resolved");
        assert_eq!(body["step"]["outcome"]["winner"], "player");
        assert_eq!(body["step"]["series_over"], false);
        assert_eq!(body["state"]["round_number"], 2);
        assert_eq!(body["state"]["player_score"], 1);
        assert_eq!(body["state"]["history"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri(&format!("/matches/{id}/result"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn a_match_can_be_played_to_the_end() {
        let store = web::Data::new(MatchStore::new());
        let app = app!(store);

        let req = test::TestRequest::post().uri("/matches").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["match_id"].as_str().unwrap().to_string();
        let mut state = body["state"].clone();

        while state["series_over"] == false {
            let action = if state["phase"] == "player_turn" {
                "stand"
            } else {
                "advance"
            };
            let req = test::TestRequest::post()
                .uri(&format!("/matches/{id}/{action}"))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            state = if action == "stand" {
                body
            } else {
                body["state"].clone()
            };
        }

        let req = test::TestRequest::get()
            .uri(&format!("/matches/{id}/result"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let result: Value = test::read_body_json(resp).await;
        let rounds = result["rounds_played"].as_u64().unwrap();
        assert!((2..=3).contains(&rounds));
        assert_eq!(result["history"].as_array().unwrap().len() as u64, rounds);

        let req = test::TestRequest::post()
            .uri(&format!("/matches/{id}/hit"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn table_renders_as_text() {
        let store = web::Data::new(MatchStore::new());
        let id = store
            .create(
                scripted(&[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Seven]),
                None,
            )
            .unwrap();
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri(&format!("/matches/{id}/table"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("round 1"));
        assert!(text.contains("??"));
    }

    #[actix_web::test]
    async fn restarting_discards_the_previous_match() {
        let store = web::Data::new(MatchStore::new());
        let old = store
            .create(
                scripted(&[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Seven]),
                None,
            )
            .unwrap();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/matches?replace={old}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let new = body["match_id"].as_str().unwrap();
        assert_ne!(new, old);
        assert_eq!(store.len().unwrap(), 1);

        let req = test::TestRequest::get()
            .uri(&format!("/matches/{old}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn abandoned_match_is_gone() {
        let store = web::Data::new(MatchStore::new());
        let id = store
            .create(
                scripted(&[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Seven]),
                None,
            )
            .unwrap();
        let app = app!(store);

        let req = test::TestRequest::delete()
            .uri(&format!("/matches/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/matches/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
