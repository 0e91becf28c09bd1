use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::state::PlayerId;
use crate::domain::{try_parse_cards, Card, ExchangeOutcome};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::state::app_state::AppState;
use crate::ws::protocol::PlayBroadcast;
use crate::ws::session;

#[derive(Debug, Deserialize)]
struct PlayRequest {
    player_id: PlayerId,
    /// Card tokens such as `"3D"`, `"10H"`, `"BJ"`. Empty means pass.
    #[serde(default)]
    cards: Vec<String>,
    /// The client's count of its own hand after this play.
    hand_size: usize,
}

#[derive(Debug, Deserialize)]
struct ExchangeRequest {
    player_id: PlayerId,
    cards: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ExchangeResponse {
    Waiting { partner: PlayerId },
    Completed { partner: PlayerId, hand: Vec<Card> },
}

#[derive(Debug, Deserialize)]
struct StateQuery {
    player_id: Option<PlayerId>,
}

#[derive(Debug, Deserialize)]
struct AnnounceRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct AnnounceResponse {
    recipients: usize,
}

async fn play(
    path: web::Path<i64>,
    body: ValidatedJson<PlayRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlayBroadcast>, AppError> {
    let room_id = path.into_inner();
    let PlayRequest {
        player_id,
        cards,
        hand_size,
    } = body.into_inner();
    let cards = try_parse_cards(&cards)?;

    let outcome = app_state
        .flow
        .submit_play(room_id, player_id, cards, hand_size)?;
    Ok(web::Json(PlayBroadcast::from(&outcome)))
}

async fn exchange(
    path: web::Path<i64>,
    body: ValidatedJson<ExchangeRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<ExchangeResponse>, AppError> {
    let room_id = path.into_inner();
    let ExchangeRequest { player_id, cards } = body.into_inner();
    let cards = try_parse_cards(&cards)?;

    let response = match app_state.flow.submit_exchange(room_id, player_id, cards)? {
        ExchangeOutcome::Waiting { partner } => ExchangeResponse::Waiting { partner },
        ExchangeOutcome::Completed {
            partner,
            player_hand,
            ..
        } => ExchangeResponse::Completed {
            partner,
            hand: player_hand,
        },
    };
    Ok(web::Json(response))
}

async fn state(
    path: web::Path<i64>,
    query: web::Query<StateQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = app_state
        .flow
        .snapshot(path.into_inner(), query.into_inner().player_id)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn announce(
    path: web::Path<i64>,
    body: ValidatedJson<AnnounceRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<AnnounceResponse>, AppError> {
    let recipients = app_state
        .flow
        .announce(path.into_inner(), body.into_inner().message)?;
    Ok(web::Json(AnnounceResponse { recipients }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{room_id}/ws").route(web::get().to(session::upgrade)))
        .service(web::resource("/{room_id}/play").route(web::post().to(play)))
        .service(web::resource("/{room_id}/exchange").route(web::post().to(exchange)))
        .service(web::resource("/{room_id}/state").route(web::get().to(state)))
        .service(web::resource("/{room_id}/announce").route(web::post().to(announce)));
}
