use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};

use crate::domain::state::PlayerId;
use crate::state::app_state::AppState;
use crate::ws::hub::HubEvent;
use crate::ws::protocol::ServerMsg;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// Upgrade to a websocket, assign a player id, and join the room.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let room_id = path.into_inner();
    let session = WsSession::new(room_id, PlayerId::new_v4(), app_state);
    ws::start(session, &req, stream)
}

/// One player's push connection.
pub struct WsSession {
    room_id: i64,
    player: PlayerId,
    app_state: web::Data<AppState>,
    last_heartbeat: Instant,
    joined: bool,
}

impl WsSession {
    fn new(room_id: i64, player: PlayerId, app_state: web::Data<AppState>) -> Self {
        Self {
            room_id,
            player,
            app_state,
            last_heartbeat: Instant::now(),
            joined: false,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        ctx: &mut ws::WebsocketContext<Self>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code: code.into(),
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    room_id = actor.room_id,
                    player_id = %actor.player,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            room_id = self.room_id,
            player_id = %self.player,
            "[WS SESSION] started"
        );

        // Register first so the welcome and any deal reach this connection.
        self.app_state
            .hub
            .register(self.player, ctx.address().recipient::<HubEvent>());

        match self.app_state.flow.join(self.room_id, self.player) {
            Ok(_) => self.joined = true,
            Err(err) => {
                self.app_state.hub.unregister(self.player);
                Self::send_error_and_close(ctx, err.code().as_str(), err.detail());
                return;
            }
        }

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.app_state.hub.unregister(self.player);
        if self.joined {
            self.app_state.flow.leave(self.room_id, self.player);
        }
        info!(
            room_id = self.room_id,
            player_id = %self.player,
            "[WS SESSION] stopped"
        );
    }
}

impl Handler<HubEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, event: HubEvent, ctx: &mut Self::Context) {
        let HubEvent(msg) = event;
        Self::send_json(ctx, &msg);
        if matches!(msg, ServerMsg::GameEnded { .. }) {
            // The room is gone; nothing to leave on stop.
            self.joined = false;
            ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
            ctx.stop();
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            // Push-only channel: commands arrive over HTTP.
            Ok(ws::Message::Text(_)) | Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(err) => {
                warn!(
                    room_id = self.room_id,
                    player_id = %self.player,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.stop();
            }
        }
    }
}
