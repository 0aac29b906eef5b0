use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{PlayerId, RoomId};
use crate::rooms::RoomDispatcher;
use crate::session::{ConnectionHandle, Deliver, SessionEvent};
use crate::state::app_state::AppState;
use crate::ws::protocol::{OrganizerMsg, PlayerMsg, ServerMsg};

/// Which endpoint a connection came in on; fixes the frames it may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Organizer,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Organizer => "organizer",
        }
    }
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    room_id: RoomId,
    role: Role,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(
        Uuid::new_v4(),
        room_id,
        role,
        Arc::clone(&app_state.dispatcher),
        app_state.config.heartbeat_interval,
        app_state.config.client_timeout,
    );
    ws::start(session, &req, stream)
}

/// One WebSocket connection. Parses inbound frames into room events and
/// writes whatever the room delivers back out as JSON text frames.
pub struct WsSession {
    conn_id: Uuid,
    room_id: RoomId,
    role: Role,
    /// Fixed on the first player attach; answers are always sent as this id.
    player_id: Option<PlayerId>,
    dispatcher: Arc<RoomDispatcher>,

    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(
        conn_id: Uuid,
        room_id: RoomId,
        role: Role,
        dispatcher: Arc<RoomDispatcher>,
        heartbeat_interval: Duration,
        client_timeout: Duration,
    ) -> Self {
        Self {
            conn_id,
            room_id,
            role,
            player_id: None,
            dispatcher,
            heartbeat_interval,
            client_timeout,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn connection_handle(&self, ctx: &mut ws::WebsocketContext<Self>) -> ConnectionHandle {
        ConnectionHandle::new(self.conn_id, ctx.address().recipient::<Deliver>())
    }

    fn dispatch(&self, event: SessionEvent<ConnectionHandle>) {
        debug!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            event = event.name(),
            "[WS SESSION] dispatching"
        );
        self.dispatcher.dispatch(&self.room_id, event);
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(self.heartbeat_interval, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > actor.client_timeout {
                warn!(
                    conn_id = %actor.conn_id,
                    room_id = %actor.room_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn on_player_frame(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let msg = match serde_json::from_str::<PlayerMsg>(text) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(conn_id = %self.conn_id, room_id = %self.room_id, error = %err, "[WS SESSION] dropped malformed player frame");
                return;
            }
        };

        match msg {
            PlayerMsg::Attach { player_id } => {
                let player_id = match &self.player_id {
                    Some(bound) => bound.clone(),
                    None => self.dispatcher.player_identity(&self.room_id, player_id),
                };
                self.player_id = Some(player_id.clone());
                let handle = self.connection_handle(ctx);
                self.dispatch(SessionEvent::PlayerAttach { player_id, handle });
            }
            PlayerMsg::Answer {
                question_id,
                answer_id,
            } => {
                let Some(player_id) = self.player_id.clone() else {
                    debug!(conn_id = %self.conn_id, "[WS SESSION] answer before attach dropped");
                    return;
                };
                let handle = self.connection_handle(ctx);
                self.dispatch(SessionEvent::PlayerAnswer {
                    player_id,
                    question_id,
                    answer_id,
                    handle,
                });
            }
        }
    }

    fn on_organizer_frame(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let msg = match serde_json::from_str::<OrganizerMsg>(text) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(conn_id = %self.conn_id, room_id = %self.room_id, error = %err, "[WS SESSION] dropped malformed organizer frame");
                return;
            }
        };

        let event = match msg {
            OrganizerMsg::Attach => SessionEvent::OrganizerAttach {
                handle: self.connection_handle(ctx),
            },
            OrganizerMsg::Start => SessionEvent::OrganizerStart,
            OrganizerMsg::Advance => SessionEvent::OrganizerAdvance,
            OrganizerMsg::Continue => SessionEvent::OrganizerContinue,
            OrganizerMsg::Finish => SessionEvent::OrganizerFinish,
            OrganizerMsg::Restart => SessionEvent::OrganizerRestart,
        };
        self.dispatch(event);
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            role = self.role.as_str(),
            "[WS SESSION] started"
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            role = self.role.as_str(),
            player_id = ?self.player_id,
            "[WS SESSION] stopped"
        );
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
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match self.role {
                    Role::Player => self.on_player_frame(&text, ctx),
                    Role::Organizer => self.on_organizer_frame(&text, ctx),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                warn!(conn_id = %self.conn_id, "[WS SESSION] dropped binary frame");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    room_id = %self.room_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Deliver> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
