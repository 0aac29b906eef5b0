//! Actor that owns one room's `Session`.
//!
//! The mailbox serializes every event for the room, so each transition and the
//! sends it produces happen without interleaving with another event.

use std::sync::Arc;

use actix::prelude::*;
use tracing::{debug, info, warn};

use super::effect::Effect;
use super::event::SessionEvent;
use super::handle::ConnectionHandle;
use super::machine::{RoomSnapshot, Session};
use crate::domain::RoomId;
use crate::questions::QuestionSource;

/// Inbound event routed to a room.
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct RoomEvent(pub SessionEvent<ConnectionHandle>);

#[derive(Message, Debug)]
#[rtype(result = "RoomSnapshot")]
pub struct GetSnapshot;

pub struct RoomActor {
    session: Session<ConnectionHandle>,
    source: Arc<dyn QuestionSource>,
}

impl RoomActor {
    pub fn new(room_id: RoomId, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            session: Session::new(room_id),
            source,
        }
    }

    fn apply(&mut self, effects: Vec<Effect<ConnectionHandle>>, ctx: &mut Context<Self>) {
        for effect in effects {
            match effect {
                Effect::Send { to, message } => {
                    let kind = message.kind();
                    if let Err(err) = to.deliver(message) {
                        warn!(
                            room_id = %self.session.room_id(),
                            message = kind,
                            error = %err,
                            "Delivery failed"
                        );
                    }
                }
                Effect::LoadQuestions => self.load_questions(ctx),
            }
        }
    }

    fn load_questions(&mut self, ctx: &mut Context<Self>) {
        let source = Arc::clone(&self.source);
        let room_id = self.session.room_id().clone();
        debug!(room_id = %room_id, "Loading questions");

        let fetch = async move { source.load(&room_id).await };
        ctx.spawn(fetch.into_actor(self).map(|result, actor, ctx| {
            let effects = actor.session.questions_loaded(result);
            actor.apply(effects, ctx);
        }));
    }
}

impl Actor for RoomActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(room_id = %self.session.room_id(), "Room started");
        let effects = self.session.begin();
        self.apply(effects, ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(room_id = %self.session.room_id(), "Room stopped");
    }
}

impl Handler<RoomEvent> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: RoomEvent, ctx: &mut Self::Context) -> Self::Result {
        let effects = self.session.handle(msg.0);
        self.apply(effects, ctx);
    }
}

impl Handler<GetSnapshot> for RoomActor {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.snapshot())
    }
}
