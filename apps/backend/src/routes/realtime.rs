use actix_web::{web, Error, HttpRequest, HttpResponse};

use crate::extractors::RoomIdPath;
use crate::state::app_state::AppState;
use crate::ws::{self, Role};

async fn player_socket(
    req: HttpRequest,
    stream: web::Payload,
    room_id: RoomIdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::upgrade(req, stream, room_id.into_inner(), Role::Player, app_state).await
}

async fn organizer_socket(
    req: HttpRequest,
    stream: web::Payload,
    room_id: RoomIdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::upgrade(req, stream, room_id.into_inner(), Role::Organizer, app_state).await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{room_id}/player", web::get().to(player_socket))
        .route("/{room_id}/organizer", web::get().to(organizer_socket));
}
