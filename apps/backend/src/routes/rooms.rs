use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::RoomId;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::RoomIdPath;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct RoomListResponse {
    rooms: Vec<RoomId>,
}

async fn list_rooms(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(RoomListResponse {
        rooms: app_state.dispatcher.room_ids(),
    }))
}

/// Snapshot of a live room. Never creates one.
async fn get_room(
    room_id: RoomIdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_id = room_id.into_inner();
    let addr = app_state.dispatcher.get(&room_id).ok_or_else(|| {
        AppError::not_found(ErrorCode::RoomNotFound, format!("Room {room_id} not found"))
    })?;

    let snapshot = addr.send(crate::session::GetSnapshot).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_rooms))
        .route("/{room_id}", web::get().to(get_room));
}
