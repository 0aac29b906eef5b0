use actix_web::web;

pub mod health;
pub mod realtime;
pub mod rooms;

/// Register every route. `main.rs` and the integration tests share this, so
/// tests hit the same paths the server exposes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Room inspection: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // WebSockets: /ws/rooms/{room_id}/{player|organizer}
    cfg.service(web::scope("/ws/rooms").configure(realtime::configure_routes));
}
