use std::time::Duration;

use quizroom_test_support::unique_room;
use serde_json::json;

use crate::support::server::start_test_server;
use crate::support::websocket_client::{WebSocketClient, RECV_TIMEOUT};

#[actix_web::test]
async fn bad_frames_are_dropped_without_reply() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("bad-frames");

    let mut player = WebSocketClient::connect_retry(&server.player_url(&room), RECV_TIMEOUT).await?;
    player.send("not json").await?;
    player.send_json(&json!({"type": "start"})).await?;
    player.send_json(&json!({"type": "answer"})).await?;
    player.send_binary(vec![1, 2, 3]).await?;
    player.expect_silence(Duration::from_millis(200)).await;

    // the connection is still usable
    player.send_json(&json!({"type": "attach"})).await?;
    player.expect_type("server_ready").await?;

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn answers_before_attach_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("early");

    let mut organizer = WebSocketClient::attached_organizer(&server.organizer_url(&room)).await?;
    organizer.send_json(&json!({"type": "start"})).await?;
    organizer.expect_type("game_started").await?;

    let mut player = WebSocketClient::connect_retry(&server.player_url(&room), RECV_TIMEOUT).await?;
    player
        .send_json(&json!({"type": "answer", "question_id": "1", "answer_id": "1"}))
        .await?;
    organizer.expect_silence(Duration::from_millis(200)).await;
    player.expect_silence(Duration::from_millis(100)).await;

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn organizer_commands_out_of_phase_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("phase");

    let mut organizer = WebSocketClient::attached_organizer(&server.organizer_url(&room)).await?;
    for command in ["advance", "continue", "finish", "restart"] {
        organizer.send_json(&json!({"type": command})).await?;
    }
    organizer.send_json(&json!({"type": "answer", "question_id": "1", "answer_id": "1"})).await?;
    organizer.expect_silence(Duration::from_millis(200)).await;

    organizer.send_json(&json!({"type": "start"})).await?;
    organizer.expect_type("game_started").await?;

    server.stop().await;
    Ok(())
}
