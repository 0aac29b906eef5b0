use std::time::Duration;

use quizroom_test_support::unique_room;
use serde_json::json;

use crate::support::server::{fast_heartbeat_state, start_test_server, start_test_server_with};
use crate::support::websocket_client::{WebSocketClient, RECV_TIMEOUT};

#[actix_web::test]
async fn rebinding_keeps_identity_and_moves_delivery() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("rebind");

    let mut organizer = WebSocketClient::attached_organizer(&server.organizer_url(&room)).await?;
    let (mut first, player_id) =
        WebSocketClient::attached_player(&server.player_url(&room), None).await?;
    organizer.expect_type("player_joined").await?;

    let mut second = WebSocketClient::connect_retry(&server.player_url(&room), RECV_TIMEOUT).await?;
    second
        .send_json(&json!({"type": "attach", "player_id": player_id}))
        .await?;
    let ready = second.expect_type("server_ready").await?;
    assert_eq!(ready["player_id"], player_id.as_str());
    second.expect_type("set_questions").await?;
    let roster = second.expect_type("set_players").await?;
    let roster = roster["players"].as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["display_name"], "Player 1");

    let joined = organizer.expect_type("player_joined").await?;
    assert_eq!(joined["player"]["id"], player_id.as_str());

    organizer.send_json(&json!({"type": "start"})).await?;
    organizer.expect_type("game_started").await?;
    second.expect_type("game_started").await?;
    first.expect_silence(Duration::from_millis(300)).await;

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn superseded_connection_cannot_answer() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("stale");

    let mut organizer = WebSocketClient::attached_organizer(&server.organizer_url(&room)).await?;
    let (mut first, player_id) =
        WebSocketClient::attached_player(&server.player_url(&room), None).await?;
    organizer.expect_type("player_joined").await?;
    let (mut second, _) =
        WebSocketClient::attached_player(&server.player_url(&room), Some(&player_id)).await?;
    organizer.expect_type("player_joined").await?;

    organizer.send_json(&json!({"type": "start"})).await?;
    organizer.expect_type("game_started").await?;
    second.expect_type("game_started").await?;

    first
        .send_json(&json!({"type": "answer", "question_id": "1", "answer_id": "1"}))
        .await?;
    organizer.expect_silence(Duration::from_millis(300)).await;

    second
        .send_json(&json!({"type": "answer", "question_id": "1", "answer_id": "1"}))
        .await?;
    let update = organizer.expect_type("player_score_updated").await?;
    assert_eq!(update["score"], 100);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn first_attach_fixes_the_connection_identity() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("fixed");

    let (mut player, player_id) =
        WebSocketClient::attached_player(&server.player_url(&room), None).await?;

    player
        .send_json(&json!({"type": "attach", "player_id": "someone-else"}))
        .await?;
    let ready = player.expect_type("server_ready").await?;
    assert_eq!(ready["player_id"], player_id.as_str());

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn unissued_player_id_is_replaced() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("forged");

    let (_player, player_id) =
        WebSocketClient::attached_player(&server.player_url(&room), Some("mallory")).await?;
    assert_ne!(player_id, "mallory");
    assert!(uuid::Uuid::parse_str(&player_id).is_ok());

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn player_id_from_another_room_is_replaced() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room_a = unique_room("origin");
    let room_b = unique_room("elsewhere");

    let (_first, issued) =
        WebSocketClient::attached_player(&server.player_url(&room_a), None).await?;
    let (_second, player_id) =
        WebSocketClient::attached_player(&server.player_url(&room_b), Some(&issued)).await?;
    assert_ne!(player_id, issued);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn silent_connections_are_closed() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server_with(fast_heartbeat_state()).await?;
    let room = unique_room("silent");

    let mut client = WebSocketClient::connect_retry(&server.player_url(&room), RECV_TIMEOUT).await?;
    // do not read, so no pongs go back
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(client.wait_closed(Duration::from_secs(2)).await);

    server.stop().await;
    Ok(())
}
