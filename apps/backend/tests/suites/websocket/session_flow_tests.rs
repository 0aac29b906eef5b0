use std::time::Duration;

use quizroom_test_support::unique_room;
use serde_json::json;

use crate::support::server::start_test_server;
use crate::support::websocket_client::{WebSocketClient, RECV_TIMEOUT};

#[actix_web::test]
async fn welcome_carries_stripped_questions_and_roster() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("welcome");

    let mut organizer = WebSocketClient::connect_retry(&server.organizer_url(&room), RECV_TIMEOUT).await?;
    organizer.send_json(&json!({"type": "attach"})).await?;

    let ready = organizer.expect_type("server_ready").await?;
    assert!(ready.get("player_id").is_none());

    let questions = organizer.expect_type("set_questions").await?;
    let questions = questions["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    for question in questions {
        assert!(question.get("correct_answer_id").is_none(), "leaked: {question}");
        assert_eq!(question["answers"].as_array().unwrap().len(), 4);
        assert_eq!(question["time_ms"], 10_000);
    }

    let players = organizer.expect_type("set_players").await?;
    assert_eq!(players["players"], json!([]));

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn joins_are_announced_to_others_and_organizer() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("joins");

    let mut organizer = WebSocketClient::attached_organizer(&server.organizer_url(&room)).await?;
    let (mut p1, p1_id) = WebSocketClient::attached_player(&server.player_url(&room), None).await?;

    let joined = organizer.expect_type("player_joined").await?;
    assert_eq!(joined["player"]["id"], p1_id.as_str());
    assert_eq!(joined["player"]["display_name"], "Player 1");
    assert_eq!(joined["player"]["score"], 0);

    let (_p2, p2_id) = WebSocketClient::attached_player(&server.player_url(&room), None).await?;
    assert_ne!(p1_id, p2_id);

    let joined = p1.expect_type("player_joined").await?;
    assert_eq!(joined["player"]["display_name"], "Player 2");
    let joined = organizer.expect_type("player_joined").await?;
    assert_eq!(joined["player"]["id"], p2_id.as_str());

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn full_game_scores_and_walks_every_phase() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("game");

    let mut organizer = WebSocketClient::attached_organizer(&server.organizer_url(&room)).await?;
    let (mut p1, p1_id) = WebSocketClient::attached_player(&server.player_url(&room), None).await?;
    organizer.expect_type("player_joined").await?;
    let (mut p2, _) = WebSocketClient::attached_player(&server.player_url(&room), None).await?;
    p1.expect_type("player_joined").await?;
    organizer.expect_type("player_joined").await?;

    organizer.send_json(&json!({"type": "start"})).await?;
    for client in [&mut organizer, &mut p1, &mut p2] {
        client.expect_type("game_started").await?;
    }

    p1.send_json(&json!({"type": "answer", "question_id": "1", "answer_id": "1"})).await?;
    p2.send_json(&json!({"type": "answer", "question_id": "1", "answer_id": "2"})).await?;
    // duplicate from p1 must not score twice
    p1.send_json(&json!({"type": "answer", "question_id": "1", "answer_id": "1"})).await?;

    for client in [&mut organizer, &mut p1, &mut p2] {
        let update = client.expect_type("player_score_updated").await?;
        assert_eq!(update["player_id"], p1_id.as_str());
        assert_eq!(update["score"], 100);
    }
    for client in [&mut organizer, &mut p1, &mut p2] {
        client.expect_silence(Duration::from_millis(200)).await;
    }

    let snapshot = server
        .state
        .dispatcher
        .get(&room.as_str().into())
        .unwrap()
        .send(quizroom::session::GetSnapshot)
        .await?;
    let scores: Vec<u32> = snapshot.players.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![100, 0]);

    for (command, broadcast) in [
        ("advance", "question_completed"),
        ("continue", "game_continued"),
        ("finish", "game_finished"),
        ("restart", "game_restarted"),
    ] {
        organizer.send_json(&json!({"type": command})).await?;
        for client in [&mut organizer, &mut p1, &mut p2] {
            client.expect_type(broadcast).await?;
        }
    }

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn restart_empties_roster_and_reloads_questions() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server().await?;
    let room = unique_room("restart");

    let mut organizer = WebSocketClient::attached_organizer(&server.organizer_url(&room)).await?;
    let (_p1, _) = WebSocketClient::attached_player(&server.player_url(&room), None).await?;
    organizer.expect_type("player_joined").await?;

    for (command, broadcast) in [
        ("start", "game_started"),
        ("finish", "game_finished"),
        ("restart", "game_restarted"),
    ] {
        organizer.send_json(&json!({"type": command})).await?;
        organizer.expect_type(broadcast).await?;
    }

    // organizer is kept across the restart; re-attaching shows the fresh room
    organizer.send_json(&json!({"type": "attach"})).await?;
    organizer.expect_type("server_ready").await?;
    let questions = organizer.expect_type("set_questions").await?;
    assert_eq!(questions["questions"].as_array().unwrap().len(), 3);
    let players = organizer.expect_type("set_players").await?;
    assert_eq!(players["players"], json!([]));

    let (_p2, _) = WebSocketClient::attached_player(&server.player_url(&room), None).await?;
    let joined = organizer.expect_type("player_joined").await?;
    assert_eq!(joined["player"]["display_name"], "Player 1");

    server.stop().await;
    Ok(())
}
