// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket test client
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to a WebSocket endpoint, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Player connection that has attached and consumed its three-message
    /// welcome. Returns the client and its issued player id.
    pub async fn attached_player(
        url: &str,
        claimed: Option<&str>,
    ) -> Result<(Self, String), Box<dyn std::error::Error>> {
        let mut client = Self::connect_retry(url, RECV_TIMEOUT).await?;
        match claimed {
            Some(id) => client.send_json(&json!({"type": "attach", "player_id": id})).await?,
            None => client.send_json(&json!({"type": "attach"})).await?,
        }

        let ready = client.expect_type("server_ready").await?;
        let player_id = ready["player_id"]
            .as_str()
            .ok_or("server_ready without player_id")?
            .to_string();
        client.expect_type("set_questions").await?;
        client.expect_type("set_players").await?;
        Ok((client, player_id))
    }

    /// Organizer connection that has attached and consumed its welcome.
    pub async fn attached_organizer(url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut client = Self::connect_retry(url, RECV_TIMEOUT).await?;
        client.send_json(&json!({"type": "attach"})).await?;
        client.expect_type("server_ready").await?;
        client.expect_type("set_questions").await?;
        client.expect_type("set_players").await?;
        Ok(client)
    }

    /// Send a text message
    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.send(&value.to_string()).await
    }

    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Binary(bytes.into())).await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next text frame parsed as JSON. Control frames are skipped; `None`
    /// means the server closed the socket.
    pub async fn recv_json_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(serde_json::from_str(text.as_str())?)),
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(Box::new(err)),
            }
        }
    }

    /// Next message, which must have the given `type`.
    pub async fn expect_type(&mut self, kind: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let msg = self
            .recv_json_timeout(RECV_TIMEOUT)
            .await?
            .ok_or_else(|| format!("connection closed while waiting for {kind}"))?;
        if msg["type"] != kind {
            return Err(format!("expected {kind}, got {msg}").into());
        }
        Ok(msg)
    }

    /// Assert nothing but control frames arrive for `window`.
    pub async fn expect_silence(&mut self, window: Duration) {
        match self.recv_json_timeout(window).await {
            Err(_) => {}
            Ok(Some(msg)) => panic!("expected silence, got {msg}"),
            Ok(None) => panic!("expected silence, connection closed"),
        }
    }

    /// Wait for the server to close the socket, discarding anything else.
    pub async fn wait_closed(&mut self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Err(_) => return false,
                Ok(None) | Ok(Some(Ok(Message::Close(_)))) | Ok(Some(Err(_))) => return true,
                Ok(Some(Ok(_))) => continue,
            }
        }
    }
}
