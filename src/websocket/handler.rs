use crate::{
    error::GameError,
    game::{resolver::TurnOutcome, GameSession},
    models::{Letter, Position},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState, GameSummary,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use chrono::Utc;
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// WebSocket upgrade handler; each connection hosts one game
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    let game_id = Uuid::new_v4();

    tracing::info!("WebSocket connection established for game {}", game_id);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages and finished dictionary checks
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        let (done_tx, mut done_rx) = mpsc::channel::<TurnOutcome>(1);
        let mut table = GameTable {
            game_id,
            state: state_for_recv,
            tx,
            done_tx,
            session: None,
        };

        loop {
            tokio::select! {
                incoming = receiver.next() => {
                    let Some(Ok(msg)) = incoming else {
                        break;
                    };
                    match msg {
                        Message::Text(text) => table.handle_text(text.as_str()).await,
                        Message::Close(_) => {
                            tracing::info!("Client disconnected from game {}", game_id);
                            break;
                        }
                        _ => {}
                    }
                }
                Some(outcome) = done_rx.recv() => {
                    table.finish_submission(outcome).await;
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    state.active_games.remove(&game_id);

    tracing::info!("WebSocket connection closed for game {}", game_id);
}

/// Per-connection game state. Only the receive task touches it, so the
/// session needs no locking.
struct GameTable {
    game_id: Uuid,
    state: Arc<AppState>,
    tx: mpsc::Sender<ServerMessage>,
    done_tx: mpsc::Sender<TurnOutcome>,
    session: Option<GameSession>,
}

impl GameTable {
    async fn handle_text(&mut self, text: &str) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(client_msg) => match self.handle_client_message(client_msg) {
                Ok(()) => self.send_state().await,
                Err(e) => {
                    tracing::debug!("Rejected action in game {}: {}", self.game_id, e);
                    self.send(ServerMessage::Error {
                        message: e.to_string(),
                    })
                    .await;
                }
            },
            Err(e) => {
                tracing::error!("Failed to parse message: {}", e);
                self.send(ServerMessage::Error {
                    message: format!("Invalid message format: {}", e),
                })
                .await;
            }
        }
    }

    /// Handle individual client messages
    fn handle_client_message(&mut self, msg: ClientMessage) -> Result<(), GameError> {
        match msg {
            ClientMessage::StartGame { players } => self.start_game(players),
            ClientMessage::PlaceTile { letter, row, col } => {
                let letter = Letter::try_from(letter)?;
                self.session_mut()?
                    .place_tile(letter, Position::new(row, col))
            }
            ClientMessage::RemoveTile { row, col } => self
                .session_mut()?
                .remove_tile(Position::new(row, col))
                .map(|_| ()),
            ClientMessage::SubmitTurn => self.submit_turn(),
            ClientMessage::ExchangeTile { letter } => {
                let letter = Letter::try_from(letter)?;
                self.session_mut()?.exchange_tile(letter).map(|_| ())
            }
            ClientMessage::ShuffleRack => self.session_mut()?.shuffle_rack(),
        }
    }

    fn session_mut(&mut self) -> Result<&mut GameSession, GameError> {
        self.session.as_mut().ok_or(GameError::GameNotStarted)
    }

    fn start_game(&mut self, players: Vec<String>) -> Result<(), GameError> {
        if self
            .session
            .as_ref()
            .is_some_and(GameSession::is_submission_in_flight)
        {
            return Err(GameError::SubmissionInFlight);
        }

        let session = GameSession::start(&players, self.state.config.game.max_players)?;
        let names: Vec<String> = session.players().iter().map(|p| p.name.clone()).collect();

        tracing::info!("Game {} started with players: {:?}", self.game_id, names);

        self.state.active_games.insert(
            self.game_id,
            GameSummary {
                players: names,
                started_at: Utc::now(),
            },
        );
        self.session = Some(session);
        Ok(())
    }

    /// Start checking the turn's words on a separate task; the verdict comes
    /// back through `done_tx`
    fn submit_turn(&mut self) -> Result<(), GameError> {
        let pending = self.session_mut()?.begin_submission()?;
        let oracle = Arc::clone(&self.state.dictionary);
        let done_tx = self.done_tx.clone();

        tokio::spawn(async move {
            let outcome = pending.resolve(oracle.as_ref()).await;
            let _ = done_tx.send(outcome).await;
        });
        Ok(())
    }

    async fn finish_submission(&mut self, outcome: TurnOutcome) {
        if let Some(session) = self.session.as_mut() {
            session.complete_submission(&outcome);
            tracing::debug!(
                "Game {}: player {} to play, {} tiles left in the bag",
                self.game_id,
                session.current_index() + 1,
                session.bag_remaining()
            );
        }

        tracing::info!(
            "Game {}: turn {} (+{}), valid {:?}, invalid {:?}",
            self.game_id,
            if outcome.accepted { "accepted" } else { "rejected" },
            outcome.total_score,
            outcome.accepted_words.iter().map(|w| &w.word).collect::<Vec<_>>(),
            outcome.rejected_words
        );

        self.send(ServerMessage::TurnResult(outcome)).await;
        self.send_state().await;
    }

    async fn send_state(&self) {
        if let Some(session) = &self.session {
            self.send(ServerMessage::GameState(session.snapshot())).await;
        }
    }

    async fn send(&self, msg: ServerMessage) {
        let _ = self.tx.send(msg).await;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        build_router,
        config::Config,
        dictionary::{Dictionary, WordOracle},
        AppState,
    };
    use async_trait::async_trait;
    use dashmap::DashMap;
    use futures::{SinkExt, StreamExt};
    use serde_json::{json, Value};
    use std::{sync::Arc, time::Duration};
    use tokio_tungstenite::{connect_async, tungstenite::Message};

    type Client = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Says yes to every word, but only after a pause
    struct SlowOracle;

    #[async_trait]
    impl WordOracle for SlowOracle {
        async fn is_valid_word(&self, _word: &str) -> bool {
            tokio::time::sleep(Duration::from_millis(300)).await;
            true
        }
    }

    async fn spawn_server(words: &[&str]) -> (String, Arc<AppState>) {
        spawn_server_with(Arc::new(Dictionary::from_words(words.iter().copied()))).await
    }

    async fn spawn_server_with(dictionary: Arc<dyn WordOracle>) -> (String, Arc<AppState>) {
        let state = Arc::new(AppState {
            config: Config::from_source(|_| None).unwrap(),
            dictionary,
            active_games: DashMap::new(),
        });
        let app = build_router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("ws://{}/ws", addr), state)
    }

    async fn send(client: &mut Client, msg: Value) {
        client
            .send(Message::Text(msg.to_string().into()))
            .await
            .unwrap();
    }

    /// Read until a message of the given type arrives
    async fn expect(client: &mut Client, kind: &str) -> Value {
        loop {
            let msg = client.next().await.unwrap().unwrap();
            if let Message::Text(text) = msg {
                let value: Value = serde_json::from_str(text.as_str()).unwrap();
                if value["type"] == kind {
                    return value;
                }
            }
        }
    }

    #[tokio::test]
    async fn test_actions_before_start_are_rejected() {
        let (url, _state) = spawn_server(&[]).await;
        let (mut client, _) = connect_async(url).await.unwrap();

        send(&mut client, json!({"type": "submit_turn"})).await;
        let error = expect(&mut client, "error").await;
        assert!(error["message"].as_str().unwrap().contains("No game in progress"));
    }

    #[tokio::test]
    async fn test_start_place_and_submit() {
        let (url, state) = spawn_server(&[]).await;
        let (mut client, _) = connect_async(url).await.unwrap();

        send(&mut client, json!({"type": "start_game", "players": ["Ada", "Grace"]})).await;
        let game = expect(&mut client, "game_state").await;
        assert_eq!(game["players"].as_array().unwrap().len(), 2);
        assert_eq!(game["bag_remaining"], 86);
        assert_eq!(state.active_games.len(), 1);

        let letter = game["players"][0]["rack"][0].as_str().unwrap().to_string();
        send(
            &mut client,
            json!({"type": "place_tile", "letter": letter, "row": 7, "col": 7}),
        )
        .await;
        let game = expect(&mut client, "game_state").await;
        assert_eq!(game["turn_tiles"], json!([{"row": 7, "col": 7}]));

        // A lone tile forms no word, so the turn is rejected and nothing moves
        send(&mut client, json!({"type": "submit_turn"})).await;
        let result = expect(&mut client, "turn_result").await;
        assert_eq!(result["accepted"], false);
        let game = expect(&mut client, "game_state").await;
        assert_eq!(game["current_player"], 0);
        assert_eq!(game["submission_in_flight"], false);
        assert_eq!(game["board"][7][7]["letter"], letter.as_str());
    }

    #[tokio::test]
    async fn test_actions_wait_for_words_being_checked() {
        let (url, _state) = spawn_server_with(Arc::new(SlowOracle)).await;
        let (mut client, _) = connect_async(url).await.unwrap();

        send(&mut client, json!({"type": "start_game", "players": ["Ada", "Grace"]})).await;
        let game = expect(&mut client, "game_state").await;
        let rack = game["players"][0]["rack"].as_array().unwrap().clone();

        for (col, letter) in [7, 8].into_iter().zip(&rack) {
            send(
                &mut client,
                json!({"type": "place_tile", "letter": letter, "row": 7, "col": col}),
            )
            .await;
            expect(&mut client, "game_state").await;
        }

        send(&mut client, json!({"type": "submit_turn"})).await;
        let game = expect(&mut client, "game_state").await;
        assert_eq!(game["submission_in_flight"], true);

        // A second submit and a tile move both bounce while the check runs
        send(&mut client, json!({"type": "submit_turn"})).await;
        let error = expect(&mut client, "error").await;
        assert_eq!(error["message"], "Your words are still being checked");
        send(&mut client, json!({"type": "remove_tile", "row": 7, "col": 8})).await;
        let error = expect(&mut client, "error").await;
        assert_eq!(error["message"], "Your words are still being checked");

        let result = expect(&mut client, "turn_result").await;
        assert_eq!(result["accepted"], true);
        let game = expect(&mut client, "game_state").await;
        assert_eq!(game["current_player"], 1);
        assert_eq!(game["submission_in_flight"], false);
        assert_eq!(game["board"][7][7]["locked"], true);
        assert_eq!(game["board"][7][8]["locked"], true);
    }

    #[tokio::test]
    async fn test_bad_json_reports_error() {
        let (url, _state) = spawn_server(&[]).await;
        let (mut client, _) = connect_async(url).await.unwrap();

        client.send(Message::Text("not json".into())).await.unwrap();
        let error = expect(&mut client, "error").await;
        assert!(error["message"].as_str().unwrap().starts_with("Invalid message format"));
    }
}
