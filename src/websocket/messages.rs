use serde::{Deserialize, Serialize};

use crate::game::{resolver::TurnOutcome, GameSnapshot};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartGame {
        players: Vec<String>,
    },
    PlaceTile {
        letter: char,
        row: usize,
        col: usize,
    },
    RemoveTile {
        row: usize,
        col: usize,
    },
    SubmitTurn,
    ExchangeTile {
        letter: char,
    },
    ShuffleRack,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full game state after any change
    GameState(GameSnapshot),
    /// Verdict on a submitted turn
    TurnResult(TurnOutcome),
    Error {
        message: String,
    },
}
