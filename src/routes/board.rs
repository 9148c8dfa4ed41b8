use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    game::layout::{layout_grid, BOARD_SIZE},
    models::Premium,
    utils::letters::letter_value_table,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub size: usize,
    /// Row-major premium squares, `null` for plain squares
    pub premiums: Vec<Vec<Option<Premium>>>,
    pub letter_values: BTreeMap<char, u8>,
}

#[derive(Debug, Serialize)]
pub struct GameListEntry {
    pub game_id: Uuid,
    pub players: Vec<String>,
    pub started_at: DateTime<Utc>,
}

/// Static board data the client needs to render squares and tiles
pub async fn get_layout() -> Json<LayoutResponse> {
    Json(LayoutResponse {
        size: BOARD_SIZE,
        premiums: layout_grid(),
        letter_values: letter_value_table().into_iter().collect(),
    })
}

/// Games currently being played, oldest first
pub async fn list_games(State(state): State<Arc<AppState>>) -> Json<Vec<GameListEntry>> {
    let mut games: Vec<GameListEntry> = state
        .active_games
        .iter()
        .map(|entry| GameListEntry {
            game_id: *entry.key(),
            players: entry.players.clone(),
            started_at: entry.started_at,
        })
        .collect();
    games.sort_by_key(|game| game.started_at);
    Json(games)
}
