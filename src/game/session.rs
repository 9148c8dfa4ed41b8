use std::collections::HashSet;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    dictionary::WordOracle,
    error::GameError,
    game::{
        bag::TileBag,
        board::Board,
        extractor::{CandidateWord, WordExtractor},
        resolver::{TurnOutcome, TurnResolver},
    },
    models::{Cell, Letter, Player, Position, RACK_SIZE},
    utils::letters::TOTAL_TILES,
};

/// Hard upper bound on seats at one board
pub const MAX_PLAYERS: usize = 4;

/// Everything a client needs to draw the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<Cell>>,
    pub players: Vec<Player>,
    pub current_player: usize,
    pub bag_remaining: usize,
    pub turn_tiles: Vec<Position>,
    pub submission_in_flight: bool,
}

/// Candidate words captured when a submission starts.
///
/// Resolving it needs only the oracle, so it can run on another task while
/// the session keeps answering other requests.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub candidates: Vec<CandidateWord>,
    pub newly_placed: HashSet<Position>,
}

impl PendingTurn {
    pub async fn resolve(&self, oracle: &dyn WordOracle) -> TurnOutcome {
        TurnResolver::resolve(oracle, &self.candidates, &self.newly_placed).await
    }
}

/// One running game: board, bag, players and whose turn it is
pub struct GameSession {
    board: Board,
    bag: TileBag,
    players: Vec<Player>,
    current: usize,
    turn_tiles: HashSet<Position>,
    submission_in_flight: bool,
    rng: StdRng,
}

impl GameSession {
    /// Seat the players and deal their racks
    pub fn start(names: &[String], max_players: usize) -> Result<Self, GameError> {
        Self::start_with_rng(names, max_players, StdRng::from_os_rng())
    }

    pub fn start_with_rng(
        names: &[String],
        max_players: usize,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        let max = max_players.clamp(1, MAX_PLAYERS);
        if names.is_empty() || names.len() > max {
            return Err(GameError::InvalidPlayerCount {
                requested: names.len(),
                max,
            });
        }

        let mut bag = TileBag::new(&mut rng);
        let players = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let name = name.trim();
                let mut player = if name.is_empty() {
                    Player::new(format!("Player {}", idx + 1))
                } else {
                    Player::new(name)
                };
                bag.replenish(&mut player.rack, RACK_SIZE);
                player
            })
            .collect();

        Ok(Self {
            board: Board::new(),
            bag,
            players,
            current: 0,
            turn_tiles: HashSet::new(),
            submission_in_flight: false,
            rng,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn bag_remaining(&self) -> usize {
        self.bag.remaining()
    }

    pub fn is_submission_in_flight(&self) -> bool {
        self.submission_in_flight
    }

    /// Tiles accounted for across bag, racks and board; always the full set
    pub fn tiles_in_play(&self) -> usize {
        self.bag.remaining()
            + self.players.iter().map(|p| p.rack.len()).sum::<usize>()
            + self.board.tile_count()
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        if self.submission_in_flight {
            return Err(GameError::SubmissionInFlight);
        }
        Ok(())
    }

    /// Move a tile from the active player's rack onto the board
    pub fn place_tile(&mut self, letter: Letter, pos: Position) -> Result<(), GameError> {
        self.ensure_idle()?;
        self.board.ensure_free(pos)?;
        self.players[self.current].take_from_rack(letter)?;
        self.board.place(pos, letter)?;
        self.turn_tiles.insert(pos);
        Ok(())
    }

    /// Return a tile placed this turn to the active player's rack
    pub fn remove_tile(&mut self, pos: Position) -> Result<Letter, GameError> {
        self.ensure_idle()?;
        let letter = self.board.take_back(pos)?;
        self.turn_tiles.remove(&pos);
        self.players[self.current].rack.push(letter);
        Ok(letter)
    }

    pub fn shuffle_rack(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        self.players[self.current].rack.shuffle(&mut self.rng);
        Ok(())
    }

    /// Swap one rack tile for a fresh one from the bag. Allowed once per
    /// player, with an empty board for this turn; the turn does not end.
    pub fn exchange_tile(&mut self, letter: Letter) -> Result<Letter, GameError> {
        self.ensure_idle()?;
        let player = &self.players[self.current];
        if !player.exchange_available {
            return Err(GameError::ExchangeUsed);
        }
        if !self.turn_tiles.is_empty() {
            return Err(GameError::ExchangeWithTilesPlaced);
        }
        if self.bag.is_empty() {
            return Err(GameError::BagEmpty);
        }

        let player = &mut self.players[self.current];
        player.take_from_rack(letter)?;
        self.bag.return_tile(letter, &mut self.rng);
        let drawn = self.bag.draw().ok_or(GameError::BagEmpty)?;
        player.rack.push(drawn);
        player.exchange_available = false;

        tracing::debug!("{} exchanged {} for {}", player.name, letter, drawn);
        Ok(drawn)
    }

    /// Capture this turn's candidate words and mark a submission as running.
    ///
    /// Must be followed by [`GameSession::complete_submission`]; until then
    /// every other mutation is refused.
    pub fn begin_submission(&mut self) -> Result<PendingTurn, GameError> {
        self.ensure_idle()?;
        if self.turn_tiles.is_empty() {
            return Err(GameError::NoTilesPlaced);
        }

        let candidates = WordExtractor::extract(&self.board.snapshot());
        let candidates = TurnResolver::relevant_candidates(candidates, &self.turn_tiles);
        self.submission_in_flight = true;

        tracing::debug!(
            "{} submitted {} tile(s) forming {} candidate word(s)",
            self.current_player().name,
            self.turn_tiles.len(),
            candidates.len()
        );

        Ok(PendingTurn {
            candidates,
            newly_placed: self.turn_tiles.clone(),
        })
    }

    /// Apply a resolved turn. A rejected turn leaves the board untouched for
    /// the player to fix; an accepted one locks the tiles, banks the score,
    /// refills the rack and passes play on.
    pub fn complete_submission(&mut self, outcome: &TurnOutcome) {
        if !self.submission_in_flight {
            tracing::warn!("Ignoring turn result with no submission in flight");
            return;
        }
        self.submission_in_flight = false;

        if !outcome.accepted {
            return;
        }

        self.board.lock(&self.turn_tiles);
        self.turn_tiles.clear();

        let player = &mut self.players[self.current];
        player.score += outcome.total_score;
        player.exchange_available = false;
        self.bag.replenish(&mut player.rack, RACK_SIZE);
        if player.rack.len() < RACK_SIZE {
            tracing::info!("Bag is empty, {} plays on with {} tiles", player.name, player.rack.len());
        }

        self.current = (self.current + 1) % self.players.len();
        debug_assert_eq!(self.tiles_in_play(), TOTAL_TILES);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut turn_tiles: Vec<Position> = self.turn_tiles.iter().copied().collect();
        turn_tiles.sort();
        GameSnapshot {
            board: self.board.rows(),
            players: self.players.clone(),
            current_player: self.current,
            bag_remaining: self.bag.remaining(),
            turn_tiles,
            submission_in_flight: self.submission_in_flight,
        }
    }
}

#[cfg(test)]
impl GameSession {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn_tiles(&self) -> &HashSet<Position> {
        &self.turn_tiles
    }

    /// Submit the turn and wait for the verdict in one go
    pub async fn submit_turn(&mut self, oracle: &dyn WordOracle) -> Result<TurnOutcome, GameError> {
        let pending = self.begin_submission()?;
        let outcome = pending.resolve(oracle).await;
        self.complete_submission(&outcome);
        Ok(outcome)
    }
}
