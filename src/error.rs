use thiserror::Error;

use crate::models::Position;

/// A player action the game refuses.
///
/// These never end a session: the connection reports the message back and
/// the game state is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No game in progress. Choose the players to start one.")]
    GameNotStarted,
    #[error("A game needs between 1 and {max} players, got {requested}")]
    InvalidPlayerCount { requested: usize, max: usize },
    #[error("'{0}' is not a letter tile")]
    InvalidLetter(char),
    #[error("Square {0} is off the board")]
    OutOfBounds(Position),
    #[error("Square {0} already has a tile")]
    CellOccupied(Position),
    #[error("The tile on {0} was played in an earlier turn and cannot move")]
    CellLocked(Position),
    #[error("There is no tile placed this turn on {0}")]
    NothingToRemove(Position),
    #[error("You don't have a '{0}' on your rack")]
    LetterNotInRack(char),
    #[error("You haven't placed any tiles this turn!")]
    NoTilesPlaced,
    #[error("Your words are still being checked")]
    SubmissionInFlight,
    #[error("You have already used your exchange")]
    ExchangeUsed,
    #[error("Take your tiles back to the rack before exchanging")]
    ExchangeWithTilesPlaced,
    #[error("The bag is empty")]
    BagEmpty,
}
