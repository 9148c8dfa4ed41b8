// Game engine modules

pub mod bag;
pub mod board;
pub mod extractor;
pub mod layout;
pub mod resolver;
pub mod scorer;
pub mod session;

pub use session::{GameSession, GameSnapshot, MAX_PLAYERS};
