pub mod game;
pub mod player;

pub use game::{
    // Board primitives
    Cell, Letter, Position, Premium,
};
pub use player::{Player, RACK_SIZE};
