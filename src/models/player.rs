use serde::{Deserialize, Serialize};

use super::Letter;
use crate::error::GameError;

/// Tiles a full rack holds
pub const RACK_SIZE: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub rack: Vec<Letter>,
    /// One-shot tile exchange; cleared by the first exchange or accepted turn
    pub exchange_available: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            rack: Vec::with_capacity(RACK_SIZE),
            exchange_available: true,
        }
    }

    /// Remove one copy of `letter` from the rack
    pub fn take_from_rack(&mut self, letter: Letter) -> Result<(), GameError> {
        let idx = self
            .rack
            .iter()
            .position(|l| *l == letter)
            .ok_or(GameError::LetterNotInRack(letter.as_char()))?;
        self.rack.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(ch: char) -> Letter {
        Letter::new(ch).unwrap()
    }

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new("Ada");
        assert_eq!(player.score, 0);
        assert!(player.rack.is_empty());
        assert!(player.exchange_available);
    }

    #[test]
    fn test_take_from_rack_removes_single_copy() {
        let mut player = Player::new("Ada");
        player.rack = vec![letter('A'), letter('B'), letter('A')];

        assert_eq!(player.take_from_rack(letter('A')), Ok(()));
        assert_eq!(player.rack, vec![letter('B'), letter('A')]);
        assert_eq!(
            player.take_from_rack(letter('Z')),
            Err(GameError::LetterNotInRack('Z'))
        );
        assert_eq!(player.rack, vec![letter('B'), letter('A')]);
    }
}
