use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::GameError, utils::letters::get_letter_value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single uppercase tile letter, A through Z
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

impl Letter {
    /// Accepts either case; anything outside A-Z is rejected
    pub fn new(ch: char) -> Option<Self> {
        let upper = ch.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper))
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Base point value of the tile
    pub fn value(self) -> u32 {
        u32::from(get_letter_value(self.0))
    }
}

impl TryFrom<char> for Letter {
    type Error = GameError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Letter::new(ch).ok_or(GameError::InvalidLetter(ch))
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Premium square categories on the board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Premium {
    #[serde(rename = "TW")]
    TripleWord,
    #[serde(rename = "DW")]
    DoubleWord,
    #[serde(rename = "TL")]
    TripleLetter,
    #[serde(rename = "DL")]
    DoubleLetter,
    /// The starting square; scores as a double word
    #[serde(rename = "CENTER")]
    Center,
}

impl Premium {
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Premium::TripleLetter => 3,
            Premium::DoubleLetter => 2,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Premium::TripleWord => 3,
            Premium::DoubleWord | Premium::Center => 2,
            _ => 1,
        }
    }
}

/// One square of the board.
///
/// `locked` is only ever set on a cell holding a letter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<Letter>,
    pub placed_this_turn: bool,
    pub locked: bool,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}
