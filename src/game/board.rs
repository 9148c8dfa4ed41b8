use crate::{
    error::GameError,
    game::layout::BOARD_SIZE,
    models::{Cell, Letter, Position},
};

/// Board as plain text, one single-letter string per square ("" when empty)
pub type BoardSnapshot = Vec<Vec<String>>;

#[derive(Debug, Clone)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::default(); BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.row)?.get(pos.col)
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell, GameError> {
        self.cells
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
            .ok_or(GameError::OutOfBounds(pos))
    }

    /// Check that a tile could go on `pos` right now
    pub fn ensure_free(&self, pos: Position) -> Result<(), GameError> {
        let cell = self.cell(pos).ok_or(GameError::OutOfBounds(pos))?;
        if cell.locked {
            return Err(GameError::CellLocked(pos));
        }
        if !cell.is_empty() {
            return Err(GameError::CellOccupied(pos));
        }
        Ok(())
    }

    /// Put a tile on an empty square for the current turn
    pub fn place(&mut self, pos: Position, letter: Letter) -> Result<(), GameError> {
        self.ensure_free(pos)?;
        *self.cell_mut(pos)? = Cell {
            letter: Some(letter),
            placed_this_turn: true,
            locked: false,
        };
        Ok(())
    }

    /// Lift a tile placed this turn off the board
    pub fn take_back(&mut self, pos: Position) -> Result<Letter, GameError> {
        let cell = self.cell_mut(pos)?;
        if cell.locked {
            return Err(GameError::CellLocked(pos));
        }
        if !cell.placed_this_turn {
            return Err(GameError::NothingToRemove(pos));
        }
        cell.placed_this_turn = false;
        cell.letter.take().ok_or(GameError::NothingToRemove(pos))
    }

    /// Confirm this turn's tiles; they can no longer move
    pub fn lock<'a>(&mut self, positions: impl IntoIterator<Item = &'a Position>) {
        for pos in positions {
            if let Ok(cell) = self.cell_mut(*pos) {
                if cell.letter.is_some() {
                    cell.locked = true;
                    cell.placed_this_turn = false;
                }
            }
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.letter.map(|l| l.to_string()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// Number of squares holding a tile, locked or not
    pub fn tile_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

#[cfg(test)]
impl Board {
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| !cell.is_empty())
    }

    pub fn is_locked(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell.locked)
    }

    pub fn locked_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.locked).count()
    }
}
