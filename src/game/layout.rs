use crate::models::{Position, Premium};

/// Squares per side of the board
pub const BOARD_SIZE: usize = 15;
pub const CENTER: Position = Position::new(7, 7);

/// Premium square at `pos` on the standard 15x15 layout.
///
/// The layout is symmetric in both axes and along the diagonals, so every
/// position is folded into one eighth of the board before matching.
pub fn premium_at(pos: Position) -> Option<Premium> {
    if pos.row >= BOARD_SIZE || pos.col >= BOARD_SIZE {
        return None;
    }
    if pos == CENTER {
        return Some(Premium::Center);
    }

    let mut row = pos.row.min(BOARD_SIZE - 1 - pos.row);
    let mut col = pos.col.min(BOARD_SIZE - 1 - pos.col);
    if col > row {
        std::mem::swap(&mut row, &mut col);
    }

    match (row, col) {
        (0, 0) | (7, 0) => Some(Premium::TripleWord),
        (5, 1) | (5, 5) => Some(Premium::TripleLetter),
        (3, 0) | (6, 2) | (7, 3) | (6, 6) => Some(Premium::DoubleLetter),
        (r, c) if r == c && (1..=4).contains(&r) => Some(Premium::DoubleWord),
        _ => None,
    }
}

/// The whole layout, row by row
pub fn layout_grid() -> Vec<Vec<Option<Premium>>> {
    (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| premium_at(Position::new(row, col)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(kind: Premium) -> usize {
        layout_grid()
            .iter()
            .flatten()
            .filter(|p| **p == Some(kind))
            .count()
    }

    #[test]
    fn test_premium_counts_match_standard_board() {
        assert_eq!(count(Premium::TripleWord), 8);
        assert_eq!(count(Premium::DoubleWord), 16);
        assert_eq!(count(Premium::TripleLetter), 12);
        assert_eq!(count(Premium::DoubleLetter), 24);
        assert_eq!(count(Premium::Center), 1);
    }

    #[test]
    fn test_known_squares() {
        assert_eq!(premium_at(Position::new(0, 0)), Some(Premium::TripleWord));
        assert_eq!(premium_at(Position::new(0, 7)), Some(Premium::TripleWord));
        assert_eq!(premium_at(Position::new(0, 3)), Some(Premium::DoubleLetter));
        assert_eq!(premium_at(Position::new(1, 5)), Some(Premium::TripleLetter));
        assert_eq!(premium_at(Position::new(13, 13)), Some(Premium::DoubleWord));
        assert_eq!(premium_at(Position::new(7, 11)), Some(Premium::DoubleLetter));
        assert_eq!(premium_at(Position::new(7, 8)), None);
        assert_eq!(premium_at(Position::new(15, 0)), None);
    }

    #[test]
    fn test_layout_survives_half_turn() {
        let grid = layout_grid();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                assert_eq!(
                    grid[row][col],
                    grid[BOARD_SIZE - 1 - row][BOARD_SIZE - 1 - col],
                    "layout should be symmetric at ({}, {})",
                    row,
                    col
                );
            }
        }
    }
}
