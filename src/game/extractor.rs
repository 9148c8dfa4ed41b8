use serde::{Deserialize, Serialize};

use crate::models::Position;

/// A run of two or more adjacent letters in one row or column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateWord {
    pub word: String,
    pub positions: Vec<Position>,
}

impl CandidateWord {
    fn push(&mut self, pos: Position, letter: char) {
        self.word.push(letter);
        self.positions.push(pos);
    }

    /// Letters paired with the square each one sits on
    pub fn tiles(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.positions.iter().copied().zip(self.word.chars())
    }
}

pub struct WordExtractor;

impl WordExtractor {
    /// Find every horizontal run (rows, left to right) followed by every
    /// vertical run (columns, top to bottom).
    pub fn extract(snapshot: &[Vec<String>]) -> Vec<CandidateWord> {
        let mut words = Vec::new();
        let width = snapshot.iter().map(Vec::len).max().unwrap_or(0);

        for (row, cells) in snapshot.iter().enumerate() {
            Self::scan_line(
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, text)| (Position { row, col }, Self::letter_in(text))),
                &mut words,
            );
        }

        for col in 0..width {
            Self::scan_line(
                snapshot.iter().enumerate().map(|(row, cells)| {
                    let letter = cells.get(col).and_then(|text| Self::letter_in(text));
                    (Position { row, col }, letter)
                }),
                &mut words,
            );
        }

        words
    }

    fn scan_line(
        cells: impl Iterator<Item = (Position, Option<char>)>,
        words: &mut Vec<CandidateWord>,
    ) {
        let mut run = CandidateWord::default();
        for (pos, letter) in cells {
            match letter {
                Some(letter) => run.push(pos, letter),
                None => Self::flush(&mut run, words),
            }
        }
        Self::flush(&mut run, words);
    }

    fn flush(run: &mut CandidateWord, words: &mut Vec<CandidateWord>) {
        let run = std::mem::take(run);
        if run.positions.len() >= 2 {
            words.push(run);
        }
    }

    /// A square counts as a letter only if it holds exactly one of A-Z
    fn letter_in(text: &str) -> Option<char> {
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_uppercase() => Some(ch),
            _ => None,
        }
    }
}
