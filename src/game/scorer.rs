use std::collections::HashSet;

use crate::{
    game::{extractor::CandidateWord, layout::premium_at},
    models::{Letter, Position},
};

/// Breakdown of a scored word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    /// Sum of letter values after letter premiums
    pub letter_total: u32,
    /// Product of every word premium picked up by this turn's tiles
    pub word_multiplier: u32,
    /// Final score for the word
    pub score: u32,
}

pub struct Scorer;

impl Scorer {
    /// Calculate the score for a word given the squares filled this turn.
    ///
    /// Scoring rules:
    /// - Each letter has a base value
    /// - DL / TL multiply that letter's value by 2 / 3
    /// - DW and the centre square double the word, TW triples it
    /// - Word premiums compound when a word covers more than one
    /// - Premiums only count under tiles placed this turn; squares covered
    ///   in an earlier turn score at face value
    pub fn calculate_score_with_breakdown(
        candidate: &CandidateWord,
        newly_placed: &HashSet<Position>,
    ) -> ScoreResult {
        let mut letter_total = 0;
        let mut word_multiplier = 1;

        for (pos, ch) in candidate.tiles() {
            let base_value = Letter::new(ch).map_or(0, Letter::value);

            let premium = if newly_placed.contains(&pos) {
                premium_at(pos)
            } else {
                None
            };

            letter_total += match premium {
                Some(premium) => {
                    word_multiplier *= premium.word_multiplier();
                    base_value * premium.letter_multiplier()
                }
                None => base_value,
            };
        }

        ScoreResult {
            letter_total,
            word_multiplier,
            score: letter_total * word_multiplier,
        }
    }

    pub fn calculate_score(candidate: &CandidateWord, newly_placed: &HashSet<Position>) -> u32 {
        Self::calculate_score_with_breakdown(candidate, newly_placed).score
    }
}
