use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    dictionary::WordOracle,
    game::{extractor::CandidateWord, scorer::Scorer},
    models::Position,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredWord {
    pub word: String,
    pub score: u32,
}

/// What happened to a submitted turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub accepted_words: Vec<ScoredWord>,
    pub rejected_words: Vec<String>,
    pub total_score: u32,
    /// True when at least one word checked out
    pub accepted: bool,
}

pub struct TurnResolver;

impl TurnResolver {
    /// Keep only the runs that include a tile placed this turn
    pub fn relevant_candidates(
        candidates: Vec<CandidateWord>,
        newly_placed: &HashSet<Position>,
    ) -> Vec<CandidateWord> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.positions.iter().any(|pos| newly_placed.contains(pos)))
            .collect()
    }

    /// Check each candidate against the oracle, one at a time and in order,
    /// and score the ones that pass.
    pub async fn resolve(
        oracle: &dyn WordOracle,
        candidates: &[CandidateWord],
        newly_placed: &HashSet<Position>,
    ) -> TurnOutcome {
        let mut outcome = TurnOutcome::default();

        for candidate in candidates {
            let lookup = candidate.word.to_lowercase();
            if oracle.is_valid_word(&lookup).await {
                let score = Scorer::calculate_score(candidate, newly_placed);
                tracing::debug!("'{}' is valid, worth {}", candidate.word, score);
                outcome.total_score += score;
                outcome.accepted_words.push(ScoredWord {
                    word: candidate.word.clone(),
                    score,
                });
            } else {
                tracing::debug!("'{}' rejected", candidate.word);
                outcome.rejected_words.push(candidate.word.clone());
            }
        }

        outcome.accepted = !outcome.accepted_words.is_empty();
        outcome
    }
}
