pub mod remote;

use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use anyhow::Result;
use async_trait::async_trait;

pub use remote::RemoteDictionary;

/// Yes/no word check used when a turn is submitted.
///
/// Implementations answer `false` for anything they cannot confirm,
/// including lookups that fail outright.
#[async_trait]
pub trait WordOracle: Send + Sync {
    async fn is_valid_word(&self, word: &str) -> bool;
}

/// In-memory word list
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load dictionary from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let dictionary = Self::from_words(content.lines());

        tracing::info!("Loaded {} words into dictionary", dictionary.len());

        Ok(dictionary)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|line| line.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty() && word.len() >= 2)
            .collect();
        Self { words }
    }

    /// Create an empty dictionary (for testing)
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[async_trait]
impl WordOracle for Dictionary {
    async fn is_valid_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}
