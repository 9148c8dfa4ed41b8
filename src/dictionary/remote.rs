use async_trait::async_trait;

use super::WordOracle;

/// Word lookups against an HTTP dictionary API.
///
/// A word is valid when `GET {base_url}/{word}` answers with a 2xx status.
/// Any other status, a timeout or a connection failure counts as invalid.
pub struct RemoteDictionary {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteDictionary {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn lookup_url(&self, word: &str) -> String {
        format!("{}/{}", self.base_url, word)
    }
}

#[async_trait]
impl WordOracle for RemoteDictionary {
    async fn is_valid_word(&self, word: &str) -> bool {
        match self.client.get(self.lookup_url(word)).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!("Dictionary lookup for '{}' returned {}", word, status);
                status.is_success()
            }
            Err(e) => {
                tracing::warn!("Dictionary lookup for '{}' failed, treating as invalid: {}", word, e);
                false
            }
        }
    }
}
