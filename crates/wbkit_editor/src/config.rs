//! Configuration for the editor.

use std::time::Duration;

/// Configuration for edit dispatch.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Site IRI used when decoding entity ids from responses.
    pub site_iri: String,
    /// Maxlag threshold in seconds, sent with every call.
    pub maxlag: u32,
    /// Wait before the second attempt after a maxlag rejection.
    pub first_wait: Duration,
    /// Multiplier applied to the wait for each further attempt.
    pub backoff_factor: f64,
    /// Maximum number of attempts per call, including the first.
    pub max_retries: u32,
    /// Whether to mark edits as bot edits.
    pub bot: bool,
}

impl EditorConfig {
    /// Creates a configuration with default retry behavior.
    pub fn new(site_iri: impl Into<String>) -> Self {
        Self {
            site_iri: site_iri.into(),
            maxlag: 5,
            first_wait: Duration::from_secs(1),
            backoff_factor: 1.5,
            max_retries: 14,
            bot: false,
        }
    }

    /// Sets the maxlag threshold in seconds.
    pub fn with_maxlag(mut self, maxlag: u32) -> Self {
        self.maxlag = maxlag;
        self
    }

    /// Sets the wait before the second attempt.
    pub fn with_first_wait(mut self, wait: Duration) -> Self {
        self.first_wait = wait;
        self
    }

    /// Sets the backoff multiplier.
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Sets the maximum attempt count per call.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Marks edits as bot edits.
    pub fn with_bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }

    /// Returns the wait before retrying a rate-limited attempt
    /// (1-indexed): `first_wait * backoff_factor^(attempt - 1)`.
    pub fn wait_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.powi(attempt.saturating_sub(1) as i32);
        Duration::from_secs_f64(self.first_wait.as_secs_f64() * factor)
    }
}

/// Per-edit metadata and flags.
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    /// Edit summary shown in the entity history.
    pub summary: Option<String>,
    /// Change tags to apply to the edit.
    pub tags: Vec<String>,
    /// Clears the entity before applying the update; forces a full
    /// edit-entity call.
    pub clear: bool,
}

impl EditOptions {
    /// Creates empty edit options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edit summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Adds a change tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Requests a clear-and-replace edit.
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = EditorConfig::new("http://www.wikidata.org/entity/")
            .with_maxlag(3)
            .with_max_retries(5)
            .with_bot(true);
        assert_eq!(config.maxlag, 3);
        assert_eq!(config.max_retries, 5);
        assert!(config.bot);
    }

    #[test]
    fn backoff_grows_per_attempt() {
        let config = EditorConfig::new("")
            .with_first_wait(Duration::from_millis(100))
            .with_backoff_factor(2.0);
        assert_eq!(config.wait_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.wait_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.wait_for_attempt(3), Duration::from_millis(400));
    }
}
