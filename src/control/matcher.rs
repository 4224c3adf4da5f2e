//! Application-name matching

use crate::audio::StreamRecord;
use crate::constants::DISCORD_PATTERNS;

/// Case-insensitive substring match against a fixed set of application names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMatcher {
    patterns: Vec<String>,
}

impl StreamMatcher {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `app_name` contains any pattern
    pub fn matches_name(&self, app_name: &str) -> bool {
        let name = app_name.to_lowercase();
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }

    /// Streams without an application name never match
    pub fn matches(&self, stream: &StreamRecord) -> bool {
        stream
            .app_name
            .as_deref()
            .is_some_and(|name| self.matches_name(name))
    }
}

impl Default for StreamMatcher {
    fn default() -> Self {
        Self::new(DISCORD_PATTERNS)
    }
}
