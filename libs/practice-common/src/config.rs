// Client configuration
// Environment first, command line flags override in the CLI

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: None,
            password: None,
        }
    }

    /// Read `PRACTICE_BASE_URL`, `PRACTICE_USER` and `PRACTICE_PASSWORD`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty("PRACTICE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            username: non_empty("PRACTICE_USER"),
            password: non_empty("PRACTICE_PASSWORD"),
        }
    }

    /// Basic-auth pair, only when a user name is configured
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
