//! Client configuration.

use std::time::Duration;

/// Total per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// URL scheme used to reach the tenant domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Https,
    /// Plain HTTP, for local mock servers only.
    Http,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// Transport settings shared by every request a client makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub scheme: Scheme,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Https,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
