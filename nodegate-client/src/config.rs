//! Upstream connection settings
//!
//! The node's URL and credentials are resolved once, when the gateway starts.
//! Changing the environment afterwards has no effect on a running client.

use std::fmt;

/// Where the node lives and how to authenticate to it
///
/// `Debug` never prints the password.
///
/// # Examples
///
/// ```rust
/// use nodegate_client::UpstreamConfig;
///
/// let config = UpstreamConfig::from_host_port("http://127.0.0.1", 18443, "rpcuser", "rpcpass");
/// assert_eq!(config.url(), "http://127.0.0.1:18443/");
/// assert!(!format!("{:?}", config).contains("rpcpass"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    url: String,
    username: String,
    password: String,
}

impl UpstreamConfig {
    /// Create a configuration from a complete URL
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create a configuration from a host (with scheme) and port
    ///
    /// The URL is `<host>:<port>/`, so `host` must carry its scheme, e.g.
    /// `http://127.0.0.1`.
    pub fn from_host_port(
        host: impl AsRef<str>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(format!("{}:{}/", host.as_ref(), port), username, password)
    }

    /// Full URL requests are posted to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Basic-auth username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Basic-auth password
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host_port() {
        let config = UpstreamConfig::from_host_port("http://node.internal", 8332, "alice", "secret");
        assert_eq!(config.url(), "http://node.internal:8332/");
        assert_eq!(config.username(), "alice");
        assert_eq!(config.password(), "secret");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = UpstreamConfig::new("http://localhost:8332/", "alice", "hunter2");
        let debug = format!("{:?}", config);
        assert!(debug.contains("alice"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
    }
}
