/// Fetch run configuration
///
/// Read once from the environment at startup. Invalid overrides are logged and
/// replaced by their defaults so a run always proceeds.
use hype_holders::info::{DEFAULT_INFO_URL, InfoClientConfig};
use std::{path::PathBuf, time::Duration};
use tracing::warn;
use url::Url;

/// Address tracked when `HYPE_ADDRESS` is unset.
pub const DEFAULT_ADDRESS: &str = "0x9b83f16d0a6456f90a8a330f04c0ca1b2f0425b0";
pub const DEFAULT_TOKEN: &str = "HYPE";
pub const DEFAULT_OUTPUT_DIR: &str = "info_data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration shared by the fetch binaries
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Tracked account address
    pub address: String,
    /// Info endpoint, validated as a URL when overridden
    pub info_url: String,
    /// Tracked asset token
    pub token: String,
    /// Directory reports are written to
    pub output_dir: PathBuf,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            info_url: DEFAULT_INFO_URL.to_string(),
            token: DEFAULT_TOKEN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchConfig {
    /// Create a new configuration tracking `address`
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Set Info endpoint
    pub fn with_info_url(mut self, url: impl Into<String>) -> Self {
        self.info_url = url.into();
        self
    }

    /// Set tracked token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Set output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `HYPE_ADDRESS`, `HYPE_INFO_URL`, `HYPE_TOKEN`, `HYPE_OUTPUT_DIR` and
    /// `HYPE_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let set = |var: &'static str| lookup(var).filter(|value: &String| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(address) = set("HYPE_ADDRESS") {
            config.address = address.trim().to_string();
        }

        if let Some(raw) = set("HYPE_INFO_URL") {
            match Url::parse(raw.trim()) {
                Ok(url) => config.info_url = String::from(url),
                Err(error) => warn!(%error, value = %raw, "invalid HYPE_INFO_URL, using default"),
            }
        }

        if let Some(token) = set("HYPE_TOKEN") {
            config.token = token.trim().to_string();
        }

        if let Some(dir) = set("HYPE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = set("HYPE_HTTP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "invalid HYPE_HTTP_TIMEOUT_SECS, using default"),
            }
        }

        config
    }

    pub fn client_config(&self) -> InfoClientConfig {
        InfoClientConfig::new(self.info_url.as_str()).with_timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> =
            vars.iter().map(|(key, value)| (*key, value.to_string())).collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_from_lookup() {
        struct TestCase {
            input: Vec<(&'static str, &'static str)>,
            expected: FetchConfig,
        }

        let tests = vec![
            TestCase {
                // TC0: nothing set
                input: vec![],
                expected: FetchConfig::default(),
            },
            TestCase {
                // TC1: every override valid
                input: vec![
                    ("HYPE_ADDRESS", "0xabc"),
                    ("HYPE_INFO_URL", "http://localhost:3001/info"),
                    ("HYPE_TOKEN", "PURR"),
                    ("HYPE_OUTPUT_DIR", "/tmp/reports"),
                    ("HYPE_HTTP_TIMEOUT_SECS", "3"),
                ],
                expected: FetchConfig::new("0xabc")
                    .with_info_url("http://localhost:3001/info")
                    .with_token("PURR")
                    .with_output_dir("/tmp/reports")
                    .with_timeout(Duration::from_secs(3)),
            },
            TestCase {
                // TC2: invalid url and timeout fall back
                input: vec![
                    ("HYPE_INFO_URL", "not a url"),
                    ("HYPE_HTTP_TIMEOUT_SECS", "soon"),
                ],
                expected: FetchConfig::default(),
            },
            TestCase {
                // TC3: zero timeout and blank values ignored
                input: vec![
                    ("HYPE_HTTP_TIMEOUT_SECS", "0"),
                    ("HYPE_ADDRESS", "  "),
                    ("HYPE_TOKEN", ""),
                ],
                expected: FetchConfig::default(),
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = FetchConfig::from_lookup(lookup(&test.input));
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_client_config() {
        let config = FetchConfig::default().with_timeout(Duration::from_secs(4));
        let client = config.client_config();

        assert_eq!(client.url, DEFAULT_INFO_URL);
        assert_eq!(client.timeout, Duration::from_secs(4));
    }
}
