//! Configuration constants and profile loading for payline
//!
//! Connection settings live in an INI file with one section per profile:
//!
//! ```ini
//! [default]
//! host = https://erp.example.com/api/index.php
//! api_key = 0123456789abcdef
//! api_key_header = DOLAPIKEY
//! insecure = false
//! timeout_secs = 30
//! @X-Client = payline
//! ```
//!
//! Keys starting with `@` are sent as extra static headers.

use anyhow::{Context, Result};
use ini::{Ini, Properties};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default profile file path for payline
pub const DEFAULT_PROFILE_PATH: &str = "~/.payline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "PAYLINE_PROFILE_PATH";

/// Environment variable holding the tracing filter (e.g. `debug`, `payline=trace`)
pub const LOG_LEVEL_ENV_VAR: &str = "PAYLINE_LOG_LEVEL";

/// Header the gateway reads the API key from unless the profile says otherwise
pub const DEFAULT_API_KEY_HEADER: &str = "DOLAPIKEY";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Connection settings needed to talk to the gateway
pub trait GatewayConnectionProfile {
    /// Base URL every endpoint path is appended to
    fn server(&self) -> Option<&str>;
    fn api_key(&self) -> Option<&str>;
    fn api_key_header(&self) -> &str;
    /// Accept invalid TLS certificates
    fn insecure(&self) -> bool;
    fn timeout(&self) -> Option<Duration>;
    /// Extra static headers sent with every request
    fn headers(&self) -> &HashMap<String, String>;
}

/// A profile read from the INI profile file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniProfile {
    server: Option<String>,
    api_key: Option<String>,
    api_key_header: Option<String>,
    insecure: bool,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl IniProfile {
    /// Profile with nothing configured, used when the requested one does not exist
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = Some(header.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    fn from_section(name: &str, section: &Properties) -> Result<Self> {
        let mut profile = Self::blank();

        for (key, value) in section.iter() {
            let value = value.trim();
            match key {
                "host" | "server" => profile.server = Some(value.to_string()),
                "api_key" => profile.api_key = Some(value.to_string()),
                "api_key_header" => profile.api_key_header = Some(value.to_string()),
                "insecure" => profile.insecure = parse_bool(value),
                "timeout_secs" => {
                    let secs: u64 = value.parse().with_context(|| {
                        format!("Invalid timeout_secs '{value}' in profile '{name}'")
                    })?;
                    profile.timeout = Some(Duration::from_secs(secs));
                }
                _ => match key.strip_prefix('@') {
                    Some(header) => {
                        profile
                            .headers
                            .insert(header.to_string(), value.to_string());
                    }
                    None => tracing::warn!("Ignoring unknown key '{}' in profile '{}'", key, name),
                },
            }
        }

        Ok(profile)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

impl GatewayConnectionProfile for IniProfile {
    fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn api_key_header(&self) -> &str {
        self.api_key_header
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_HEADER)
    }

    fn insecure(&self) -> bool {
        self.insecure
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// Reads named profiles from an INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    /// Load a profile by name. A missing file or section is not an error.
    pub fn get_profile(&self, name: &str) -> Result<Option<IniProfile>> {
        let expanded = shellexpand::tilde(&self.path).into_owned();
        if !Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' does not exist", expanded);
            return Ok(None);
        }

        let ini = Ini::load_from_file(&expanded)
            .with_context(|| format!("Failed to read profile file '{expanded}'"))?;

        match ini.section(Some(name)) {
            Some(section) => IniProfile::from_section(name, section).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.payline/profile");
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn store_should_load_named_profile() {
        let file = write_profile_file(
            "[default]\nhost = http://localhost:8080/api/index.php\napi_key = abc\n\n\
             [prod]\nhost = https://erp.example.com/api/index.php\napi_key = xyz\n\
             api_key_header = X-Api-Key\ninsecure = yes\ntimeout_secs = 15\n@X-Client = payline\n",
        );
        let store = IniProfileStore::new(file.path().to_str().unwrap());

        let profile = store.get_profile("prod").unwrap().unwrap();
        assert_eq!(
            profile.server(),
            Some("https://erp.example.com/api/index.php")
        );
        assert_eq!(profile.api_key(), Some("xyz"));
        assert_eq!(profile.api_key_header(), "X-Api-Key");
        assert!(profile.insecure());
        assert_eq!(profile.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(
            profile.headers().get("X-Client"),
            Some(&"payline".to_string())
        );
    }

    #[test]
    fn store_should_default_api_key_header() {
        let file = write_profile_file("[default]\nhost = http://localhost\n");
        let store = IniProfileStore::new(file.path().to_str().unwrap());

        let profile = store.get_profile("default").unwrap().unwrap();
        assert_eq!(profile.api_key_header(), DEFAULT_API_KEY_HEADER);
        assert!(!profile.insecure());
        assert_eq!(profile.api_key(), None);
    }

    #[test]
    fn store_should_return_none_for_unknown_profile() {
        let file = write_profile_file("[default]\nhost = http://localhost\n");
        let store = IniProfileStore::new(file.path().to_str().unwrap());

        assert!(store.get_profile("staging").unwrap().is_none());
    }

    #[test]
    fn store_should_return_none_for_missing_file() {
        let store = IniProfileStore::new("/nonexistent/payline/profile");
        assert!(store.get_profile("default").unwrap().is_none());
    }

    #[test]
    fn store_should_reject_invalid_timeout() {
        let file = write_profile_file("[default]\nhost = http://localhost\ntimeout_secs = soon\n");
        let store = IniProfileStore::new(file.path().to_str().unwrap());

        let err = store.get_profile("default").unwrap_err();
        assert!(err.to_string().contains("Invalid timeout_secs"));
    }

    #[test]
    fn builders_should_override_fields() {
        let profile = IniProfile::blank()
            .with_server("http://gateway")
            .with_api_key("secret");

        assert_eq!(profile.server(), Some("http://gateway"));
        assert_eq!(profile.api_key(), Some("secret"));
    }
}
