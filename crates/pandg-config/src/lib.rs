//! Shared configuration for pandg.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `pandg_core::PanoramaConfig`. The CLI adds
//! `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pandg_core::{AuthCredentials, PanoramaConfig, TlsVerification};

/// Service name under which secrets are stored in the system keyring.
pub const KEYRING_SERVICE: &str = "pandg";

/// Environment variable consulted for the admin password.
pub const PASSWORD_ENV: &str = "PANDG_PASSWORD";

/// Environment variable consulted for the admin username.
pub const USERNAME_ENV: &str = "PANDG_USERNAME";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named Panorama profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named Panorama profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Management interface URL (e.g., "https://panorama.example.com").
    pub url: String,

    /// API key (plaintext — prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Admin username, used to generate a key when none is configured.
    pub username: Option<String>,

    /// Admin password (plaintext — prefer keyring).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "pandg", "pandg").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("pandg");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file, layered under `PANDG_` env vars.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PANDG_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

fn keyring_entry(profile_name: &str, secret: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/{secret}"),
    )?)
}

/// Store a profile's API key in the system keyring.
pub fn store_api_key(profile_name: &str, key: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name, "api-key")?.set_password(key)?;
    Ok(())
}

fn keyring_secret(profile_name: &str, secret: &str) -> Option<SecretString> {
    keyring_entry(profile_name, secret)
        .ok()?
        .get_password()
        .ok()
        .map(SecretString::from)
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve an API key from the credential chain, if one is configured.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(val) = profile
        .api_key_env
        .as_ref()
        .and_then(|env_name| std::env::var(env_name).ok())
    {
        return Some(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = keyring_secret(profile_name, "api-key") {
        return Some(secret);
    }

    // 3. Plaintext in config
    profile.api_key.clone().map(SecretString::from)
}

/// Resolve admin credentials (username + password) for key generation.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok((username, SecretString::from(pw)));
    }

    // 2. Keyring
    if let Some(pw) = keyring_secret(profile_name, "password") {
        return Ok((username, pw));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve `AuthCredentials`: an API key if any is configured, otherwise
/// admin credentials for key generation.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    if let Some(key) = resolve_api_key(profile, profile_name) {
        return Ok(AuthCredentials::ApiKey(key));
    }
    let (username, password) = resolve_credentials(profile, profile_name)?;
    Ok(AuthCredentials::Credentials { username, password })
}

/// Parse and validate a management URL.
fn parse_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Values supplied on the command line that take priority over a profile.
#[derive(Debug, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub api_key: Option<SecretString>,
    pub insecure: bool,
    pub timeout: Option<u64>,
}

/// Build a `PanoramaConfig` from a profile, applying `overrides` first.
pub fn profile_to_panorama_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    overrides: Overrides,
) -> Result<PanoramaConfig, ConfigError> {
    // 1. URL (flag > profile)
    let url = parse_url(overrides.url.as_deref().unwrap_or(&profile.url))?;

    // 2. Credentials (flag > chain)
    let auth = match overrides.api_key {
        Some(key) => AuthCredentials::ApiKey(key),
        None => resolve_auth(profile, profile_name)?,
    };

    // 3. TLS verification
    let tls = if overrides.insecure || profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 4. Timeout (flag > profile > defaults)
    let timeout = Duration::from_secs(
        overrides
            .timeout
            .or(profile.timeout)
            .unwrap_or(defaults.timeout),
    );

    Ok(PanoramaConfig {
        url,
        auth,
        tls,
        timeout,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn profile(url: &str) -> Profile {
        Profile {
            url: url.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn loads_profiles_from_toml() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
output = "json"
timeout = 10

[profiles.lab]
url = "https://panorama.lab.example"
api_key = "plain"
insecure = true
"#,
        )
        .expect("write config");

        let cfg = load_config_from(&path).expect("valid config");
        assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.defaults.color, "auto");
        let lab = cfg.profiles.get("lab").expect("lab profile");
        assert_eq!(lab.url, "https://panorama.lab.example");
        assert_eq!(lab.insecure, Some(true));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = load_config_from(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("prod".into(), profile("https://pano.example"));
        save_config_to(&cfg, &path).expect("saved");

        let loaded = load_config_from(&path).expect("loaded");
        assert_eq!(
            loaded.profiles.get("prod").map(|p| p.url.as_str()),
            Some("https://pano.example")
        );
    }

    #[test]
    fn plaintext_api_key_is_used_when_nothing_else_is_set() {
        let mut p = profile("https://pano.example");
        p.api_key = Some("plain-key".into());
        let profile_name = "pandg-config-test-no-keyring-entry";

        let cfg = profile_to_panorama_config(
            &p,
            profile_name,
            &Defaults::default(),
            Overrides::default(),
        )
        .expect("resolvable profile");
        match cfg.auth {
            AuthCredentials::ApiKey(key) => assert_eq!(key.expose_secret(), "plain-key"),
            AuthCredentials::Credentials { .. } => panic!("expected API key"),
        }
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn credentials_fall_back_to_username_and_password() {
        let mut p = profile("https://pano.example");
        p.username = Some("admin".into());
        p.password = Some("pw".into());
        p.insecure = Some(true);
        p.timeout = Some(7);

        let cfg = profile_to_panorama_config(
            &p,
            "pandg-config-test-no-keyring-entry",
            &Defaults::default(),
            Overrides::default(),
        )
        .expect("resolvable profile");
        match cfg.auth {
            AuthCredentials::Credentials { username, .. } => assert_eq!(username, "admin"),
            AuthCredentials::ApiKey(_) => panic!("expected credentials"),
        }
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(7));
    }

    #[test]
    fn overrides_take_priority_over_the_profile() {
        let mut p = profile("https://pano.example");
        p.timeout = Some(7);
        let overrides = Overrides {
            url: Some("https://other.example".into()),
            api_key: Some(SecretString::from("flag-key")),
            insecure: true,
            timeout: Some(90),
        };

        let cfg = profile_to_panorama_config(&p, "lab", &Defaults::default(), overrides)
            .expect("resolvable profile");
        assert_eq!(cfg.url.as_str(), "https://other.example/");
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(90));
        assert!(matches!(cfg.auth, AuthCredentials::ApiKey(_)));
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = parse_url("ftp://pano.example").expect_err("wrong scheme");
        assert!(matches!(err, ConfigError::Validation { .. }), "got {err:?}");
        assert!(parse_url("not a url").is_err());
    }
}
