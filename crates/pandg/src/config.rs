//! CLI configuration: a thin wrapper around `pandg_config`.
//!
//! Adds the resolution step that lets `GlobalOpts` flags (--url,
//! --api-key, --insecure, --timeout) override profile values.

use secrecy::SecretString;

use pandg_config::Overrides;
use pandg_core::{AuthCredentials, PanoramaConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use pandg_config::{Config, Profile, config_path, load_config, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `PanoramaConfig` from the config file, profile, and CLI overrides.
pub fn build_panorama_config(global: &GlobalOpts) -> Result<PanoramaConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let bare;
    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile,
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => return Err(profile_not_found(&profile_name, &cfg)),
        // No profile: build from flags / env vars alone.
        None => {
            if global.url.is_none() {
                return Err(CliError::NoConfig {
                    path: config_path().display().to_string(),
                });
            }
            bare = Profile::default();
            &bare
        }
    };

    let overrides = Overrides {
        url: global.url.clone(),
        api_key: global.api_key.clone().map(SecretString::from),
        insecure: global.insecure,
        timeout: global.timeout,
    };
    let resolved = pandg_config::profile_to_panorama_config(
        profile,
        &profile_name,
        &cfg.defaults,
        overrides,
    )?;

    tracing::debug!(
        profile = %profile_name,
        url = %resolved.url,
        api_key = matches!(resolved.auth, AuthCredentials::ApiKey(_)),
        "resolved Panorama connection"
    );
    Ok(resolved)
}

/// `ProfileNotFound` listing the profiles that do exist.
pub fn profile_not_found(name: &str, cfg: &Config) -> CliError {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    CliError::ProfileNotFound {
        name: name.into(),
        available: if names.is_empty() {
            "(none)".into()
        } else {
            names.join(", ")
        },
    }
}
