//! Profile + flag resolution into concrete client settings.
//!
//! Profiles come from `backlot-config`; CLI flags and environment
//! variables override profile values where provided.

use std::time::Duration;

use secrecy::SecretString;

use backlot_api::{ApiClient, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Fully resolved client settings.
pub struct Settings {
    pub api_url: String,
    pub token: SecretString,
    pub transport: TransportConfig,
}

/// Which profile name applies to this invocation.
pub fn active_profile_name(global: &GlobalOpts, cfg: &backlot_config::Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve settings from the config file, profile, and CLI overrides.
pub fn resolve_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let cfg = backlot_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // If a profile exists, use it with CLI flag overrides
    if let Some(profile) = cfg.profiles.get(&profile_name) {
        backlot_config::validate_profile(profile)?;

        let api_url = global
            .api_url
            .clone()
            .unwrap_or_else(|| profile.api_url.clone());

        let token = match global.token {
            Some(ref t) => SecretString::from(t.clone()),
            None => backlot_config::resolve_token(profile, &profile_name).map_err(|_| {
                CliError::NoToken {
                    profile: profile_name.clone(),
                }
            })?,
        };

        let tls = if global.insecure || profile.insecure.unwrap_or(false) {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = profile.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        let timeout = Duration::from_secs(profile.timeout.unwrap_or(global.timeout));

        return Ok(Settings {
            api_url,
            token,
            transport: TransportConfig { tls, timeout },
        });
    }

    // No profile found -- try to build from CLI flags / env vars alone
    let api_url = global.api_url.clone().ok_or_else(|| CliError::NoConfig {
        path: backlot_config::config_path().display().to_string(),
    })?;

    let token = global
        .token
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoToken {
            profile: profile_name,
        })?;

    let tls = if global.insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    Ok(Settings {
        api_url,
        token,
        transport: TransportConfig {
            tls,
            timeout: Duration::from_secs(global.timeout),
        },
    })
}

/// Build an authenticated API client for this invocation.
pub fn build_client(global: &GlobalOpts) -> Result<ApiClient, CliError> {
    let settings = resolve_settings(global)?;
    ApiClient::from_token(&settings.api_url, &settings.token, &settings.transport)
        .map_err(|e| CliError::from(backlot_core::CoreError::from(e)))
}
