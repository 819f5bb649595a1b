use std::{fs, io, path::Path};

use anyhow::{anyhow, Context};
use clap::ValueEnum;
use serde::Deserialize;

/// How validation and internal failures map to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Every outcome is `200`; errors are only visible in the body text.
    Permissive,
    /// Validation errors are `400`, internal errors `500`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub status_policy: StatusPolicy,
    pub json_actions: bool,
    pub integration_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8001,
            debug: false,
            status_policy: StatusPolicy::Strict,
            json_actions: true,
            integration_url: "http://localhost:8001".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    host: Option<String>,
    port: Option<u16>,
    debug: Option<bool>,
    status_policy: Option<StatusPolicy>,
    json_actions: Option<bool>,
    integration_url: Option<String>,
}

/// Defaults, then the TOML file at `path` (if present), then `SCHEDULE_*`
/// environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file.host {
        settings.host = v;
    }
    if let Some(v) = file.port {
        settings.port = v;
    }
    if let Some(v) = file.debug {
        settings.debug = v;
    }
    if let Some(v) = file.status_policy {
        settings.status_policy = v;
    }
    if let Some(v) = file.json_actions {
        settings.json_actions = v;
    }
    if let Some(v) = file.integration_url {
        settings.integration_url = v;
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("SCHEDULE_HOST") {
        settings.host = v;
    }
    if let Some(v) = lookup("SCHEDULE_PORT") {
        settings.port = v
            .trim()
            .parse()
            .with_context(|| format!("SCHEDULE_PORT must be a port number, got '{v}'"))?;
    }
    if let Some(v) = lookup("SCHEDULE_DEBUG") {
        settings.debug = parse_flag("SCHEDULE_DEBUG", &v)?;
    }
    if let Some(v) = lookup("SCHEDULE_STATUS_POLICY") {
        settings.status_policy = StatusPolicy::from_str(v.trim(), true)
            .map_err(|_| anyhow!("SCHEDULE_STATUS_POLICY must be 'permissive' or 'strict', got '{v}'"))?;
    }
    if let Some(v) = lookup("SCHEDULE_JSON_ACTIONS") {
        settings.json_actions = parse_flag("SCHEDULE_JSON_ACTIONS", &v)?;
    }
    if let Some(v) = lookup("SCHEDULE_INTEGRATION_URL") {
        settings.integration_url = v;
    }
    Ok(())
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{key} must be a boolean flag, got '{raw}'")),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
