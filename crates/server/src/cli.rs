use std::path::PathBuf;

use clap::Parser;

use crate::config::{Settings, StatusPolicy};

/// Webhook for the `/schedule` slash command.
#[derive(Parser, Debug)]
#[command(name = "schedule-server", version)]
pub(crate) struct Cli {
    /// Optional TOML settings file; ignored when missing.
    #[arg(long, default_value = "schedule.toml")]
    pub(crate) config: PathBuf,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Log every request header and form field.
    #[arg(long)]
    debug: bool,
    #[arg(long, value_enum)]
    status_policy: Option<StatusPolicy>,
    /// Ignore JSON bodies and answer only form-encoded slash commands.
    #[arg(long)]
    legacy_form_only: bool,
    /// Callback URL embedded in attachment delete buttons.
    #[arg(long)]
    integration_url: Option<String>,
}

impl Cli {
    /// Flags take precedence over file and environment settings.
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if self.debug {
            settings.debug = true;
        }
        if let Some(policy) = self.status_policy {
            settings.status_policy = policy;
        }
        if self.legacy_form_only {
            settings.json_actions = false;
        }
        if let Some(url) = &self.integration_url {
            settings.integration_url = url.clone();
        }
    }
}
