use axum::http::{HeaderMap, StatusCode};
use shared::error::CommandError;

use crate::{
    api::CommandContext,
    config::{Settings, StatusPolicy},
    extract::ContentKind,
};

/// Per-deployment switches that separate the historical handler revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResponseMode {
    pub(crate) status_policy: StatusPolicy,
    /// When false, JSON action callbacks are not interpreted and only the
    /// id-less form delete exists.
    pub(crate) json_actions: bool,
}

impl ResponseMode {
    pub(crate) fn content_kind(&self, headers: &HeaderMap) -> ContentKind {
        match ContentKind::from_headers(headers) {
            ContentKind::Json if !self.json_actions => ContentKind::Raw,
            kind => kind,
        }
    }

    pub(crate) fn status_for(&self, err: &CommandError) -> StatusCode {
        match self.status_policy {
            StatusPolicy::Permissive => StatusCode::OK,
            StatusPolicy::Strict if err.code().is_validation() => StatusCode::BAD_REQUEST,
            StatusPolicy::Strict => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) commands: CommandContext,
    pub(crate) mode: ResponseMode,
}

impl AppState {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        Self {
            commands: CommandContext {
                integration_url: settings.integration_url.clone(),
            },
            mode: ResponseMode {
                status_policy: settings.status_policy,
                json_actions: settings.json_actions,
            },
        }
    }
}
