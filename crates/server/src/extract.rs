//! Turns an inbound `POST` body into a [`CommandPayload`], choosing the
//! parser from the declared content type.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{header, HeaderMap},
};
use serde_json::Value;
use shared::error::CommandError;
use tracing::debug;

use crate::diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Multipart,
    UrlEncoded,
    Json,
    /// Unrecognized or missing content type; the body is not interpreted.
    Raw,
}

impl ContentKind {
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return ContentKind::Raw;
        };
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("multipart/form-data") {
            ContentKind::Multipart
        } else if content_type.contains("application/x-www-form-urlencoded") {
            ContentKind::UrlEncoded
        } else if content_type.contains("application/json") {
            ContentKind::Json
        } else {
            ContentKind::Raw
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::classify(
            headers
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File {
        filename: Option<String>,
        content_type: Option<String>,
        bytes: Bytes,
    },
}

impl FormValue {
    /// Textual view used by command validation; a file reads as its name.
    pub fn as_text(&self) -> &str {
        match self {
            FormValue::Text(value) => value,
            FormValue::File { filename, .. } => filename.as_deref().unwrap_or_default(),
        }
    }
}

pub type FormFields = HashMap<String, FormValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandPayload {
    Form(FormFields),
    Json(Value),
}

pub async fn extract_payload(
    kind: ContentKind,
    request: Request,
) -> Result<CommandPayload, CommandError> {
    match kind {
        ContentKind::Multipart => {
            let fields = read_multipart(request).await?;
            diagnostics::log_form_fields(&fields);
            Ok(CommandPayload::Form(fields))
        }
        ContentKind::UrlEncoded => {
            let body = read_body(request).await?;
            let fields = parse_urlencoded(&body);
            diagnostics::log_form_fields(&fields);
            Ok(CommandPayload::Form(fields))
        }
        ContentKind::Json => {
            let body = read_body(request).await?;
            let value: Value = serde_json::from_slice(&body)
                .map_err(|e| CommandError::internal(format!("invalid JSON body: {e}")))?;
            debug!(body = %value, "parsed JSON body");
            Ok(CommandPayload::Json(value))
        }
        ContentKind::Raw => {
            let body = read_body(request).await?;
            debug!(
                raw = %String::from_utf8_lossy(&body),
                "content type not recognized for parsing; body left unparsed"
            );
            Ok(CommandPayload::Form(FormFields::new()))
        }
    }
}

/// Later duplicates of a key replace earlier ones.
pub fn parse_urlencoded(body: &[u8]) -> FormFields {
    url::form_urlencoded::parse(body)
        .into_owned()
        .map(|(name, value)| (name, FormValue::Text(value)))
        .collect()
}

async fn read_body(request: Request) -> Result<Bytes, CommandError> {
    Bytes::from_request(request, &())
        .await
        .map_err(|e| CommandError::internal(format!("failed to read request body: {e}")))
}

async fn read_multipart(request: Request) -> Result<FormFields, CommandError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| CommandError::internal(format!("invalid multipart body: {e}")))?;

    let mut fields = FormFields::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CommandError::internal(format!("invalid multipart field: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = match field.file_name().map(str::to_owned) {
            Some(filename) => {
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await.map_err(|e| {
                    CommandError::internal(format!("failed to read upload '{name}': {e}"))
                })?;
                FormValue::File {
                    filename: Some(filename),
                    content_type,
                    bytes,
                }
            }
            None => FormValue::Text(field.text().await.map_err(|e| {
                CommandError::internal(format!("failed to read field '{name}': {e}"))
            })?),
        };
        fields.insert(name, value);
    }
    Ok(fields)
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
