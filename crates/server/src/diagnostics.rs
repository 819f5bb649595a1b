use axum::http::{HeaderMap, Method, Uri};
use tracing::debug;

use crate::extract::{FormFields, FormValue};

pub(crate) fn log_request_metadata(method: &Method, uri: &Uri, headers: &HeaderMap) {
    debug!(
        %method,
        %uri,
        scheme = uri.scheme_str().unwrap_or_default(),
        authority = uri.authority().map(|a| a.as_str()).unwrap_or_default(),
        path = uri.path(),
        query = uri.query().unwrap_or_default(),
        "incoming request"
    );
    for (name, value) in headers {
        debug!(header = %name, value = %String::from_utf8_lossy(value.as_bytes()), "request header");
    }
}

pub(crate) fn query_params(uri: &Uri) -> Vec<(String, String)> {
    uri.query()
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn log_query_params(uri: &Uri) {
    let params = query_params(uri);
    if params.is_empty() {
        debug!("no query parameters");
    }
    for (key, value) in params {
        debug!(%key, %value, "query parameter");
    }
}

pub(crate) fn log_form_fields(fields: &FormFields) {
    for (name, value) in fields {
        match value {
            FormValue::Text(text) => debug!(field = %name, value = %text, "form field"),
            FormValue::File {
                filename,
                content_type,
                bytes,
            } => debug!(
                field = %name,
                filename = filename.as_deref().unwrap_or_default(),
                content_type = content_type.as_deref().unwrap_or_default(),
                size = bytes.len(),
                "file upload field"
            ),
        }
    }
}
