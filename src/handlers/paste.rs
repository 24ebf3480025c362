//! Upload and view handlers for pastes.

use crate::{
    error::AppError,
    models::paste::{is_valid_application, PasteRecord},
    render, store, AppState,
};
use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use hyper::HeaderMap;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Query parameters for the view route.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub raw: Option<String>,
}

impl ViewQuery {
    fn is_raw(&self) -> bool {
        self.raw
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

/// Accept a multi-file paste submission.
///
/// The throttle is checked (and its window consumed) before any payload
/// validation. The body is a JSON object with a comma-separated `files`
/// list, a `paste_application` tag, and one `file-<name>` field per
/// declared file.
///
/// # Errors
/// `RateLimited`, `MalformedRequest`, `MissingFileList`,
/// `InvalidApplication`, `MissingFileContent`, or `StorageFailure`.
pub async fn upload_paste(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    body: String,
) -> Result<Json<Value>, AppError> {
    let addr = requester_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    state
        .throttle
        .try_acquire(addr, Utc::now().timestamp_millis())?;

    let payload: Map<String, Value> =
        serde_json::from_str(&body).map_err(|_| AppError::MalformedRequest)?;

    let file_list = payload
        .get("files")
        .and_then(Value::as_str)
        .ok_or(AppError::MissingFileList)?;
    let application = payload
        .get("paste_application")
        .and_then(Value::as_str)
        .ok_or(AppError::InvalidApplication)?
        .to_ascii_lowercase();
    if !is_valid_application(&application) {
        return Err(AppError::InvalidApplication);
    }

    let mut files = HashMap::new();
    let mut file_names = Vec::new();
    for name in file_list.split(',') {
        let content = payload
            .get(&format!("file-{name}"))
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::MissingFileContent(name.to_string()))?;
        // First occurrence wins so the files/file_names invariant holds
        // even for a duplicated name in the list.
        if !files.contains_key(name) {
            files.insert(name.to_string(), content.to_string());
            file_names.push(name.to_string());
        }
    }

    let record = PasteRecord::new(application, files, file_names);
    let raw = serde_json::to_string(&record).map_err(|err| {
        tracing::error!("failed to serialize paste record: {err}");
        AppError::StorageFailure
    })?;
    if let Err(err) = state.store.create(&record.id, &raw) {
        tracing::error!(paste_id = %record.id, "failed to store paste: {err}");
        return Err(AppError::StorageFailure);
    }

    tracing::info!(
        paste_id = %record.id,
        application = %record.application_id,
        files = record.file_names.len(),
        "stored new paste"
    );
    let view_url = format!("{}/paste/view/{}", state.config.base_url, record.id);
    Ok(Json(json!({
        "paste_id": record.id,
        "created": record,
        "response": format!("the paste can be viewed at {view_url}"),
    })))
}

/// Serve a paste as a rendered HTML page, or as the raw stored JSON when
/// `?raw=true`.
///
/// Lookups go cache-first, then disk; unknown or unparsable pastes render
/// the empty sentinel page (logged server-side) rather than an error.
pub async fn view_paste(
    State(state): State<AppState>,
    Path(paste_id): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let rendered = match resolve_paste(&state, &paste_id) {
        Some((record, raw)) => render::render(&record, &raw),
        None => render::RenderedPaste::empty(),
    };

    if query.is_raw() {
        (
            [(header::CONTENT_TYPE, "application/json")],
            rendered.raw,
        )
            .into_response()
    } else {
        Html(state.template.render_page(&rendered)).into_response()
    }
}

fn resolve_paste(state: &AppState, id: &str) -> Option<(PasteRecord, String)> {
    if !store::is_valid_id(id) {
        tracing::error!(paste_id = %id, "rejecting malformed paste id");
        return None;
    }
    if let Some(hit) = state.cache.get(id) {
        tracing::debug!(paste_id = %id, "paste cache hit");
        return Some(hit);
    }
    tracing::debug!(paste_id = %id, "paste cache miss");

    let raw = match state.store.read(id) {
        Ok(raw) => raw,
        Err(AppError::NotFound) => {
            tracing::error!(paste_id = %id, "paste not found");
            return None;
        }
        Err(err) => {
            tracing::error!(paste_id = %id, "failed to read paste: {err}");
            return None;
        }
    };
    let mut record: PasteRecord = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(err) => {
            tracing::error!(paste_id = %id, "corrupt paste record: {err}");
            return None;
        }
    };
    record.id = id.to_string();
    state.cache.put(id, record.clone(), raw.clone());
    Some((record, raw))
}

/// Resolve the requester's address for throttling: the first
/// `X-Forwarded-For` entry when present (the service normally sits behind
/// a proxy), then the socket address, then the unspecified address.
fn requester_ip(headers: &HeaderMap, socket_addr: Option<SocketAddr>) -> IpAddr {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse() {
                return ip;
            }
        }
    }
    socket_addr
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_header_wins_over_socket_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let socket = Some(SocketAddr::from(([127, 0, 0, 1], 4000)));
        assert_eq!(
            requester_ip(&headers, socket),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn socket_address_used_without_forwarded_header() {
        let headers = HeaderMap::new();
        let socket = Some(SocketAddr::from(([192, 0, 2, 9], 4000)));
        assert_eq!(
            requester_ip(&headers, socket),
            "192.0.2.9".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn unparsable_forwarded_value_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));
        assert_eq!(
            requester_ip(&headers, None),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
    }
}
