//! Request extractors
//!
//! Wrappers around axum's extractors whose rejections surface as
//! `AppError::MalformedPayload`, plus id-list query parsing.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::{AppError, AppResult};

/// JSON body; a rejected body becomes a 400 before any handler runs.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters with the same rejection mapping.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Parse an id list from a raw query string.
///
/// The parameter may repeat (`id=1&id=2`) and each value may hold a
/// comma-separated list (`id=1,2`). A missing parameter or a non-numeric id
/// is rejected.
pub fn parse_ids(query: Option<&str>, param: &str) -> AppResult<Vec<i64>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or_default())
        .map_err(|e| AppError::MalformedPayload(format!("invalid query string: {}", e)))?;

    let mut present = false;
    let mut ids = Vec::new();

    for (_, value) in pairs.iter().filter(|(key, _)| key == param) {
        present = true;
        for raw in value.split(',').map(str::trim).filter(|raw| !raw.is_empty()) {
            let id = raw.parse::<i64>().map_err(|_| {
                AppError::MalformedPayload(format!(
                    "invalid id '{}' in query parameter '{}'",
                    raw, param
                ))
            })?;
            ids.push(id);
        }
    }

    if !present {
        return Err(AppError::MalformedPayload(format!(
            "missing query parameter '{}'",
            param
        )));
    }

    Ok(ids)
}
