//! Request extractors with JSON error bodies

use std::ops::Deref;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::types::ApiError;

/// Query-string extractor whose rejection is an [`ApiError`].
///
/// Malformed parameters (e.g. `quantile=abc`) produce a 400 with the same
/// body shape as every other API error instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T> Deref for ApiQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected query string");
                ApiError::bad_request("INVALID_QUERY", rejection.body_text())
            })?;
        Ok(Self(value))
    }
}
