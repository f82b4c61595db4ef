//! # Shoe HTTP Routes
//!
//! | Method | Path   | Handler |
//! |--------|--------|---------|
//! | GET    | `/`    | list    |
//! | GET    | `/:id` | get     |
//! | POST   | `/`    | create  |
//! | PATCH  | `/:id` | update  |
//! | DELETE | `/:id` | delete  |
//!
//! Paths are relative to wherever the router is nested.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;

use crate::shoe::{Shoe, ShoeInput};

use super::errors::{ApiError, ApiResult};
use super::handler::ShoeHandler;

/// JSON request body.
///
/// A body that is empty, or not declared as JSON, reads as `T::default()`
/// and is left to validation. Only a declared JSON body that fails to parse
/// is `MalformedBody`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = is_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;

        if !declared_json || bytes.is_empty() {
            return Ok(JsonBody(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(value))
    }
}

/// `application/json` or any `+json` media type
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Path parameter whose rejections surface as `InvalidIdentifier`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// Create shoe routes
pub fn shoe_routes(handler: ShoeHandler) -> Router {
    Router::new()
        .route(
            "/",
            get(list_shoes)
                .post(create_shoe)
                .fallback(endpoint_not_found),
        )
        .route(
            "/:id",
            get(get_shoe)
                .patch(update_shoe)
                .delete(delete_shoe)
                .fallback(endpoint_not_found),
        )
        .with_state(handler)
}

async fn list_shoes(State(handler): State<ShoeHandler>) -> ApiResult<Json<Vec<Shoe>>> {
    Ok(Json(handler.list().await?))
}

async fn get_shoe(
    State(handler): State<ShoeHandler>,
    IdPath(id): IdPath<String>,
) -> ApiResult<Json<Shoe>> {
    Ok(Json(handler.get(&id).await?))
}

async fn create_shoe(
    State(handler): State<ShoeHandler>,
    JsonBody(input): JsonBody<ShoeInput>,
) -> ApiResult<(StatusCode, Json<Shoe>)> {
    let shoe = handler.create(input).await?;
    Ok((StatusCode::CREATED, Json(shoe)))
}

async fn update_shoe(
    State(handler): State<ShoeHandler>,
    IdPath(id): IdPath<String>,
    JsonBody(input): JsonBody<ShoeInput>,
) -> ApiResult<Json<Shoe>> {
    Ok(Json(handler.update(&id, input).await?))
}

async fn delete_shoe(
    State(handler): State<ShoeHandler>,
    IdPath(id): IdPath<String>,
) -> ApiResult<StatusCode> {
    handler.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unmatched paths and for unrouted methods on known paths
pub async fn endpoint_not_found() -> ApiError {
    ApiError::EndpointNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<ShoeInput, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        JsonBody::<ShoeInput>::from_request(req, &()).await.map(|JsonBody(input)| input)
    }

    #[test]
    fn test_json_media_types() {
        assert!(is_json(&headers("application/json")));
        assert!(is_json(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json(&headers("application/merge-patch+json")));
        assert!(!is_json(&headers("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn test_absent_body_reads_as_empty_input() {
        let input = extract(Some("application/json"), "").await.unwrap();
        assert!(input.style_name.is_none());

        let input = extract(None, r#"{"styleName":"Ignored"}"#).await.unwrap();
        assert!(input.style_name.is_none());
    }

    #[tokio::test]
    async fn test_declared_json_must_parse() {
        let err = extract(Some("application/json"), "{ not json").await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));

        let err = extract(Some("application/json"), r#"{"year":"soon"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }
}
