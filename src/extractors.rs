use axum::body::{Body, Bytes};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::response::AppError;

/// `axum::Json<T>` that rejects with an `AppError` body instead of plain text.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection_to_app_error(rejection)),
        }
    }
}

fn json_rejection_to_app_error(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::JsonDataError(_) => "request body does not match the expected shape",
        JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
        JsonRejection::MissingJsonContentType(_) => "expected Content-Type: application/json",
        _ => "request body could not be read",
    };
    tracing::warn!(error = %rejection, "JSON body rejected");
    AppError::bad_request("INVALID_REQUEST_BODY", message)
}

/// Like `JsonBody`, but an empty body yields `T::default()`.
pub struct OptionalJsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body bytes");
            AppError::bad_request("INVALID_REQUEST_BODY", "request body could not be read")
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJsonBody(T::default()));
        }

        let mut rebuilt = Request::new(Body::from(bytes));
        *rebuilt.headers_mut() = headers;
        let JsonBody(value) = JsonBody::<T>::from_request(rebuilt, state).await?;
        Ok(OptionalJsonBody(value))
    }
}

/// `axum::extract::Query<T>` with an `AppError` rejection.
pub struct QueryParams<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection, "Query string rejected");
                Err(AppError::bad_request(
                    "INVALID_QUERY",
                    "query string is missing a parameter or has an invalid value",
                ))
            }
        }
    }
}
