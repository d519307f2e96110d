use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use engine::{
    EngineError, MutationResult, MutationStatus,
    query::{PageDescriptor, Shaped},
};
use serde::Serialize;

pub use links::RouteLinks;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod expense_groups;
mod expenses;
mod links;
mod server;
mod statuses;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    Internal(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidSort(_) | EngineError::InvalidPatch(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            format!("internal server error: {db_err}")
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err)
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

static PAGINATION_HEADER: HeaderName = HeaderName::from_static("x-pagination");

/// A page of items as a JSON array, with its descriptor in `x-pagination`.
fn paged_response<T: Serialize>(
    items: Vec<Shaped<T>>,
    descriptor: &PageDescriptor,
) -> Result<Response, ServerError> {
    let encoded =
        serde_json::to_string(descriptor).map_err(|err| ServerError::Internal(err.to_string()))?;
    let value =
        HeaderValue::from_str(&encoded).map_err(|err| ServerError::Internal(err.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(PAGINATION_HEADER.clone(), value);
    Ok((headers, Json(items)).into_response())
}

fn no_location<T>(_: &T) -> String {
    String::new()
}

/// Maps the outcome of a write to its HTTP response.
///
/// `location` builds the URL of a created entity.
fn mutation_response<T: Serialize>(
    result: MutationResult<T>,
    location: impl FnOnce(&T) -> String,
) -> Response {
    match (result.status, result.entity) {
        (MutationStatus::Created, Some(entity)) => {
            let mut headers = HeaderMap::new();
            match HeaderValue::from_str(&location(&entity)) {
                Ok(value) => {
                    headers.insert(header::LOCATION, value);
                }
                Err(err) => tracing::error!("failed to encode location header: {err}"),
            }
            (StatusCode::CREATED, headers, Json(entity)).into_response()
        }
        (MutationStatus::Updated, Some(entity)) => (StatusCode::OK, Json(entity)).into_response(),
        (MutationStatus::Deleted, _) => StatusCode::NO_CONTENT.into_response(),
        (MutationStatus::NotFound, _) => StatusCode::NOT_FOUND.into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}
