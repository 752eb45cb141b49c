//! HTTP handlers for clinic operations.
//! Request/response mapping only; the flow lives in `veterinary_service`.

use crate::{
    auth::Caller,
    errors::AppError,
    models::veterinary::{Veterinary, VeterinaryId},
    services::{sqlite_store::SqliteStore, veterinary_service},
};
use axum::{
    Json,
    extract::{
        OriginalUri, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

fn parse_id(path: Result<Path<VeterinaryId>, PathRejection>) -> Result<VeterinaryId, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

fn parse_body(body: Result<Json<Veterinary>, JsonRejection>) -> Result<Veterinary, AppError> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| AppError::unprocessable(rejection.body_text()))
}

/// POST `/veterinaries` — create a clinic owned by the caller.
pub async fn create_veterinary(
    State(store): State<SqliteStore>,
    Caller(caller_id): Caller,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Result<Json<Veterinary>, JsonRejection>,
) -> Result<Response, AppError> {
    let payload = parse_body(body)?;
    let created = veterinary_service::create_veterinary(&store, caller_id, payload).await?;

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let location = format!("{}{}/{}", host, uri.path().trim_end_matches('/'), created.id);

    let mut response = (StatusCode::CREATED, Json(created)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

/// GET `/veterinaries` — list up to 100 clinics.
pub async fn list_veterinaries(
    State(store): State<SqliteStore>,
) -> Result<Json<Vec<Veterinary>>, AppError> {
    Ok(Json(veterinary_service::list_veterinaries(&store).await?))
}

/// GET `/veterinaries/{id}`
pub async fn get_veterinary(
    State(store): State<SqliteStore>,
    path: Result<Path<VeterinaryId>, PathRejection>,
) -> Result<Json<Veterinary>, AppError> {
    let id = parse_id(path)?;
    Ok(Json(veterinary_service::get_veterinary(&store, id).await?))
}

/// PUT `/veterinaries/{id}` — rename or move a clinic the caller owns.
pub async fn update_veterinary(
    State(store): State<SqliteStore>,
    path: Result<Path<VeterinaryId>, PathRejection>,
    Caller(caller_id): Caller,
    body: Result<Json<Veterinary>, JsonRejection>,
) -> Result<Json<Veterinary>, AppError> {
    let id = parse_id(path)?;
    let payload = parse_body(body)?;
    let updated = veterinary_service::update_veterinary(&store, caller_id, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE `/veterinaries/{id}` — 204 with the removed id in the `Entity` header.
pub async fn delete_veterinary(
    State(store): State<SqliteStore>,
    path: Result<Path<VeterinaryId>, PathRejection>,
    Caller(caller_id): Caller,
) -> Result<Response, AppError> {
    let id = parse_id(path)?;
    veterinary_service::delete_veterinary(&store, caller_id, id).await?;

    let mut response = StatusCode::NO_CONTENT.into_response();
    response.headers_mut().insert(
        HeaderName::from_static("entity"),
        HeaderValue::from(id),
    );
    Ok(response)
}
