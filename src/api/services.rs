//! Service management API handlers
//!
//! Contains HTTP request handlers for service CRUD operations. Each handler
//! holds the state lock until its registry work is done.

use super::body;
use crate::error::AppError;
use crate::state::{CreateServiceRequest, ServiceRecord, SharedState, UpdateServiceRequest};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Services list response
#[derive(Debug, Serialize)]
pub struct ServicesListResponse {
    /// Number of records returned
    pub count: usize,
    /// Matching records in creation order
    pub data: Vec<ServiceRecord>,
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteServiceResponse {
    /// Human-readable message
    pub message: String,
    /// The record as it was before removal
    pub deleted: ServiceRecord,
}

/// Query parameters for listing services
#[derive(Debug, Default, Deserialize)]
pub struct ListServicesQuery {
    /// Case-insensitive search term for name or description
    pub q: Option<String>,
}

/// POST /services - Create a new service
pub async fn create_service(
    State(state): State<SharedState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Result<(StatusCode, Json<ServiceRecord>), AppError> {
    let request: CreateServiceRequest = body::json_object(&headers, &bytes)?;

    let mut state = state.write().await;
    let service = state.services.create(request)?;
    info!(service_id = service.id, name = %service.name, "Service created");

    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /services - List services, optionally filtered by `q`
pub async fn list_services(
    State(state): State<SharedState>,
    query: Result<Query<ListServicesQuery>, QueryRejection>,
) -> Json<ServicesListResponse> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!(error = %rejection, "Ignoring unreadable query string");
            ListServicesQuery::default()
        }
    };

    let state = state.read().await;
    let data: Vec<ServiceRecord> = state
        .services
        .list(query.q.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Json(ServicesListResponse {
        count: data.len(),
        data,
    })
}

/// GET /services/:id - Get a specific service
pub async fn get_service(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceRecord>, AppError> {
    let state = state.read().await;
    let service = state.services.get(&id)?;

    Ok(Json(service.clone()))
}

/// PUT /services/:id - Update a service
pub async fn update_service(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Result<Json<ServiceRecord>, AppError> {
    let mut state = state.write().await;
    // Id and lookup errors are reported before body errors
    state.services.get(&id)?;
    let request: UpdateServiceRequest = body::json_object(&headers, &bytes)?;

    let service = state.services.update(&id, request)?;
    info!(service_id = service.id, "Service updated");

    Ok(Json(service))
}

/// DELETE /services/:id - Delete a service
pub async fn delete_service(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteServiceResponse>, AppError> {
    let mut state = state.write().await;
    let deleted = state.services.remove(&id)?;
    info!(service_id = deleted.id, "Service deleted");

    Ok(Json(DeleteServiceResponse {
        message: "Deleted".to_string(),
        deleted,
    }))
}
