//! Repository CRUD endpoints
//!
//! Every handler resolves the caller's [`Identity`] first, so a request
//! without the identity header is rejected before its body is read.

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    routing::get,
    Json, Router,
};

use super::{ApiError, ApiOperation, CollectionResponse, ListQuery};
use crate::{
    identity::Identity,
    models::{RepositoryRequest, RepositoryResponse},
    responses::{Created, NoContent},
    state::AppState,
};

/// Routes for `/repositories/`, relative to the API prefix
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/repositories/",
            get(list_repositories).post(create_repository),
        )
        .route(
            "/repositories/{uuid}",
            get(fetch_repository)
                .put(full_update_repository)
                .patch(partial_update_repository)
                .delete(delete_repository),
        )
}

fn bind_body(
    operation: ApiOperation,
    identity: &Identity,
    body: Result<Json<RepositoryRequest>, JsonRejection>,
) -> Result<RepositoryRequest, ApiError> {
    body.map(|Json(request)| request).map_err(|rejection| {
        ApiError::bad_request(operation, rejection.body_text()).with_org(&identity.org_id)
    })
}

/// `GET /repositories/`
pub async fn list_repositories(
    State(state): State<AppState>,
    identity: Identity,
    OriginalUri(uri): OriginalUri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<CollectionResponse<RepositoryResponse>, ApiError> {
    let query = ListQuery::from_pairs(pairs);
    let window = query.window();
    let filter = query.filter();

    tracing::debug!(
        org_id = %identity.org_id,
        limit = window.limit,
        offset = window.offset,
        ?filter,
        "Listing repositories"
    );

    let (records, total) = state
        .store()
        .list(&identity.org_id, window, &filter)
        .await
        .map_err(|e| ApiError::from_store(ApiOperation::List, e).with_org(&identity.org_id))?;

    Ok(CollectionResponse::new(uri.path(), window, total, records))
}

/// `GET /repositories/{uuid}`
pub async fn fetch_repository(
    State(state): State<AppState>,
    identity: Identity,
    Path(uuid): Path<String>,
) -> Result<Json<RepositoryResponse>, ApiError> {
    let record = state
        .store()
        .fetch(&identity.org_id, &uuid)
        .await
        .map_err(|e| ApiError::from_store(ApiOperation::Fetch, e).with_org(&identity.org_id))?;

    Ok(Json(record))
}

/// `POST /repositories/`
///
/// Tenant fields always come from the identity, never from the body.
pub async fn create_repository(
    State(state): State<AppState>,
    identity: Identity,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<RepositoryRequest>, JsonRejection>,
) -> Result<Created<RepositoryResponse>, ApiError> {
    let mut request = bind_body(ApiOperation::Create, &identity, body)?;
    request.set_tenant(&identity.account_number, &identity.org_id);
    request.fill_defaults();

    let record = state
        .store()
        .create(&identity.org_id, request)
        .await
        .map_err(|e| ApiError::from_store(ApiOperation::Create, e).with_org(&identity.org_id))?;

    tracing::info!(org_id = %identity.org_id, uuid = %record.uuid, "Created repository");

    let location = format!("{}{}", uri.path(), record.uuid);
    Ok(Created::new(record).with_location(location))
}

/// `PUT /repositories/{uuid}`
///
/// Absent distribution fields are reset to `any`.
pub async fn full_update_repository(
    State(state): State<AppState>,
    identity: Identity,
    Path(uuid): Path<String>,
    body: Result<Json<RepositoryRequest>, JsonRejection>,
) -> Result<Json<RepositoryResponse>, ApiError> {
    let mut request = bind_body(ApiOperation::Update, &identity, body)?;
    request.fill_defaults();

    let record = state
        .store()
        .update(&identity.org_id, &uuid, request)
        .await
        .map_err(|e| ApiError::from_store(ApiOperation::Update, e).with_org(&identity.org_id))?;

    Ok(Json(record))
}

/// `PATCH /repositories/{uuid}`
pub async fn partial_update_repository(
    State(state): State<AppState>,
    identity: Identity,
    Path(uuid): Path<String>,
    body: Result<Json<RepositoryRequest>, JsonRejection>,
) -> Result<Json<RepositoryResponse>, ApiError> {
    let request = bind_body(ApiOperation::PartialUpdate, &identity, body)?;

    let record = state
        .store()
        .update(&identity.org_id, &uuid, request)
        .await
        .map_err(|e| {
            ApiError::from_store(ApiOperation::PartialUpdate, e).with_org(&identity.org_id)
        })?;

    Ok(Json(record))
}

/// `DELETE /repositories/{uuid}`
pub async fn delete_repository(
    State(state): State<AppState>,
    identity: Identity,
    Path(uuid): Path<String>,
) -> Result<NoContent, ApiError> {
    state
        .store()
        .delete(&identity.org_id, &uuid)
        .await
        .map_err(|e| ApiError::from_store(ApiOperation::Delete, e).with_org(&identity.org_id))?;

    tracing::info!(org_id = %identity.org_id, uuid = %uuid, "Deleted repository");
    Ok(NoContent)
}
