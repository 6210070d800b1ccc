//! Generic HTTP handlers shared by every master-data resource.
//!
//! Each handler builds the resource service from shared state and the
//! caller's identity, delegates, and maps the outcome onto an
//! [`ApiResponse`]. Service errors become status codes through [`ApiError`].

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use service::pagination::ListQuery;
use service::resources::expedition::{ExpeditionResource, ExpeditionViewModel};
use service::resources::storage::{StorageResource, StorageViewModel};
use service::resources::store::{NearbyStoreViewModel, StoreResource, StoreViewModel};
use service::CrudResource;
use tracing::debug;

use crate::auth::CallerIdentity;
use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

pub async fn get<R: CrudResource>(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Vec<R::ViewModel>> {
    let svc = state.service::<R>(identity);
    let page = svc.read_model(&query).await?;
    debug!(resource = R::NAME, total = page.total, "list");
    Ok(ApiResponse::page(page.map(|m| svc.map_to_view_model(&m))))
}

pub async fn get_by_id<R: CrudResource>(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<R::ViewModel> {
    let svc = state.service::<R>(identity);
    let model = svc.read_model_by_id(id).await?;
    Ok(ApiResponse::ok(svc.map_to_view_model(&model)))
}

/// Responds 201 with the generated id as `data`.
pub async fn post<R: CrudResource>(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiJson(view_model): ApiJson<R::ViewModel>,
) -> ApiResult<i32> {
    let svc = state.service::<R>(identity);
    let id = svc.create_model(svc.map_to_model(&view_model)).await?;
    Ok(ApiResponse::created(id))
}

pub async fn put<R: CrudResource>(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiPath(id): ApiPath<i32>,
    ApiJson(view_model): ApiJson<R::ViewModel>,
) -> ApiResult<()> {
    let svc = state.service::<R>(identity);
    svc.update_model(id, svc.map_to_model(&view_model)).await?;
    Ok(ApiResponse::new(StatusCode::OK, "Updated"))
}

pub async fn delete<R: CrudResource>(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    let svc = state.service::<R>(identity);
    svc.delete_model(id).await?;
    Ok(ApiResponse::new(StatusCode::OK, "Deleted"))
}

#[derive(Debug, Default, Deserialize)]
pub struct CodeQuery {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: String,
}

pub async fn store_by_code(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiQuery(q): ApiQuery<CodeQuery>,
) -> ApiResult<StoreViewModel> {
    let svc = state.service::<StoreResource>(identity);
    let store = svc.read_by_code(&q.code).await?;
    Ok(ApiResponse::ok(svc.map_to_view_model(&store)))
}

pub async fn stores_by_category(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiQuery(q): ApiQuery<CategoryQuery>,
) -> ApiResult<Vec<StoreViewModel>> {
    let svc = state.service::<StoreResource>(identity);
    let stores = svc.read_by_category(&q.category).await?;
    Ok(ApiResponse::ok(stores.iter().map(|s| svc.map_to_view_model(s)).collect()))
}

/// Other stores nearest first, each with its distance in kilometres.
pub async fn nearest_stores(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiQuery(q): ApiQuery<CodeQuery>,
) -> ApiResult<Vec<NearbyStoreViewModel>> {
    let svc = state.service::<StoreResource>(identity);
    let nearby = svc.read_nearest_by_code(&q.code).await?;
    let data = nearby
        .iter()
        .map(|(s, distance_km)| NearbyStoreViewModel { store: svc.map_to_view_model(s), distance_km: *distance_km })
        .collect();
    Ok(ApiResponse::ok(data))
}

pub async fn storage_by_store_code(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiQuery(q): ApiQuery<CodeQuery>,
) -> ApiResult<StorageViewModel> {
    let storage = state.service::<StoreResource>(identity).read_storage_by_store_code(&q.code).await?;
    Ok(ApiResponse::ok(StorageResource::to_view_model(&storage)))
}

pub async fn expedition_by_code(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    ApiQuery(q): ApiQuery<CodeQuery>,
) -> ApiResult<ExpeditionViewModel> {
    let svc = state.service::<ExpeditionResource>(identity);
    let expedition = svc.read_by_code(&q.code).await?;
    Ok(ApiResponse::ok(svc.map_to_view_model(&expedition)))
}
