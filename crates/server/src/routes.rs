use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use common::{types::Health, API_VERSION};
use service::resources::{
    article_collection::ArticleCollectionResource, expedition::ExpeditionResource, storage::StorageResource,
    store::StoreResource,
};
use service::CrudResource;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use utoipa::OpenApi;

use crate::controller;
use crate::openapi::ApiDoc;
use crate::response::ApiResponse;
use crate::state::AppState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", version: API_VERSION })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// List/create on `/`, read/update/delete on `/:id`.
pub fn crud_routes<R: CrudResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::get::<R>).post(controller::post::<R>))
        .route(
            "/:id",
            get(controller::get_by_id::<R>).put(controller::put::<R>).delete(controller::delete::<R>),
        )
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(%detail, "handler panicked");
    ApiResponse::<()>::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Build the full application router: health, docs and the versioned
/// master-data resources.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let stores = crud_routes::<StoreResource>()
        .route("/code", get(controller::store_by_code))
        .route("/store-category", get(controller::stores_by_category))
        .route("/storage", get(controller::storage_by_store_code))
        .route("/nearest", get(controller::nearest_stores));
    let expeditions = crud_routes::<ExpeditionResource>().route("/code", get(controller::expedition_by_code));

    let v1 = Router::new()
        .nest("/master/stores", stores)
        .nest("/master/expeditions", expeditions)
        .nest("/master/storages", crud_routes::<StorageResource>())
        .nest("/articles/collections", crud_routes::<ArticleCollectionResource>());

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/v1", v1)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
