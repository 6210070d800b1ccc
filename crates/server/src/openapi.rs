use service::resources::{
    article_collection::ArticleCollectionViewModel, expedition::ExpeditionViewModel, storage::StorageViewModel,
    store::{NearbyStoreViewModel, StoreViewModel},
    AuditView,
};
use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::response::{FieldErrorDoc, PageInfo};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Shape of the response envelope; `data` depends on the endpoint.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseDoc {
    pub api_version: String,
    pub status_code: u16,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    pub info: Option<PageInfo>,
    pub errors: Option<Vec<FieldErrorDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::health),
    components(schemas(
        HealthResponse,
        ApiResponseDoc,
        PageInfo,
        FieldErrorDoc,
        AuditView,
        StoreViewModel,
        NearbyStoreViewModel,
        ExpeditionViewModel,
        ArticleCollectionViewModel,
        StorageViewModel,
    )),
    tags((name = "health"), (name = "master-data"))
)]
pub struct ApiDoc;
