use models::audit::Audited;
use models::storage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuditView;
use crate::crud::CrudResource;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageViewModel {
    #[serde(rename = "_id")]
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_central: bool,
    #[serde(flatten)]
    pub audit: AuditView,
}

pub struct StorageResource;

impl CrudResource for StorageResource {
    type Entity = storage::Entity;
    type Model = storage::Model;
    type ActiveModel = storage::ActiveModel;
    type ViewModel = StorageViewModel;

    const NAME: &'static str = "storage";

    fn id_column() -> storage::Column { storage::Column::Id }

    fn deleted_column() -> storage::Column { storage::Column::IsDeleted }

    fn keyword_columns() -> Vec<storage::Column> {
        vec![storage::Column::Code, storage::Column::Name]
    }

    fn to_view_model(m: &storage::Model) -> StorageViewModel {
        StorageViewModel {
            id: m.id,
            code: m.code.clone(),
            name: m.name.clone(),
            description: m.description.clone(),
            address: m.address.clone(),
            phone: m.phone.clone(),
            is_central: m.is_central,
            audit: m.audit().into(),
        }
    }

    fn to_model(v: &StorageViewModel) -> storage::Model {
        storage::Model {
            id: v.id,
            code: v.code.clone(),
            name: v.name.clone(),
            description: v.description.clone(),
            address: v.address.clone(),
            phone: v.phone.clone(),
            is_central: v.is_central,
            ..Default::default()
        }
    }
}
