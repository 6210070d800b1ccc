use models::audit::Audited;
use models::expedition;
use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{required_param, AuditView};
use crate::crud::{CrudResource, CrudService};
use crate::errors::ServiceError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpeditionViewModel {
    #[serde(rename = "_id")]
    pub id: i32,
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub audit: AuditView,
}

pub struct ExpeditionResource;

impl CrudResource for ExpeditionResource {
    type Entity = expedition::Entity;
    type Model = expedition::Model;
    type ActiveModel = expedition::ActiveModel;
    type ViewModel = ExpeditionViewModel;

    const NAME: &'static str = "expedition";

    fn id_column() -> expedition::Column { expedition::Column::Id }

    fn deleted_column() -> expedition::Column { expedition::Column::IsDeleted }

    fn keyword_columns() -> Vec<expedition::Column> {
        vec![expedition::Column::Code, expedition::Column::Name]
    }

    fn to_view_model(m: &expedition::Model) -> ExpeditionViewModel {
        ExpeditionViewModel { id: m.id, code: m.code.clone(), name: m.name.clone(), audit: m.audit().into() }
    }

    fn to_model(v: &ExpeditionViewModel) -> expedition::Model {
        expedition::Model { id: v.id, code: v.code.clone(), name: v.name.clone(), ..Default::default() }
    }
}

impl CrudService<ExpeditionResource> {
    /// First live expedition carrying `code`.
    #[instrument(skip(self))]
    pub async fn read_by_code(&self, code: &str) -> Result<expedition::Model, ServiceError> {
        let code = required_param("code", code)?;
        let db = self.db()?;
        Self::live()
            .filter(expedition::Column::Code.eq(code))
            .order_by_asc(expedition::Column::Id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("expedition", format!("with code {code}")))
    }
}
