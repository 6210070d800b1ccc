use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::impl_audited;
use crate::validation::{require, FieldError, Validatable};

#[derive(Clone, Debug, PartialEq, Eq, Default, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "master_storage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_central: bool,
    pub created_by: String,
    pub created_utc: DateTimeUtc,
    pub created_agent: String,
    pub last_modified_by: String,
    pub last_modified_utc: DateTimeUtc,
    pub last_modified_agent: String,
    pub timezone_offset: i32,
    pub is_deleted: bool,
    pub deleted_by: Option<String>,
    pub deleted_utc: Option<DateTimeUtc>,
    pub deleted_agent: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl_audited!(Model);

impl Validatable for Model {
    fn validation_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "code", &self.code);
        require(&mut errors, "name", &self.name);
        errors
    }
}
