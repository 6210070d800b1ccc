use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::impl_audited;
use crate::validation::{require, FieldError, Validatable};

#[derive(Clone, Debug, PartialEq, Default, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "master_store")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub pic: Option<String>,
    pub store_category: Option<String>,
    pub store_wide: Option<String>,
    pub channel: Option<String>,
    pub status: Option<String>,
    pub online_offline: Option<String>,
    pub sales_target: f64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub opening_date: Option<DateTimeUtc>,
    pub closing_date: Option<DateTimeUtc>,
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
        require(&mut errors, "name", &self.name);
        require(&mut errors, "code", &self.code);
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !email.contains('@') {
                errors.push(FieldError::new("email", "email is not a valid address"));
            }
        }
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                errors.push(FieldError::new("latitude", "latitude must be between -90 and 90"));
            }
        }
        if let Some(lng) = self.longitude {
            if !(-180.0..=180.0).contains(&lng) {
                errors.push(FieldError::new("longitude", "longitude must be between -180 and 180"));
            }
        }
        if let (Some(open), Some(close)) = (self.opening_date, self.closing_date) {
            if close < open {
                errors.push(FieldError::new("closingDate", "closingDate must not precede openingDate"));
            }
        }
        errors
    }
}
