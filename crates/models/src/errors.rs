use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid database configuration: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}
