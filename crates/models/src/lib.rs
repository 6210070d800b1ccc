//! SeaORM entities for master data: stores, expeditions, article
//! collections and storages, with their audit columns and field rules.

pub mod errors;
pub mod db;
pub mod audit;
pub mod validation;
pub mod store;
pub mod expedition;
pub mod article_collection;
pub mod storage;

#[cfg(test)]
mod tests;
