//! Service layer providing business-oriented CRUD operations on top of models.
//! - One generic service ([`crud::CrudService`]) serves every resource.
//! - Validation and identity are injected collaborators.
//! - Errors are limited to validation, not-found and internal failures.

pub mod errors;
pub mod identity;
pub mod validation;
pub mod pagination;
pub mod crud;
pub mod resources;
#[cfg(test)]
pub mod test_support;

pub use crud::{CrudResource, CrudService};
