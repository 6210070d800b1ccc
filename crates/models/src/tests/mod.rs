/// Persistence round trips against an in-memory database
pub mod crud_tests;
pub mod db_tests;
