pub mod types;
pub mod utils;

/// Version string reported in every API response envelope.
pub const API_VERSION: &str = "1.0.0";
