pub mod auth;
pub mod controller;
pub mod errors;
pub mod extract;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod startup;
pub mod state;

pub use routes::build_router;
pub use startup::run;
pub use state::AppState;
