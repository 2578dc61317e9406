//! Staffdir: REST CRUD service for departments and employees over PostgreSQL.
//!
//! SQL statements are rendered once from typed table descriptors (`schema`,
//! `model`), executed by per-entity DAOs on an explicit transaction
//! connection, and exposed through axum routes.

pub mod bootstrap;
pub mod dao;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod schema;
pub mod service;
pub mod settings;
pub mod state;

pub use error::AppError;
pub use routes::app;
pub use settings::Settings;
pub use state::AppState;
