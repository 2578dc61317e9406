//! HTTP handlers: translate requests to DAO/service calls and entities to
//! response payloads. Each handler owns one transaction.

pub mod admin;
pub mod department;
pub mod employee;
pub mod health;
pub mod report;
