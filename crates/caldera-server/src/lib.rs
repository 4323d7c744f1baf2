//! REST gateway: routes, optional bearer auth, DTOs, and OpenAPI documentation.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod state;
