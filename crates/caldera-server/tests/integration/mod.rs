mod api_tests;
mod auth_tests;
pub mod common;
mod gateway_tests;
