//! HTTP API layer: handlers, request/response models and input validation.

pub mod handlers;
pub mod models;
pub mod validation;
