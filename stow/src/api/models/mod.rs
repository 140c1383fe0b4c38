//! API request and response data models.
//!
//! These models define the public API contract; they are annotated with
//! `utoipa` for the generated OpenAPI document.

pub mod uploads;
