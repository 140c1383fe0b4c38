//! HTTP request handlers.
//!
//! Handlers return [`crate::errors::Error`] which converts into the
//! appropriate HTTP status code and JSON error body.

pub mod uploads;
