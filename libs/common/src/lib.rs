//! Common library for the classified-ads backend
//!
//! This crate provides shared functionality used by the API service,
//! including database connectivity and error handling.

pub mod database;
pub mod error;
