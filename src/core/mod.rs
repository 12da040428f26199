//! Core domain model and services.

pub mod domain;
pub mod errors;
pub mod logging;
pub mod services;
