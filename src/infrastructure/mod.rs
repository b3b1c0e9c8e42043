//! Infrastructure layer - Token signing, logging and observability

pub mod auth;
pub mod logging;
pub mod observability;
