//! HTTP inbound adapter exposing REST endpoints.

pub mod demo_requests;
pub mod error;
pub mod frontend;
pub mod health;
pub mod state;

pub use error::ApiResult;
