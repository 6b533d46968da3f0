pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod pkce;
pub mod platform;
pub mod session;
pub mod snapshot;

pub use error::ConnectError;
