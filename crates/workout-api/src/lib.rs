//! Domain types and API access for the workout tracker.
//!
//! - [`models`] -- plans, sessions, line items, catalog exercises, auth payloads.
//! - [`WorkoutApi`] -- the resource interface, with [`HttpApi`] (REST) and
//!   [`MemoryApi`] (in-memory) implementations.
//! - [`SessionContext`] -- the explicit bearer-token/user context.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod models;
pub mod session;

pub use client::WorkoutApi;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorBody};
pub use http::HttpApi;
pub use mock::MemoryApi;
pub use session::{CredentialError, CredentialStore, Credentials, MemoryCredentialStore, SessionContext};
