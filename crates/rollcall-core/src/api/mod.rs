//! REST client for a server-backed roster.
//!
//! The server keeps the roster as a JSON array: `GET /api/athletes` returns
//! it, `POST /api/athletes` appends one athlete and `DELETE /api/athletes/all`
//! empties it.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::ApiClient;
pub use error::ApiError;
