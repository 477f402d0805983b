//! HTTP plumbing around `blackjack_lib`: a per-match state store and the routes that drive a series.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

pub mod prelude {
    pub use super::config::{PlayConfig, ServerConfig};
    pub use super::error::UserError;
    pub use super::routes::configure;
    pub use super::store::{MatchId, MatchStore};
    pub use blackjack_lib::prelude::*;
}
