//! API clients for external services
//!
//! - http: user-agent tagged GET with typed failures
//! - subtis: subt.is title search and subtitle links

pub mod http;
pub mod subtis;

pub use http::{FetchError, HttpClient};
pub use subtis::SubtisClient;
