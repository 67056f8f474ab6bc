//! funks - Go-style duration codec, concurrent map helpers and HTTP client factory

pub mod config;
pub mod duration;
pub mod error;
pub mod http;
pub mod sync_map;

pub use config::ClientConfig;
pub use duration::Duration;
pub use error::{FixSuggestion, FunksError, ParseErrorKind, Result};
pub use http::{create_http_client, create_http_client_with_limit, HttpClient};
pub use sync_map::{map_size, set_size};
