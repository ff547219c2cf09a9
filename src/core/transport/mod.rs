//! Transport layer for the server.
//!
//! The service is reached over HTTP only. The transport owns the listener,
//! the router and the rendering of tool results into responses; all
//! domain work is delegated to [`AdoServer`](crate::core::AdoServer).

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, build_router};
