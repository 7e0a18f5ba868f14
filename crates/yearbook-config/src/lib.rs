//! # Yearbook Config
//!
//! Configuration types for the Yearbook API, loaded from environment
//! variables with a default for each one:
//!
//! - [`server`]: bind address
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`store`]: dataset loaded into the record store at startup
//!
//! # Example
//!
//! ```ignore
//! use yearbook_config::{CorsConfig, ServerConfig, StoreConfig};
//!
//! let server = ServerConfig::from_env();
//! let listener = tokio::net::TcpListener::bind(server.address()).await?;
//! ```

pub mod cors;
pub mod server;
pub mod store;

pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;
