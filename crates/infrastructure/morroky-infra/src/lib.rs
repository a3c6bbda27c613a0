pub mod baas;
pub mod error;
pub mod net;

// Re-exports for convenience
pub use baas::{BaasClient, Session};
pub use error::BaasError;
pub use net::default_http_client;
