// backlot-api: async HTTP client for the Backlot content platform API.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ApiClient, ListQuery};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
