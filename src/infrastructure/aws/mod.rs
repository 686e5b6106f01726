//! AWS JSON protocol client: endpoints, credentials, SigV4 and the transport.

pub mod client;
pub mod credentials;
pub mod endpoint;
pub mod signing;

pub use client::{AwsJsonTransport, ConnectionOptions};
pub use credentials::Credentials;
