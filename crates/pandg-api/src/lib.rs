// pandg-api: Async Rust client for the Panorama XML API

pub mod client;
pub mod device_groups;
pub mod error;
pub mod models;
pub mod transport;
pub mod xml;

pub use client::PanoramaClient;
pub use error::Error;
pub use models::{DeviceGroupEntry, TagEntry};
pub use transport::{TlsMode, TransportConfig};
