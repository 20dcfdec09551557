pub mod config;
pub mod logging;

pub mod assemble;
pub mod error;
pub mod fetch;
pub mod limit;
pub mod manager;
pub mod planner;
pub mod transport;
pub mod url_model;

pub use error::DownloadError;
pub use fetch::Fragment;
pub use manager::DownloadManager;
pub use transport::{ByteRange, CurlTransport, ProbeResponse, Transport, TransportError};
