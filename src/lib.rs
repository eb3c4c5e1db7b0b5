//! Pacicli Library
//!
//! Client for the PACI cloud server REST API: XML records and their text
//! codecs, JSON/TOML settings loading, and the command layer driving them.

pub mod cli;
pub mod codec;
pub mod domain;
pub mod infrastructure;
pub mod model;
pub mod render;

pub use codec::{Address, AddressList, Timestamp};
pub use domain::config::Config;
pub use domain::error::{PaciError, PaciResult};
pub use infrastructure::http::{ApiClient, Transport};
