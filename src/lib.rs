pub mod accounting;
pub mod config;
pub mod error;
pub mod network;
pub mod snapshot;

pub use config::Settings;
pub use error::{NetacctError, Result};
