pub mod config;
pub mod error;

pub use config::VoxformConfig;
pub use error::{Result, VoxformError};
