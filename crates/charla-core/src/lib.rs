pub mod config;
pub mod error;
pub mod types;

pub use config::CharlaConfig;
pub use error::{CharlaError, Result};
pub use types::*;
