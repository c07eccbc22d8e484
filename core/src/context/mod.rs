mod config;
mod error;

pub use config::{APP_NAME, AppConfig, CONFIG_NAME};
pub use error::ConfigError;
