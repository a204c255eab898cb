use thiserror::Error;

use crate::config::ConfigError;
use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum MarqueeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] marquee_model::ModelError),
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
