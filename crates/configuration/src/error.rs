use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error loading .env file")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Failed to read configuration from the environment")]
    LoadError(#[from] config::ConfigError),

    #[error("Required environment variable {0} is missing or empty")]
    MissingVariable(&'static str),
}
