use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    /// A field value failed its format or range rule.
    #[error("ValidationError: {0}")]
    Validation(String),

    /// An operation precondition was violated by the caller.
    #[error("InputError: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

impl RolodexError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RolodexError>;
