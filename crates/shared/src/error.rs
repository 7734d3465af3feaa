use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Gateway(String),
    #[error("{0}")]
    Fault(String),
}

impl OperationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway(message.into())
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Gateway(m) | Self::Fault(m) => m,
        }
    }
}
