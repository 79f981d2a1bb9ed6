use thiserror::Error;

use crate::keys::KeyName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Could not get {} key", .key.label())]
    NotFound { key: KeyName },
    #[error("Method not implemented: {method}")]
    UnknownRequest { method: String },
}

impl KeyError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "KEY_ERROR",
            Self::UnknownRequest { .. } => "NOT_IMPLEMENTED",
        }
    }
    pub fn explain(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "No value is configured for the requested key in any configuration source.",
            Self::UnknownRequest { .. } => "The channel does not support the requested method.",
        }
    }
}
