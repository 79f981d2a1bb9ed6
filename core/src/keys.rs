//! The closed set of keys the broker knows how to serve.
//!
//! Every key has a handful of spellings depending on where it is read from:
//! the method name the UI sends over the channel, the canonical config key
//! used inside the broker, the snake_case metadata name and the environment
//! variable. Keeping them together here means adding a key is a one-enum
//! change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::KeyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyName {
    #[serde(rename = "vertexAIKey")]
    VertexAi,
    #[serde(rename = "sarvamAIKey")]
    SarvamAi,
}

impl KeyName {
    pub const ALL: [KeyName; 2] = [KeyName::VertexAi, KeyName::SarvamAi];

    /// Method name used on the request/response channel.
    pub fn method(self) -> &'static str {
        match self {
            Self::VertexAi => "getVertexAIKey",
            Self::SarvamAi => "getSarvamAIKey",
        }
    }

    /// Canonical key every [`ConfigProvider`](crate::config::ConfigProvider) is queried with.
    pub fn config_key(self) -> &'static str {
        match self {
            Self::VertexAi => "vertexAIKey",
            Self::SarvamAi => "sarvamAIKey",
        }
    }

    pub fn metadata_key(self) -> &'static str {
        match self {
            Self::VertexAi => "vertex_ai_api_key",
            Self::SarvamAi => "sarvam_ai_api_key",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Self::VertexAi => "VERTEX_AI_API_KEY",
            Self::SarvamAi => "SARVAM_AI_API_KEY",
        }
    }

    /// Human readable provider name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::VertexAi => "Vertex AI",
            Self::SarvamAi => "Sarvam AI",
        }
    }

    /// Parse a channel method. Anything outside the enumeration is an
    /// [`KeyError::UnknownRequest`].
    pub fn from_method(method: &str) -> Result<Self, KeyError> {
        Self::ALL
            .into_iter()
            .find(|key| key.method() == method)
            .ok_or_else(|| KeyError::UnknownRequest {
                method: method.to_string(),
            })
    }

    /// Match any of the config key, metadata key or env var spellings.
    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| {
            key.config_key() == alias || key.metadata_key() == alias || key.env_var() == alias
        })
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}
