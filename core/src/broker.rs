//! The key broker answering secret lookups for the UI.

use std::sync::Arc;

use serde::Serialize;

use crate::config::ConfigProvider;
use crate::errors::KeyError;
use crate::keys::KeyName;
use crate::logging::fingerprint;

/// Whether a key currently has a value, without exposing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
    pub key: KeyName,
    pub method: &'static str,
    pub configured: bool,
}

/// Stateless lookup over an immutable configuration provider.
///
/// Cloning is cheap and every clone shares the same provider, so the broker
/// can be handed to as many callers or threads as needed.
#[derive(Clone)]
pub struct KeyBroker {
    provider: Arc<dyn ConfigProvider>,
}

impl KeyBroker {
    pub fn new(provider: impl ConfigProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    pub fn get_key(&self, name: KeyName) -> Result<String, KeyError> {
        match self
            .provider
            .read_key(name.config_key())
            .filter(|value| !value.trim().is_empty())
        {
            Some(value) => {
                log::debug!(
                    "served {} (fingerprint {})",
                    name.config_key(),
                    fingerprint(&value)
                );
                Ok(value)
            }
            None => {
                log::warn!("no value configured for {}", name.config_key());
                Err(KeyError::NotFound { key: name })
            }
        }
    }

    /// Parse a channel method and look up the key it names.
    pub fn resolve_method(&self, method: &str) -> Result<String, KeyError> {
        let name = KeyName::from_method(method)
            .inspect_err(|_| log::warn!("rejected channel method {method:?}"))?;
        self.get_key(name)
    }

    pub fn status(&self) -> Vec<KeyStatus> {
        KeyName::ALL
            .into_iter()
            .map(|key| KeyStatus {
                key,
                method: key.method(),
                configured: self
                    .provider
                    .read_key(key.config_key())
                    .is_some_and(|v| !v.trim().is_empty()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;

    fn broker() -> KeyBroker {
        KeyBroker::new(StaticConfig::new().with(KeyName::VertexAi, "abc123"))
    }

    #[test]
    fn configured_key_is_returned() {
        assert_eq!(broker().get_key(KeyName::VertexAi).unwrap(), "abc123");
    }

    #[test]
    fn missing_key_is_not_found() {
        let err = broker().get_key(KeyName::SarvamAi).unwrap_err();
        assert_eq!(err, KeyError::NotFound { key: KeyName::SarvamAi });
    }

    #[test]
    fn unknown_method_is_never_not_found() {
        let empty = KeyBroker::new(StaticConfig::new());
        for method in ["getUnknownKey", "", "vertexAIKey", "GETVERTEXAIKEY"] {
            let err = empty.resolve_method(method).unwrap_err();
            assert!(matches!(err, KeyError::UnknownRequest { .. }), "{method}: {err:?}");
        }
    }

    #[test]
    fn repeated_lookups_do_not_drift() {
        let broker = broker();
        let first = broker.get_key(KeyName::VertexAi).unwrap();
        for _ in 0..10 {
            assert_eq!(broker.get_key(KeyName::VertexAi).unwrap(), first);
        }
    }

    #[test]
    fn status_reports_configuration_without_values() {
        let status = broker().status();
        assert_eq!(
            status,
            vec![
                KeyStatus { key: KeyName::VertexAi, method: "getVertexAIKey", configured: true },
                KeyStatus { key: KeyName::SarvamAi, method: "getSarvamAIKey", configured: false },
            ]
        );
    }

    #[test]
    fn concurrent_lookups_agree() {
        let broker = KeyBroker::new(
            StaticConfig::new()
                .with(KeyName::VertexAi, "v")
                .with(KeyName::SarvamAi, "s"),
        );
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let broker = broker.clone();
                std::thread::spawn(move || {
                    let key = KeyName::ALL[i % 2];
                    (key, broker.get_key(key).unwrap())
                })
            })
            .collect();
        for handle in handles {
            let (key, value) = handle.join().unwrap();
            let expected = if key == KeyName::VertexAi { "v" } else { "s" };
            assert_eq!(value, expected);
        }
    }
}
