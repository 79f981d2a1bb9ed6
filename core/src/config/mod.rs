//! Configuration sources the broker reads keys from.
//!
//! Every source is loaded once into an immutable snapshot at startup; after
//! that nothing is mutated, so providers can be shared across threads
//! without locking. [`Sources`] describes which sources are enabled and
//! stacks them into a [`Layered`] provider.

pub mod env;
pub mod file;
pub mod metadata;
pub mod store;

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::db::DbPool;
use crate::keys::KeyName;

/// Read-by-key capability every configuration source implements.
pub trait ConfigProvider: Send + Sync {
    fn read_key(&self, name: &str) -> Option<String>;
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for Arc<T> {
    fn read_key(&self, name: &str) -> Option<String> {
        (**self).read_key(name)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for Box<T> {
    fn read_key(&self, name: &str) -> Option<String> {
        (**self).read_key(name)
    }
}

/// In-memory snapshot of config key → secret value.
///
/// Values are trimmed on insert and blank values are dropped, so a
/// provider never reports an empty string as a configured key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticConfig {
    entries: BTreeMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: KeyName, value: impl AsRef<str>) {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            self.entries.remove(key.config_key());
        } else {
            self.entries
                .insert(key.config_key().to_string(), trimmed.to_string());
        }
    }

    pub fn with(mut self, key: KeyName, value: impl AsRef<str>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(KeyName, String)> for StaticConfig {
    fn from_iter<I: IntoIterator<Item = (KeyName, String)>>(iter: I) -> Self {
        let mut config = StaticConfig::new();
        for (key, value) in iter {
            config.insert(key, value);
        }
        config
    }
}

impl ConfigProvider for StaticConfig {
    fn read_key(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

/// Ordered chain of providers; the first one holding a value wins.
#[derive(Default)]
pub struct Layered {
    layers: Vec<(&'static str, Box<dyn ConfigProvider>)>,
}

impl Layered {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-precedence layer.
    pub fn push(mut self, label: &'static str, provider: impl ConfigProvider + 'static) -> Self {
        self.layers.push((label, Box::new(provider)));
        self
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.layers.iter().map(|(label, _)| *label).collect()
    }
}

impl ConfigProvider for Layered {
    fn read_key(&self, name: &str) -> Option<String> {
        self.layers.iter().find_map(|(label, provider)| {
            let value = provider.read_key(name).filter(|v| !v.trim().is_empty())?;
            log::trace!("key {name} served from {label} layer");
            Some(value)
        })
    }
}

/// Startup description of which configuration sources feed the broker.
///
/// Precedence when built: environment, secrets file, credential store,
/// build metadata.
#[derive(Clone, Default)]
pub struct Sources {
    pub env: bool,
    pub secrets_file: Option<PathBuf>,
    pub store: Option<DbPool>,
    pub metadata: bool,
}

impl Sources {
    /// Everything except the credential store, which needs a pool.
    pub fn standard(secrets_file: Option<PathBuf>) -> Self {
        Self {
            env: true,
            secrets_file,
            store: None,
            metadata: true,
        }
    }

    pub fn with_store(mut self, pool: DbPool) -> Self {
        self.store = Some(pool);
        self
    }

    /// Load every enabled source and stack them.
    pub fn build(&self) -> Result<Layered> {
        let mut layered = Layered::new();
        if self.env {
            layered = layered.push("env", env::load());
        }
        if let Some(path) = &self.secrets_file {
            match std::fs::metadata(path) {
                Ok(_) => layered = layered.push("secrets_file", file::load(path)?),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    log::debug!("secrets file {} not present, skipping", path.display());
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("cannot access secrets file {}", path.display()));
                }
            }
        }
        if let Some(pool) = &self.store {
            layered = layered.push("credential_store", store::load(pool)?);
        }
        if self.metadata {
            layered = layered.push("build_metadata", metadata::load());
        }
        log::info!("key sources loaded: {}", layered.labels().join(", "));
        Ok(layered)
    }
}
