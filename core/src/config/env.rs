//! Process environment source.

use super::StaticConfig;
use crate::keys::KeyName;

/// Snapshot the process environment for every known key.
pub fn load() -> StaticConfig {
    load_with(|name| std::env::var(name).ok())
}

/// Snapshot using a custom variable reader.
pub fn load_with<F>(read: F) -> StaticConfig
where
    F: Fn(&str) -> Option<String>,
{
    KeyName::ALL
        .into_iter()
        .filter_map(|key| read(key.env_var()).map(|value| (key, value)))
        .collect()
}
