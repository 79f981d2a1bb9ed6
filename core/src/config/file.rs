//! Secrets file source.
//!
//! `.json` files hold a flat object of strings; anything else is parsed as a
//! dotenv file. Keys may use any spelling [`KeyName::from_alias`] accepts.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::StaticConfig;
use crate::keys::KeyName;

pub fn load(path: &Path) -> Result<StaticConfig> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let pairs = if is_json {
        read_json(path)?
    } else {
        read_dotenv(path)?
    };

    let mut config = StaticConfig::new();
    for (name, value) in pairs {
        match KeyName::from_alias(&name) {
            Some(key) => config.insert(key, value),
            None => log::warn!("ignoring unknown key {name} in {}", path.display()),
        }
    }
    Ok(config)
}

fn read_json(path: &Path) -> Result<Vec<(String, String)>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read secrets file {}", path.display()))?;
    let map: BTreeMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("secrets file {} is not a flat JSON object of strings", path.display()))?;
    Ok(map.into_iter().collect())
}

fn read_dotenv(path: &Path) -> Result<Vec<(String, String)>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to read secrets file {}", path.display()))?;
    let mut pairs = Vec::new();
    for item in iter {
        pairs.push(item.with_context(|| format!("malformed line in {}", path.display()))?);
    }
    Ok(pairs)
}
