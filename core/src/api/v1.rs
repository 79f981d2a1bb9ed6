//! Version 1 of the key channel.
//!
//! The UI sends `{ "method": "getVertexAIKey" }` and gets back one of three
//! tagged responses. Unsupported methods get `not_implemented`, which is
//! deliberately distinct from a lookup `error`.

use serde::{Deserialize, Serialize};

use crate::broker::{KeyBroker, KeyStatus};
use crate::credentials::{delete_credential, put_credential};
use crate::db::DbPool;
use crate::errors::KeyError;
use crate::keys::KeyName;

pub const CHANNEL: &str = "api_keys_channel";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChannelRequest {
    pub method: String,
}

impl ChannelRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelResponse {
    Success {
        value: String,
    },
    Error {
        code: String,
        message: String,
        details: Option<String>,
    },
    NotImplemented {
        method: String,
    },
}

/// Answer a single channel request.
pub fn handle(broker: &KeyBroker, request: &ChannelRequest) -> ChannelResponse {
    match broker.resolve_method(&request.method) {
        Ok(value) => ChannelResponse::Success { value },
        Err(KeyError::UnknownRequest { method }) => ChannelResponse::NotImplemented { method },
        Err(err) => ChannelResponse::Error {
            code: err.code().to_string(),
            message: err.to_string(),
            details: Some(err.explain().to_string()),
        },
    }
}

pub fn key_status(broker: &KeyBroker) -> Vec<KeyStatus> {
    broker.status()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreKeyInput {
    pub key: KeyName,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreKeyOutput {
    pub key: KeyName,
    pub stored: bool,
}

/// Write a key to the credential store, or clear it when the secret is
/// absent or blank.
///
/// The running broker keeps the snapshot it was built with; the new value is
/// served once the broker is rebuilt (next launch).
pub fn store_key(db: &DbPool, input: StoreKeyInput) -> anyhow::Result<StoreKeyOutput> {
    let conn = db.get()?;
    let secret = input.secret.unwrap_or_default();
    let stored = !secret.trim().is_empty();
    if stored {
        put_credential(&conn, input.key, &secret)?;
    } else {
        delete_credential(&conn, input.key)?;
    }
    Ok(StoreKeyOutput {
        key: input.key,
        stored,
    })
}

/// Shared state injected into each Tauri command handler.
#[cfg(feature = "tauri")]
#[derive(Clone)]
pub struct ApiState {
    pub broker: KeyBroker,
    pub db: DbPool,
}

#[cfg(feature = "tauri")]
#[tauri::command]
pub fn api_keys_channel(
    state: tauri::State<'_, ApiState>,
    request: ChannelRequest,
) -> ChannelResponse {
    handle(&state.broker, &request)
}

#[cfg(feature = "tauri")]
#[tauri::command]
pub fn api_keys_status(state: tauri::State<'_, ApiState>) -> Vec<KeyStatus> {
    key_status(&state.broker)
}

/// Provision a key from a setup screen; takes effect on the next launch.
#[cfg(feature = "tauri")]
#[tauri::command]
pub fn api_keys_store(
    state: tauri::State<'_, ApiState>,
    input: StoreKeyInput,
) -> Result<StoreKeyOutput, String> {
    store_key(&state.db, input).map_err(|e| e.to_string())
}
