//! Provisioning helpers for the SQLite credential store.
//!
//! Secrets are stored base64 encoded, one row per key. These functions run
//! before the broker snapshot is taken (setup screens, first launch); a
//! broker that is already built never observes later writes.

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as B64_ENGINE;
use base64::Engine;
use rusqlite::params;
use serde_json::json;
use time::OffsetDateTime;

use crate::config::StaticConfig;
use crate::keys::KeyName;
use crate::logging::{fingerprint, log_event};

const MODULE: &str = "keys.store";

/// Store `secret` for `key`. A blank secret removes the row instead.
pub fn put_credential(conn: &rusqlite::Connection, key: KeyName, secret: &str) -> Result<()> {
    let trimmed = secret.trim();
    if trimmed.is_empty() {
        return delete_credential(conn, key);
    }

    let encoded = B64_ENGINE.encode(trimmed.as_bytes());
    let now = OffsetDateTime::now_utc().unix_timestamp();
    conn.execute(
        "INSERT INTO credentials (key_name, secret, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)
         ON CONFLICT(key_name) DO UPDATE SET secret = excluded.secret, updated_at = excluded.updated_at",
        params![key.config_key(), encoded, now],
    )?;
    log_event(
        conn,
        "info",
        Some("KEY-0001"),
        MODULE,
        &format!("{} key stored", key.label()),
        Some("credential written to the local store"),
        Some(json!({ "key": key.config_key(), "fingerprint": fingerprint(trimmed) })),
    )?;
    Ok(())
}

pub fn delete_credential(conn: &rusqlite::Connection, key: KeyName) -> Result<()> {
    let removed = conn.execute(
        "DELETE FROM credentials WHERE key_name = ?1",
        params![key.config_key()],
    )?;
    if removed > 0 {
        log_event(
            conn,
            "info",
            Some("KEY-0002"),
            MODULE,
            &format!("{} key removed", key.label()),
            Some("credential deleted from the local store"),
            Some(json!({ "key": key.config_key() })),
        )?;
    }
    Ok(())
}

/// Decode every stored credential into a snapshot.
pub fn load_credentials(conn: &rusqlite::Connection) -> Result<StaticConfig> {
    let mut stmt = conn.prepare("SELECT key_name, secret FROM credentials ORDER BY key_name")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

    let mut config = StaticConfig::new();
    for row in rows {
        let (name, encoded) = row?;
        let Some(key) = KeyName::from_alias(&name) else {
            log::warn!("skipping credential for unknown key {name}");
            continue;
        };
        let value = decode_secret(&encoded)
            .with_context(|| format!("stored credential for {name} is corrupt"))?;
        config.insert(key, value);
    }
    Ok(config)
}

fn decode_secret(encoded: &str) -> Result<String> {
    let decoded = B64_ENGINE
        .decode(encoded.as_bytes())
        .map_err(|_| anyhow!("Failed to decode stored credential"))?;
    String::from_utf8(decoded).map_err(|_| anyhow!("Stored credential was not valid UTF-8"))
}
