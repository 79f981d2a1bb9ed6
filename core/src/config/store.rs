//! Credential store source: the decoded rows of the SQLite `credentials` table.

use anyhow::Result;

use super::StaticConfig;
use crate::credentials::load_credentials;
use crate::db::DbPool;

pub fn load(pool: &DbPool) -> Result<StaticConfig> {
    let conn = pool.get()?;
    load_credentials(&conn)
}
