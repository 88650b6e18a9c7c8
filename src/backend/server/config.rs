/**
 * Store Configuration
 *
 * Picks the persistence backend from `AppConfig`.
 *
 * - No `DATABASE_URL`: in-memory store. Documents do not survive a restart,
 *   so this is logged as a warning.
 * - `DATABASE_URL` set: SQLite store with migrations applied. Failing to
 *   connect or migrate is a startup error; the server never silently falls
 *   back to memory when a database was asked for.
 */

use std::sync::Arc;

use crate::backend::store::{DocumentStore, MemoryStore, SqliteStore, StoreError};
use crate::shared::AppConfig;

/// Open the configured document store
pub async fn load_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("[Store] DATABASE_URL not set. Documents are kept in memory only.");
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("[Store] Connecting to database...");
    let store = SqliteStore::connect(database_url).await.map_err(|e| {
        tracing::error!("[Store] Failed to open database: {}", e);
        e
    })?;
    tracing::info!("[Store] Database ready");

    Ok(Arc::new(store))
}
