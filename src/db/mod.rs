//! Database layer for SmartAttend
//!
//! Only tenant settings live here. Schedules themselves belong to the backend.

mod models;
mod schema;

pub use models::*;

use anyhow::Result;
use rusqlite::OptionalExtension;
use std::sync::Arc;
use tokio_rusqlite::Connection;
use tracing::info;

/// Database handle for SmartAttend
#[derive(Clone, Debug)]
pub struct Database {
    conn: Arc<Connection>,
}

impl Database {
    /// Create a new database connection
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path).await?;
        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Open a throwaway in-memory database
    pub async fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::MIGRATIONS)?;
                Ok(())
            })
            .await?;
        info!("Database migrations complete");
        Ok(())
    }

    // ==================== Tenant Settings ====================

    /// Get a tenant setting
    pub async fn get_setting(&self, tenant_id: &str, key: &str) -> Result<Option<TenantSetting>> {
        let tenant = tenant_id.to_string();
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT tenant_id, key, value, updated_at
                     FROM tenant_settings WHERE tenant_id = ? AND key = ?",
                )?;
                let result = stmt
                    .query_row(rusqlite::params![tenant, key], |row| {
                        Ok(TenantSetting {
                            tenant_id: row.get(0)?,
                            key: row.get(1)?,
                            value: row.get(2)?,
                            updated_at: row.get(3)?,
                        })
                    })
                    .optional()?;
                Ok(result)
            })
            .await
            .map_err(Into::into)
    }

    /// Set a tenant setting
    pub async fn set_setting(&self, setting: TenantSetting) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO tenant_settings
                     (tenant_id, key, value, updated_at) VALUES (?, ?, ?, ?)",
                    rusqlite::params![
                        setting.tenant_id,
                        setting.key,
                        setting.value,
                        setting.updated_at,
                    ],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Remove a tenant setting
    pub async fn clear_setting(&self, tenant_id: &str, key: &str) -> Result<()> {
        let tenant = tenant_id.to_string();
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM tenant_settings WHERE tenant_id = ? AND key = ?",
                    rusqlite::params![tenant, key],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}
