//! Per-tenant settings persistence.

use async_trait::async_trait;

use searchtrack_core::error::TrackerError;
use searchtrack_core::repository::SettingsStore;
use searchtrack_core::settings::TrackerSettings;

use crate::{SqliteSearchStore, storage_err};

const TRACKING_ENABLED: &str = "tracking_enabled";
const RETENTION_DAYS: &str = "retention_days";

#[async_trait]
impl SettingsStore for SqliteSearchStore {
    async fn settings(&self, tenant_id: i64) -> Result<TrackerSettings, TrackerError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT name, value FROM tracker_settings WHERE tenant_id = ?")
                .bind(tenant_id)
                .fetch_all(&self.pool)
                .await
                .map_err(storage_err)?;

        let mut settings = TrackerSettings::default();
        for (name, value) in rows {
            match name.as_str() {
                TRACKING_ENABLED => settings.tracking_enabled = value == "1",
                RETENTION_DAYS => {
                    if let Ok(days) = value.parse() {
                        settings.retention_days = days;
                    }
                }
                _ => {}
            }
        }
        Ok(settings)
    }

    async fn update_settings(
        &self,
        tenant_id: i64,
        settings: &TrackerSettings,
    ) -> Result<(), TrackerError> {
        let entries = [
            (
                TRACKING_ENABLED,
                if settings.tracking_enabled { "1" } else { "0" }.to_owned(),
            ),
            (RETENTION_DAYS, settings.retention_days.to_string()),
        ];

        for (name, value) in entries {
            sqlx::query(
                r"
                INSERT INTO tracker_settings (tenant_id, name, value)
                VALUES (?, ?, ?)
                ON CONFLICT (tenant_id, name) DO UPDATE SET value = excluded.value
                ",
            )
            .bind(tenant_id)
            .bind(name)
            .bind(&value)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        }
        Ok(())
    }
}
