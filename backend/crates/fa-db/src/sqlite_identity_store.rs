//! SQLite-backed identity store.
//!
//! Atomicity comes from single statements: `INSERT .. ON CONFLICT DO NOTHING`
//! for creation and `UPDATE .. WHERE version = ? RETURNING ..` for merges, so
//! no transaction spans a read and a write.

use crate::{DbError, IdentityStore, Result as DbErrorResult, StoredIdentity};

use fa_core::{IdentityRecord, ProviderField, ProviderTag, RecordPatch};

use std::collections::BTreeMap;
use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::{debug, error};
use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const SELECT_COLUMNS: &str =
    "email, name, password_hash, linked_providers, external_ids, version, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteIdentityStore {
    pool: SqlitePool,
}

impl SqliteIdentityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations
    #[track_caller]
    pub async fn migrate(&self) -> DbErrorResult<()> {
        let location = ErrorLocation::from(Location::caller());
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
                location,
            })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_stored(row: &SqliteRow) -> DbErrorResult<StoredIdentity> {
        let email: String = row.try_get("email")?;

        let raw_providers: Option<String> = row.try_get("linked_providers")?;
        let field = match raw_providers {
            Some(raw) => Self::parse_providers(&email, &raw)?,
            None => None,
        };
        let (linked_providers, legacy_providers) = ProviderField::normalize(field);

        let raw_external_ids: String = row.try_get("external_ids")?;
        let external_ids: BTreeMap<ProviderTag, String> =
            serde_json::from_str(&raw_external_ids).map_err(|e| {
                DbError::corrupt(&email, format!("invalid external_ids: {}", e))
            })?;

        let created_at = Self::timestamp(&email, "created_at", row.try_get("created_at")?)?;
        let updated_at = Self::timestamp(&email, "updated_at", row.try_get("updated_at")?)?;

        Ok(StoredIdentity {
            record: IdentityRecord {
                name: row.try_get("name")?,
                password_hash: row.try_get("password_hash")?,
                linked_providers,
                external_ids,
                created_at,
                updated_at,
                email,
            },
            version: row.try_get("version")?,
            legacy_providers,
        })
    }

    /// Accepts a JSON list, a JSON string, JSON null or a bare tag
    fn parse_providers(email: &str, raw: &str) -> DbErrorResult<Option<ProviderField>> {
        serde_json::from_str::<Option<ProviderField>>(raw).or_else(|e| {
            ProviderTag::from_str(raw.trim())
                .map(|tag| Some(ProviderField::Scalar(tag)))
                .map_err(|_| DbError::corrupt(email, format!("invalid linked_providers: {}", e)))
        })
    }

    fn timestamp(email: &str, column: &str, secs: i64) -> DbErrorResult<DateTime<Utc>> {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| DbError::corrupt(email, format!("invalid timestamp in {}", column)))
    }

    fn to_json<T: Serialize + ?Sized>(email: &str, value: &T) -> DbErrorResult<String> {
        serde_json::to_string(value)
            .map_err(|e| DbError::corrupt(email, format!("cannot encode column: {}", e)))
    }
}

#[async_trait]
impl IdentityStore for SqliteIdentityStore {
    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<StoredIdentity>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM identities WHERE email = ?",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_stored).transpose()
    }

    async fn insert_if_absent(&self, record: &IdentityRecord) -> DbErrorResult<StoredIdentity> {
        let providers = Self::to_json(&record.email, &record.linked_providers)?;
        let external_ids = Self::to_json(&record.email, &record.external_ids)?;

        let row = sqlx::query(&format!(
            r#"
                INSERT INTO identities (
                    email, name, password_hash, linked_providers, external_ids,
                    version, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, 1, ?, ?)
                ON CONFLICT(email) DO NOTHING
                RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&record.email)
        .bind(&record.name)
        .bind(&record.password_hash)
        .bind(providers)
        .bind(external_ids)
        .bind(record.created_at.timestamp())
        .bind(record.updated_at.timestamp())
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| error!("Insert of identity {} failed: {}", record.email, e))?;

        match row {
            Some(row) => Self::row_to_stored(&row),
            None => {
                debug!("Identity {} already exists, insert skipped", record.email);
                Err(DbError::conflict(&record.email))
            }
        }
    }

    async fn compare_and_update(
        &self,
        email: &str,
        expected_version: i64,
        patch: &RecordPatch,
    ) -> DbErrorResult<StoredIdentity> {
        let providers = patch
            .linked_providers
            .as_ref()
            .map(|p| Self::to_json(email, p))
            .transpose()?;
        let external_ids = patch
            .external_ids
            .as_ref()
            .map(|ids| Self::to_json(email, ids))
            .transpose()?;

        let row = sqlx::query(&format!(
            r#"
                UPDATE identities SET
                    name = COALESCE(?, name),
                    linked_providers = COALESCE(?, linked_providers),
                    external_ids = COALESCE(?, external_ids),
                    version = version + 1,
                    updated_at = ?
                WHERE email = ? AND version = ?
                RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&patch.name)
        .bind(providers)
        .bind(external_ids)
        .bind(Utc::now().timestamp())
        .bind(email)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| error!("Update of identity {} failed: {}", email, e))?;

        match row {
            Some(row) => Self::row_to_stored(&row),
            None => {
                debug!(
                    "Identity {} moved past version {}, update skipped",
                    email, expected_version
                );
                Err(DbError::conflict(email))
            }
        }
    }

    async fn ping(&self) -> DbErrorResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
