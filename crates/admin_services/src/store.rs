use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::types::{Admin, AdminError};

/// Persistence for admin records, keyed by username.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Finds the admin with the given username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AdminError>;

    /// Inserts a new admin. Fails with [`AdminError::AdminExists`] on a duplicate username.
    async fn insert(&self, admin: &Admin) -> Result<(), AdminError>;

    /// Writes the mutable fields of an existing admin back to the store.
    async fn update(&self, admin: &Admin) -> Result<(), AdminError>;
}

/// Admin store backed by the `admins` table.
pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    /// Creates a new instance of `PgAdminStore` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AdminError> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, username, password_hash, otp, otp_expires_at, otp_attempts, created_at, updated_at
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn insert(&self, admin: &Admin) -> Result<(), AdminError> {
        let result = sqlx::query(
            r#"
            INSERT INTO admins (
                id, username, password_hash, otp, otp_expires_at, otp_attempts,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(admin.id)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.otp)
        .bind(admin.otp_expires_at)
        .bind(admin.otp_attempts)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AdminError::AdminExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, admin: &Admin) -> Result<(), AdminError> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET password_hash = $1,
                otp = $2,
                otp_expires_at = $3,
                otp_attempts = $4,
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&admin.password_hash)
        .bind(&admin.otp)
        .bind(admin.otp_expires_at)
        .bind(admin.otp_attempts)
        .bind(admin.updated_at)
        .bind(admin.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AdminError::AdminNotFound);
        }

        Ok(())
    }
}

/// In-memory admin store, used by tests and local tooling.
#[derive(Default)]
pub struct MemoryAdminStore {
    admins: Mutex<HashMap<String, Admin>>,
}

impl MemoryAdminStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given admins.
    pub fn with_admins(admins: impl IntoIterator<Item = Admin>) -> Self {
        let admins = admins
            .into_iter()
            .map(|admin| (admin.username.clone(), admin))
            .collect();

        Self {
            admins: Mutex::new(admins),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Admin>> {
        self.admins
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AdminError> {
        Ok(self.lock().get(username).cloned())
    }

    async fn insert(&self, admin: &Admin) -> Result<(), AdminError> {
        let mut admins = self.lock();
        if admins.contains_key(&admin.username) {
            return Err(AdminError::AdminExists);
        }
        admins.insert(admin.username.clone(), admin.clone());
        Ok(())
    }

    async fn update(&self, admin: &Admin) -> Result<(), AdminError> {
        let mut admins = self.lock();
        let stored = admins
            .values_mut()
            .find(|stored| stored.id == admin.id)
            .ok_or(AdminError::AdminNotFound)?;

        stored.password_hash = admin.password_hash.clone();
        stored.otp = admin.otp.clone();
        stored.otp_expires_at = admin.otp_expires_at;
        stored.otp_attempts = admin.otp_attempts;
        stored.updated_at = admin.updated_at;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_rejects_duplicate_username() {
        let store = MemoryAdminStore::new();
        store.insert(&Admin::new("admin", "a".to_string())).await.unwrap();

        let result = store.insert(&Admin::new("admin", "b".to_string())).await;
        assert!(matches!(result, Err(AdminError::AdminExists)));
    }

    #[tokio::test]
    async fn test_memory_store_update_only_touches_mutable_fields() {
        let admin = Admin::new("admin", "old".to_string());
        let store = MemoryAdminStore::with_admins([admin.clone()]);

        let mut changed = admin.clone();
        changed.password_hash = "new".to_string();
        changed.otp = Some("123456".to_string());
        changed.username = "renamed".to_string();
        store.update(&changed).await.unwrap();

        let stored = store.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "new");
        assert_eq!(stored.otp.as_deref(), Some("123456"));
        assert!(store.find_by_username("renamed").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_update_unknown_admin() {
        let store = MemoryAdminStore::new();
        let result = store.update(&Admin::new("ghost", "x".to_string())).await;
        assert!(matches!(result, Err(AdminError::AdminNotFound)));
    }
}
