use std::sync::Arc;

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Duration, Utc};
use notification_services::{SharedEmailService, messages};

use crate::recovery::RESET_CODE_TTL_MINUTES;
use crate::store::AdminStore;
use crate::types::{Admin, AdminError};

/// Settings for the admin account and its recovery flow.
#[derive(Debug, Clone)]
pub struct AdminSettings {
    /// Username the recovery flow operates on
    pub admin_username: String,
    /// Mailbox that receives reset codes
    pub operator_email: String,
    /// How long an issued reset code is accepted
    pub reset_code_ttl: Duration,
    /// Bcrypt cost used for new password hashes
    pub hash_cost: u32,
}

impl AdminSettings {
    /// Settings with the default code lifetime and hash cost.
    pub fn new(admin_username: &str, operator_email: &str) -> Self {
        Self {
            admin_username: admin_username.to_string(),
            operator_email: operator_email.to_string(),
            reset_code_ttl: Duration::minutes(RESET_CODE_TTL_MINUTES),
            hash_cost: DEFAULT_COST,
        }
    }
}

/// A service for admin operations: provisioning, login and password recovery.
pub struct AdminService {
    store: Arc<dyn AdminStore>,
    mailer: SharedEmailService,
    settings: AdminSettings,
}

impl AdminService {
    /// Creates a new instance of `AdminService`.
    pub fn new(store: Arc<dyn AdminStore>, mailer: SharedEmailService, settings: AdminSettings) -> Self {
        Self {
            store,
            mailer,
            settings,
        }
    }

    /// The settings this service was built with.
    pub fn settings(&self) -> &AdminSettings {
        &self.settings
    }

    /// Creates the admin account. Fails if the username is taken.
    pub async fn provision(&self, username: &str, password: &str) -> Result<Admin, AdminError> {
        if username.trim().is_empty() {
            return Err(AdminError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(AdminError::Validation("Password is required".to_string()));
        }

        let password_hash = hash(password, self.settings.hash_cost)?;
        let admin = Admin::new(username, password_hash);
        self.store.insert(&admin).await?;

        log::info!("👤 Admin {} provisioned", admin.username);
        Ok(admin)
    }

    /// Verifies a username and password pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<Admin, AdminError> {
        let admin = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(AdminError::InvalidCredentials)?;

        if !verify(password, &admin.password_hash)? {
            return Err(AdminError::InvalidCredentials);
        }

        Ok(admin)
    }

    /// Issues a reset code for the admin and mails it to the operator mailbox.
    ///
    /// The code is persisted before it is sent; a delivery failure is reported
    /// but the stored code stays valid.
    pub async fn request_password_reset(&self) -> Result<(), AdminError> {
        let mut admin = self.find_admin().await?;

        let code = admin.issue_reset_code(Utc::now(), self.settings.reset_code_ttl);
        self.store.update(&admin).await?;

        let message = messages::admin_reset_code(&code, self.settings.reset_code_ttl.num_minutes());
        if let Err(e) = self
            .mailer
            .send_message(&self.settings.operator_email, &message)
            .await
        {
            log::error!("❌ Failed to send reset code for {}: {}", admin.username, e);
            return Err(e.into());
        }

        log::info!("🔑 Reset code issued for admin {}", admin.username);
        Ok(())
    }

    /// Checks a reset code without consuming it.
    pub async fn verify_reset_code(&self, code: &str) -> Result<(), AdminError> {
        let mut admin = self
            .store
            .find_by_username(&self.settings.admin_username)
            .await?
            .ok_or(AdminError::InvalidCode)?;

        self.check_code(&mut admin, code, Utc::now()).await
    }

    /// Sets a new password, consuming the outstanding reset code.
    pub async fn reset_password(
        &self,
        code: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AdminError> {
        if password != confirm_password {
            return Err(AdminError::PasswordMismatch);
        }
        if password.is_empty() {
            return Err(AdminError::Validation("Password is required".to_string()));
        }

        let mut admin = self.find_admin().await?;
        let now = Utc::now();
        self.check_code(&mut admin, code, now).await?;

        let password_hash = hash(password, self.settings.hash_cost)?;
        admin.complete_reset(password_hash, now);
        self.store.update(&admin).await?;

        log::info!("🔒 Password reset for admin {}", admin.username);
        Ok(())
    }

    // A failed check may clear or count against the stored code, so the
    // record is written back before the error is returned.
    async fn check_code(
        &self,
        admin: &mut Admin,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AdminError> {
        let Err(error) = admin.check_reset_code(code, now) else {
            return Ok(());
        };

        if admin.record_failed_check(&error, now) {
            self.store.update(admin).await?;
            if admin.otp.is_none() {
                log::warn!("🔑 Reset code for admin {} discarded: {}", admin.username, error);
            }
        }
        Err(error)
    }

    async fn find_admin(&self) -> Result<Admin, AdminError> {
        self.store
            .find_by_username(&self.settings.admin_username)
            .await?
            .ok_or(AdminError::AdminNotFound)
    }
}
