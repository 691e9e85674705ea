use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::types::{Admin, AdminError};

/// How long an issued reset code is accepted, in minutes.
pub const RESET_CODE_TTL_MINUTES: i64 = 5;

/// Failed checks tolerated before the outstanding reset code is discarded.
pub const MAX_CODE_ATTEMPTS: i32 = 5;

/// Generates a random 6-digit reset code.
pub fn generate_reset_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(100000..=999999))
}

impl Admin {
    /// Stores a fresh reset code expiring `ttl` after `now` and returns it.
    /// Any previously issued code is replaced.
    pub fn issue_reset_code(&mut self, now: DateTime<Utc>, ttl: Duration) -> String {
        let code = generate_reset_code();
        self.otp = Some(code.clone());
        self.otp_expires_at = Some(now + ttl);
        self.otp_attempts = 0;
        self.updated_at = now;
        code
    }

    /// Checks `code` against the outstanding reset code at time `now`.
    ///
    /// A wrong or missing code is [`AdminError::InvalidCode`]; the right code
    /// at or after its expiry is [`AdminError::CodeExpired`].
    pub fn check_reset_code(&self, code: &str, now: DateTime<Utc>) -> Result<(), AdminError> {
        match self.otp.as_deref() {
            Some(stored) if stored == code => {}
            _ => return Err(AdminError::InvalidCode),
        }

        match self.otp_expires_at {
            Some(expires_at) if now < expires_at => Ok(()),
            _ => Err(AdminError::CodeExpired),
        }
    }

    /// Applies the outcome of a failed [`Admin::check_reset_code`] to the record.
    ///
    /// An expired code is cleared. A wrong guess against an outstanding code
    /// is counted, and the code is cleared once [`MAX_CODE_ATTEMPTS`] is
    /// reached. Returns whether the record changed and must be persisted.
    pub fn record_failed_check(&mut self, error: &AdminError, now: DateTime<Utc>) -> bool {
        match error {
            AdminError::CodeExpired => {
                self.clear_reset_code(now);
                true
            }
            AdminError::InvalidCode if self.otp.is_some() => {
                self.otp_attempts += 1;
                if self.otp_attempts >= MAX_CODE_ATTEMPTS {
                    self.clear_reset_code(now);
                } else {
                    self.updated_at = now;
                }
                true
            }
            _ => false,
        }
    }

    /// Replaces the password hash and consumes the outstanding reset code.
    pub fn complete_reset(&mut self, password_hash: String, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.clear_reset_code(now);
    }

    fn clear_reset_code(&mut self, now: DateTime<Utc>) {
        self.otp = None;
        self.otp_expires_at = None;
        self.otp_attempts = 0;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Admin {
        Admin::new("admin", "hash".to_string())
    }

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..200 {
            let code = generate_reset_code();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((100000..=999999).contains(&value));
        }
    }

    #[test]
    fn test_issue_sets_code_and_expiry() {
        let mut admin = admin();
        let now = Utc::now();
        let code = admin.issue_reset_code(now, Duration::minutes(RESET_CODE_TTL_MINUTES));

        assert_eq!(admin.otp.as_deref(), Some(code.as_str()));
        assert_eq!(admin.otp_expires_at, Some(now + Duration::minutes(5)));
    }

    #[test]
    fn test_check_distinguishes_wrong_code_from_expired_code() {
        let mut admin = admin();
        let now = Utc::now();
        let code = admin.issue_reset_code(now, Duration::minutes(5));

        assert!(admin.check_reset_code(&code, now + Duration::minutes(4)).is_ok());
        assert!(matches!(
            admin.check_reset_code("000000", now),
            Err(AdminError::InvalidCode)
        ));
        assert!(matches!(
            admin.check_reset_code(&code, now + Duration::minutes(6)),
            Err(AdminError::CodeExpired)
        ));
    }

    #[test]
    fn test_code_is_rejected_at_exact_expiry() {
        let mut admin = admin();
        let now = Utc::now();
        let code = admin.issue_reset_code(now, Duration::minutes(5));

        assert!(matches!(
            admin.check_reset_code(&code, now + Duration::minutes(5)),
            Err(AdminError::CodeExpired)
        ));
    }

    #[test]
    fn test_check_without_outstanding_code_is_invalid() {
        let admin = admin();
        assert!(matches!(
            admin.check_reset_code("", Utc::now()),
            Err(AdminError::InvalidCode)
        ));
    }

    #[test]
    fn test_expired_check_clears_code() {
        let mut admin = admin();
        let now = Utc::now();
        let code = admin.issue_reset_code(now, Duration::minutes(5));
        let later = now + Duration::minutes(6);

        let error = admin.check_reset_code(&code, later).unwrap_err();
        assert!(admin.record_failed_check(&error, later));

        assert!(admin.otp.is_none());
        assert!(admin.otp_expires_at.is_none());
        assert!(matches!(
            admin.check_reset_code(&code, later),
            Err(AdminError::InvalidCode)
        ));
    }

    #[test]
    fn test_wrong_guesses_exhaust_code() {
        let mut admin = admin();
        let now = Utc::now();
        let code = admin.issue_reset_code(now, Duration::minutes(5));
        let wrong = if code == "999999" { "100000" } else { "999999" };

        for attempt in 1..MAX_CODE_ATTEMPTS {
            let error = admin.check_reset_code(wrong, now).unwrap_err();
            assert!(admin.record_failed_check(&error, now));
            assert_eq!(admin.otp_attempts, attempt);
        }
        assert!(admin.check_reset_code(&code, now).is_ok());

        let error = admin.check_reset_code(wrong, now).unwrap_err();
        assert!(admin.record_failed_check(&error, now));
        assert!(admin.otp.is_none());
        assert_eq!(admin.otp_attempts, 0);
        assert!(matches!(
            admin.check_reset_code(&code, now),
            Err(AdminError::InvalidCode)
        ));
    }

    #[test]
    fn test_failed_check_without_code_changes_nothing() {
        let mut admin = admin();
        let error = admin.check_reset_code("123456", Utc::now()).unwrap_err();

        assert!(!admin.record_failed_check(&error, Utc::now()));
        assert_eq!(admin.otp_attempts, 0);
    }

    #[test]
    fn test_reissue_resets_attempts() {
        let mut admin = admin();
        let now = Utc::now();
        admin.issue_reset_code(now, Duration::minutes(5));
        admin.record_failed_check(&AdminError::InvalidCode, now);
        assert_eq!(admin.otp_attempts, 1);

        admin.issue_reset_code(now, Duration::minutes(5));
        assert_eq!(admin.otp_attempts, 0);
    }

    #[test]
    fn test_complete_reset_clears_code() {
        let mut admin = admin();
        let now = Utc::now();
        let code = admin.issue_reset_code(now, Duration::minutes(5));

        admin.complete_reset("new-hash".to_string(), now);

        assert_eq!(admin.password_hash, "new-hash");
        assert!(admin.otp.is_none());
        assert!(admin.otp_expires_at.is_none());
        assert!(matches!(
            admin.check_reset_code(&code, now),
            Err(AdminError::InvalidCode)
        ));
    }
}
