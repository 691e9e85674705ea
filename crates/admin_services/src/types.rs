use chrono::{DateTime, Utc};
use notification_services::NotificationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Admin model representing the database schema
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    /// Unique identifier for the admin
    pub id: Uuid,
    /// Login name, unique across admins
    pub username: String,
    /// Bcrypt hash of the admin password
    pub password_hash: String,
    /// Outstanding password reset code, if one was issued
    pub otp: Option<String>,
    /// When the outstanding reset code stops being accepted
    pub otp_expires_at: Option<DateTime<Utc>>,
    /// Failed checks against the outstanding reset code
    pub otp_attempts: i32,
    /// Timestamp when the admin was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the admin was last updated
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Builds a fresh admin record with no outstanding reset code.
    pub fn new(username: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            password_hash,
            otp: None,
            otp_expires_at: None,
            otp_attempts: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public information about an admin, used in responses
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    /// Unique identifier for the admin
    pub id: Uuid,
    /// Login name
    pub username: String,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
        }
    }
}

/// Request structure for admin login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name of the admin
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password for the admin account
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response structure for admin login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always true for a successful login
    pub success: bool,
    /// Human readable result
    pub message: String,
    /// Signed session token
    pub token: String,
    /// The admin who logged in
    pub admin: AdminInfo,
}

/// Request structure for verifying a reset code
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    /// The one-time code sent to the operator mailbox
    pub otp: String,
}

/// Request structure for completing a password reset
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    /// The one-time code sent to the operator mailbox
    #[serde(default)]
    pub otp: String,

    /// New password
    pub password: String,

    /// Repeated new password
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

/// Generic response carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message indicating the result of the action
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject of the token, the admin ID
    pub sub: String,
    /// Login name of the admin
    pub username: String,
    /// Expiration timestamp of the token
    pub exp: usize,
    /// Issued at timestamp of the token
    pub iat: usize,
}

/// Custom error type for admin operations
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// No admin record matches the lookup
    #[error("Admin not found")]
    AdminNotFound,

    /// An admin with this username already exists
    #[error("Admin already exists")]
    AdminExists,

    /// The provided credentials are invalid
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The supplied reset code does not match an outstanding one
    #[error("Invalid OTP")]
    InvalidCode,

    /// The reset code matched but its window has passed
    #[error("OTP expired")]
    CodeExpired,

    /// The new password and its confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// An error occurred while validating input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// A database error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An error occurred while hashing the password
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// An error occurred while signing or checking a token
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The reset code could not be delivered
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),
}

impl actix_web::ResponseError for AdminError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AdminError::AdminNotFound => StatusCode::NOT_FOUND,
            AdminError::AdminExists => StatusCode::CONFLICT,
            AdminError::InvalidCredentials | AdminError::InvalidCode => StatusCode::UNAUTHORIZED,
            AdminError::CodeExpired
            | AdminError::PasswordMismatch
            | AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        let status = self.status_code();
        let (error, message) = match self {
            AdminError::AdminNotFound => ("admin_not_found", "Admin not found".to_string()),
            AdminError::AdminExists => ("admin_exists", "An admin with this username already exists".to_string()),
            AdminError::InvalidCredentials => {
                ("invalid_credentials", "Invalid username or password".to_string())
            }
            AdminError::InvalidCode => ("invalid_otp", "Invalid OTP".to_string()),
            AdminError::CodeExpired => ("otp_expired", "OTP expired".to_string()),
            AdminError::PasswordMismatch => {
                ("password_mismatch", "Passwords do not match".to_string())
            }
            AdminError::Validation(msg) => ("validation_error", msg.clone()),
            _ => {
                log::error!("❌ Admin request failed: {}", self);
                ("internal_error", "An internal error occurred".to_string())
            }
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error,
            "message": message
        }))
    }
}
