use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

// Regex for mobile number validation
lazy_static::lazy_static! {
    /// Digits with the usual separators, optionally starting with `+`.
    pub static ref MOBILE_REGEX: regex::Regex = regex::Regex::new(
        r"^\+?[0-9(][0-9()\-.\s]{5,18}[0-9]$"
    ).unwrap();
}

/// Shortest accepted mobile number, separators and `+` included.
pub const MOBILE_MIN_LEN: usize = 7;
/// Longest accepted mobile number, separators and `+` included.
pub const MOBILE_MAX_LEN: usize = 20;

/// Request structure for submitting a booking
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Name of the guest
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Optional email address of the guest
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: Option<String>,

    /// Mobile number of the guest
    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,

    /// Arrival date
    pub checkin: NaiveDate,

    /// Departure date
    pub checkout: NaiveDate,

    /// Number of adults
    #[validate(range(min = 1, message = "At least one adult is required"))]
    pub adults: i32,

    /// Number of children
    #[validate(range(min = 0, message = "Children cannot be negative"))]
    pub children: i32,

    /// Requested length of stay as entered by the guest
    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: String,

    /// Free-form special requests
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub requests: Option<String>,
}

impl CreateBookingRequest {
    /// Checks that the stay ends after it starts.
    pub fn check_stay(&self) -> Result<(), GuestError> {
        if self.checkout <= self.checkin {
            return Err(GuestError::InvalidDateRange);
        }
        Ok(())
    }
}

/// Structure representing a booking from the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: Uuid,
    /// Name of the guest
    pub name: String,
    /// Optional email address of the guest
    pub email: Option<String>,
    /// Mobile number of the guest
    pub mobile: String,
    /// Arrival date
    pub checkin: NaiveDate,
    /// Departure date
    pub checkout: NaiveDate,
    /// Number of adults
    pub adults: i32,
    /// Number of children
    pub children: i32,
    /// Requested length of stay
    pub duration: String,
    /// Free-form special requests
    pub requests: Option<String>,
    /// When the booking was submitted
    pub created_at: DateTime<Utc>,
}

/// Request structure for submitting or editing feedback
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    /// Name of the visitor
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Optional email address of the visitor
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: Option<String>,

    /// The feedback text
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 5000, message = "Feedback is too long"))]
    pub feedback: Option<String>,
}

/// Structure representing feedback from the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Feedback {
    /// Unique identifier for the feedback
    pub id: Uuid,
    /// Name of the visitor
    pub name: String,
    /// Optional email address of the visitor
    pub email: Option<String>,
    /// The feedback text
    pub feedback: Option<String>,
    /// Whether an admin approved the feedback for display
    pub flag: bool,
    /// When the feedback was submitted
    pub created_at: DateTime<Utc>,
}

/// Request structure for the contact form
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContactRequest {
    /// Name of the sender
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Optional email address of the sender
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: Option<String>,

    /// Mobile number of the sender
    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,

    /// The message
    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

/// Structure representing a contact message from the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Contact {
    /// Unique identifier for the message
    pub id: Uuid,
    /// Name of the sender
    pub name: String,
    /// Optional email address of the sender
    pub email: Option<String>,
    /// Mobile number of the sender
    pub mobile: String,
    /// The message
    pub message: String,
    /// When the message was submitted
    pub created_at: DateTime<Utc>,
}

/// Custom error type for guest record operations
#[derive(thiserror::Error, Debug)]
pub enum GuestError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid date range
    #[error("Invalid date range: checkout must be after checkin")]
    InvalidDateRange,

    /// Booking not found
    #[error("Booking not found")]
    BookingNotFound,

    /// Feedback not found
    #[error("Feedback not found")]
    FeedbackNotFound,

    /// Contact message not found
    #[error("Contact not found")]
    ContactNotFound,
}

impl actix_web::ResponseError for GuestError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            GuestError::Validation(_) | GuestError::InvalidDateRange => StatusCode::BAD_REQUEST,
            GuestError::BookingNotFound
            | GuestError::FeedbackNotFound
            | GuestError::ContactNotFound => StatusCode::NOT_FOUND,
            GuestError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            GuestError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            GuestError::InvalidDateRange => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "invalid_date_range",
                "message": "Checkout date must be after checkin date"
            })),
            GuestError::BookingNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "booking_not_found",
                "message": "Booking not found"
            })),
            GuestError::FeedbackNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "feedback_not_found",
                "message": "Feedback not found"
            })),
            GuestError::ContactNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "contact_not_found",
                "message": "Contact not found"
            })),
            GuestError::Database(e) => {
                log::error!("❌ Database error: {}", e);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

/// Response structure for count endpoints
#[derive(Debug, Serialize)]
pub struct CountResponse {
    /// Number of records
    pub count: i64,
}

/// Custom validation function for mobile numbers
fn validate_mobile(mobile: &str) -> Result<(), validator::ValidationError> {
    let mobile = mobile.trim();
    if (MOBILE_MIN_LEN..=MOBILE_MAX_LEN).contains(&mobile.len()) && MOBILE_REGEX.is_match(mobile) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_mobile")
            .with_message("Please enter a valid mobile number".into()))
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
