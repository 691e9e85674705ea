use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::guest_types::*;

const BOOKING_COLUMNS: &str = "id, name, email, mobile, checkin, checkout, adults, children, duration, requests, created_at";

/// Persistence for booking requests.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Stores a new booking request. The request is expected to be validated.
    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, GuestError>;

    /// Lists all bookings, newest first
    async fn list_bookings(&self) -> Result<Vec<Booking>, GuestError>;

    /// Counts stored bookings
    async fn count_bookings(&self) -> Result<i64, GuestError>;

    /// Deletes a booking and returns what was removed
    async fn delete_booking(&self, booking_id: &Uuid) -> Result<Booking, GuestError>;
}

/// Booking store shared between handlers.
pub type SharedBookingStore = Arc<dyn BookingStore>;

/// Booking store backed by the `bookings` table.
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    /// Creates a new instance of `PgBookingStore` with the provided database connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, GuestError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (
                id, name, email, mobile, checkin, checkout, adults, children, duration, requests
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.email)
        .bind(request.mobile.trim())
        .bind(request.checkin)
        .bind(request.checkout)
        .bind(request.adults)
        .bind(request.children)
        .bind(request.duration.trim())
        .bind(&request.requests)
        .fetch_one(&self.pool)
        .await?;

        log::info!("🛏️ Booking {} stored for {}", booking.id, booking.name);
        Ok(booking)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, GuestError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC",
            BOOKING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn count_bookings(&self) -> Result<i64, GuestError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete_booking(&self, booking_id: &Uuid) -> Result<Booking, GuestError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "DELETE FROM bookings WHERE id = $1 RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GuestError::BookingNotFound)?;

        log::info!("🗑️ Booking {} deleted", booking_id);
        Ok(booking)
    }
}

/// In-memory booking store, used by tests and local tooling.
#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryBookingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Booking>> {
        self.bookings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, GuestError> {
        let booking = Booking {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            email: request.email.clone(),
            mobile: request.mobile.trim().to_string(),
            checkin: request.checkin,
            checkout: request.checkout,
            adults: request.adults,
            children: request.children,
            duration: request.duration.trim().to_string(),
            requests: request.requests.clone(),
            created_at: Utc::now(),
        };

        self.lock().push(booking.clone());
        Ok(booking)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, GuestError> {
        // Appended in submission order.
        Ok(self.lock().iter().rev().cloned().collect())
    }

    async fn count_bookings(&self) -> Result<i64, GuestError> {
        Ok(self.lock().len() as i64)
    }

    async fn delete_booking(&self, booking_id: &Uuid) -> Result<Booking, GuestError> {
        let mut bookings = self.lock();
        let index = bookings
            .iter()
            .position(|booking| booking.id == *booking_id)
            .ok_or(GuestError::BookingNotFound)?;

        Ok(bookings.remove(index))
    }
}
