use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;
use validator::Validate;

use admin_services::middleware::AuthenticatedAdmin;
use guest_services::*;
use notification_services::{SharedEmailService, messages};

/// Who gets told about new bookings, and the name guests see.
#[derive(Debug, Clone)]
pub struct BookingMailSettings {
    /// Mailbox receiving new-booking alerts
    pub operator_email: String,
    /// Business name used in guest-facing mail
    pub business_name: String,
}

/// Stores a booking, then alerts the operator and welcomes the guest.
/// Email failures are logged and do not fail the request.
pub async fn submit_booking(
    bookings: web::Data<SharedBookingStore>,
    mailer: web::Data<SharedEmailService>,
    mail_settings: web::Data<BookingMailSettings>,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, GuestError> {
    request
        .validate()
        .map_err(|e| GuestError::Validation(format!("Validation error: {}", e)))?;
    request.check_stay()?;

    let booking = bookings.create_booking(&request).await?;

    let details = serde_json::to_string_pretty(&request.0).unwrap_or_default();
    let alert = messages::new_booking_alert(&booking.name, &details);
    if let Err(e) = mailer
        .send_message(&mail_settings.operator_email, &alert)
        .await
    {
        log::warn!("Failed to send booking alert for {}: {}", booking.id, e);
    }

    if let Some(email) = booking.email.as_deref() {
        let welcome = messages::guest_welcome(&booking.name, &mail_settings.business_name);
        if let Err(e) = mailer.send_message(email, &welcome).await {
            log::warn!("Failed to send welcome email for {}: {}", booking.id, e);
        }
    }

    Ok(HttpResponse::Created().json(booking))
}

/// Lists all bookings
pub async fn list_bookings(
    bookings: web::Data<SharedBookingStore>,
    _admin: AuthenticatedAdmin,
) -> Result<HttpResponse, GuestError> {
    let bookings = bookings.list_bookings().await?;

    Ok(HttpResponse::Ok().json(bookings))
}

/// Counts all bookings
pub async fn count_bookings(
    bookings: web::Data<SharedBookingStore>,
    _admin: AuthenticatedAdmin,
) -> Result<HttpResponse, GuestError> {
    let count = bookings.count_bookings().await?;

    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

/// Deletes a booking by ID
pub async fn delete_booking(
    bookings: web::Data<SharedBookingStore>,
    admin: AuthenticatedAdmin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GuestError> {
    let booking_id = path.into_inner();
    let booking = bookings.delete_booking(&booking_id).await?;

    log::info!("Admin {} deleted booking {}", admin.0, booking_id);
    Ok(HttpResponse::Ok().json(booking))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use notification_services::{EmailService, NotificationError};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingEmailService {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl EmailService for RecordingEmailService {
        async fn send_email(
            &self,
            to: &str,
            subject: &str,
            _body: &str,
        ) -> Result<String, NotificationError> {
            if self.fail {
                return Err(NotificationError::SesError("mailbox unavailable".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok("mock-email-id".to_string())
        }
    }

    fn booking_body(email: &str, adults: i32, checkout: &str) -> serde_json::Value {
        serde_json::json!({
            "name": "Asha Rai",
            "email": email,
            "mobile": "+91 70033 28637",
            "checkin": "2026-12-20",
            "checkout": checkout,
            "adults": adults,
            "children": 0,
            "duration": "3 nights"
        })
    }

    macro_rules! booking_app {
        ($store:expr, $mailer:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($store.clone() as SharedBookingStore))
                    .app_data(web::Data::new($mailer.clone() as SharedEmailService))
                    .app_data(web::Data::new(BookingMailSettings {
                        operator_email: "ops@example.com".to_string(),
                        business_name: "Starry Mountain".to_string(),
                    }))
                    .route("/bookings", web::post().to(submit_booking))
                    .route("/bookings", web::get().to(list_bookings)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_booking_alerts_operator_and_welcomes_guest() {
        let store = Arc::new(MemoryBookingStore::new());
        let mailer = Arc::new(RecordingEmailService::default());
        let app = booking_app!(store, mailer);

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body("asha@example.com", 2, "2026-12-23"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], "Asha Rai");
        assert_eq!(store.count_bookings().await.unwrap(), 1);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], ("ops@example.com".to_string(), "New Booking From Asha Rai".to_string()));
        assert_eq!(sent[1], ("asha@example.com".to_string(), "Welcome to Starry Mountain".to_string()));
    }

    #[actix_web::test]
    async fn test_booking_without_email_only_alerts_operator() {
        let store = Arc::new(MemoryBookingStore::new());
        let mailer = Arc::new(RecordingEmailService::default());
        let app = booking_app!(store, mailer);

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body("", 2, "2026-12-23"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ops@example.com");
    }

    #[actix_web::test]
    async fn test_mail_failure_still_stores_booking() {
        let store = Arc::new(MemoryBookingStore::new());
        let mailer = Arc::new(RecordingEmailService {
            fail: true,
            ..Default::default()
        });
        let app = booking_app!(store, mailer);

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body("asha@example.com", 2, "2026-12-23"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(store.count_bookings().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_invalid_booking_is_rejected_without_mail() {
        let store = Arc::new(MemoryBookingStore::new());
        let mailer = Arc::new(RecordingEmailService::default());
        let app = booking_app!(store, mailer);

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body("asha@example.com", 0, "2026-12-23"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
        assert!(mailer.sent.lock().unwrap().is_empty());
        assert_eq!(store.count_bookings().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_checkout_before_checkin_is_rejected() {
        let store = Arc::new(MemoryBookingStore::new());
        let mailer = Arc::new(RecordingEmailService::default());
        let app = booking_app!(store, mailer);

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body("asha@example.com", 2, "2026-12-19"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_date_range");
        assert_eq!(store.count_bookings().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_listing_requires_authenticated_admin() {
        let store = Arc::new(MemoryBookingStore::new());
        let mailer = Arc::new(RecordingEmailService::default());
        let app = booking_app!(store, mailer);

        let req = test::TestRequest::get().uri("/bookings").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
