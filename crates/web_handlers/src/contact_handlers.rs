use actix_web::{HttpResponse, Result, web};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use admin_services::middleware::AuthenticatedAdmin;
use guest_services::*;

/// Stores a contact form message
pub async fn submit_contact(
    pool: web::Data<PgPool>,
    request: web::Json<CreateContactRequest>,
) -> Result<HttpResponse, GuestError> {
    request
        .validate()
        .map_err(|e| GuestError::Validation(format!("Validation error: {}", e)))?;

    let contact_service = ContactService::new(pool.get_ref().clone());
    let contact = contact_service.create_contact(&request).await?;

    Ok(HttpResponse::Created().json(contact))
}

/// Lists all contact messages
pub async fn list_contacts(
    pool: web::Data<PgPool>,
    _admin: AuthenticatedAdmin,
) -> Result<HttpResponse, GuestError> {
    let contact_service = ContactService::new(pool.get_ref().clone());
    let contacts = contact_service.list_contacts().await?;

    Ok(HttpResponse::Ok().json(contacts))
}

/// Deletes a contact message by ID
pub async fn delete_contact(
    pool: web::Data<PgPool>,
    admin: AuthenticatedAdmin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GuestError> {
    let contact_id = path.into_inner();
    let contact_service = ContactService::new(pool.get_ref().clone());
    let contact = contact_service.delete_contact(&contact_id).await?;

    log::info!("Admin {} deleted contact {}", admin.0, contact_id);
    Ok(HttpResponse::Ok().json(contact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_contact_with_bad_mobile_is_rejected() {
        let pool = PgPool::connect_lazy("postgres://localhost/lodge").unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .route("/contacts", web::post().to(submit_contact)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/contacts")
            .set_json(serde_json::json!({
                "name": "Ravi",
                "mobile": "not a number",
                "message": "Do you have parking?"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().contains("mobile"));
    }
}
