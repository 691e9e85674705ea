use actix_web::{HttpResponse, Result, web};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use admin_services::middleware::AuthenticatedAdmin;
use guest_services::*;

/// Stores feedback from a visitor
pub async fn submit_feedback(
    pool: web::Data<PgPool>,
    request: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, GuestError> {
    request
        .validate()
        .map_err(|e| GuestError::Validation(format!("Validation error: {}", e)))?;

    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let feedback = feedback_service.create_feedback(&request).await?;

    Ok(HttpResponse::Created().json(feedback))
}

/// Lists feedback approved for the public site
pub async fn list_approved_feedback(pool: web::Data<PgPool>) -> Result<HttpResponse, GuestError> {
    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let feedback = feedback_service.list_approved_feedback().await?;

    Ok(HttpResponse::Ok().json(feedback))
}

/// Lists all feedback
pub async fn list_feedback(
    pool: web::Data<PgPool>,
    _admin: AuthenticatedAdmin,
) -> Result<HttpResponse, GuestError> {
    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let feedback = feedback_service.list_feedback().await?;

    Ok(HttpResponse::Ok().json(feedback))
}

/// Counts all feedback
pub async fn count_feedback(
    pool: web::Data<PgPool>,
    _admin: AuthenticatedAdmin,
) -> Result<HttpResponse, GuestError> {
    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let count = feedback_service.count_feedback().await?;

    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

/// Gets a feedback entry by ID
pub async fn get_feedback(
    pool: web::Data<PgPool>,
    _admin: AuthenticatedAdmin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GuestError> {
    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let feedback = feedback_service.get_feedback(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(feedback))
}

/// Edits the name, email and text of a feedback entry
pub async fn update_feedback(
    pool: web::Data<PgPool>,
    _admin: AuthenticatedAdmin,
    path: web::Path<Uuid>,
    request: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, GuestError> {
    request
        .validate()
        .map_err(|e| GuestError::Validation(format!("Validation error: {}", e)))?;

    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let feedback = feedback_service
        .update_feedback(&path.into_inner(), &request)
        .await?;

    Ok(HttpResponse::Ok().json(feedback))
}

/// Approves or un-approves a feedback entry
pub async fn toggle_feedback_approval(
    pool: web::Data<PgPool>,
    _admin: AuthenticatedAdmin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GuestError> {
    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let feedback = feedback_service.toggle_approval(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(feedback))
}

/// Deletes a feedback entry by ID
pub async fn delete_feedback(
    pool: web::Data<PgPool>,
    admin: AuthenticatedAdmin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GuestError> {
    let feedback_id = path.into_inner();
    let feedback_service = FeedbackService::new(pool.get_ref().clone());
    let feedback = feedback_service.delete_feedback(&feedback_id).await?;

    log::info!("Admin {} deleted feedback {}", admin.0, feedback_id);
    Ok(HttpResponse::Ok().json(feedback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    fn lazy_pool() -> web::Data<PgPool> {
        web::Data::new(PgPool::connect_lazy("postgres://localhost/lodge").unwrap())
    }

    #[actix_web::test]
    async fn test_feedback_without_name_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(lazy_pool())
                .route("/feedbacks", web::post().to(submit_feedback)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/feedbacks")
            .set_json(serde_json::json!({"name": "", "feedback": "Lovely stay"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[actix_web::test]
    async fn test_moderation_requires_authenticated_admin() {
        let app = test::init_service(
            App::new()
                .app_data(lazy_pool())
                .route("/feedbacks/{id}/approve", web::put().to(toggle_feedback_approval)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/feedbacks/{}/approve", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
