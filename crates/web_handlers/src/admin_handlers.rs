use actix_web::{HttpResponse, Result, web};
use validator::Validate;

use admin_services::AdminService;
use admin_services::jwt::JwtService;
use admin_services::types::*;

/// Health check endpoint
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "service": "lodge-backend",
        "status": "healthy",
        "timestamp": chrono::Utc::now()
    })))
}

/// Handles admin login by verifying credentials and returning a signed session token.
pub async fn admin_login(
    admin_service: web::Data<AdminService>,
    jwt_service: web::Data<JwtService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AdminError> {
    request
        .validate()
        .map_err(|e| AdminError::Validation(format!("Validation error: {}", e)))?;

    let admin = admin_service
        .login(&request.username, &request.password)
        .await?;
    let token = jwt_service.generate_token(&admin)?;

    log::info!("🔓 Admin {} logged in", admin.username);

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        admin: AdminInfo::from(&admin),
    }))
}

/// Issues a password reset code and mails it to the operator mailbox.
pub async fn admin_forgot_password(
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, AdminError> {
    admin_service.request_password_reset().await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("OTP sent to admin email")))
}

/// Checks a password reset code without consuming it.
pub async fn admin_verify_otp(
    admin_service: web::Data<AdminService>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, AdminError> {
    admin_service.verify_reset_code(request.otp.trim()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("OTP verified successfully")))
}

/// Sets a new admin password. The reset code is checked again here.
pub async fn admin_reset_password(
    admin_service: web::Data<AdminService>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AdminError> {
    admin_service
        .reset_password(
            request.otp.trim(),
            &request.password,
            &request.confirm_password,
        )
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")))
}
