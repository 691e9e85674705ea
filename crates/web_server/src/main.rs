//! Main entry point for the lodge backend server.
//! This crate wires configuration, the database pool, email delivery and the
//! REST API together.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, middleware::Logger, web};
use admin_services::jwt::JwtService;
use admin_services::middleware::AuthMiddleware;
use admin_services::{AdminService, AdminSettings, PgAdminStore};
use guest_services::{PgBookingStore, SharedBookingStore};
use notification_services::{LogEmailService, SesEmailService, SharedEmailService};
use postgres::database::*;
use web_handlers::*;

mod config;

use config::{EmailProvider, ServerConfig};

fn build_cors(allowed_origin: &str) -> Cors {
    let cors = if allowed_origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(allowed_origin)
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600)
}

async fn build_mailer(config: &ServerConfig) -> SharedEmailService {
    match config.email_provider {
        EmailProvider::Ses => {
            let from_email = config.from_email.as_deref().unwrap_or_default();
            match SesEmailService::new(from_email).await {
                Ok(service) => {
                    log::info!("📧 SES email service initialized successfully");
                    Arc::new(service)
                }
                Err(e) => {
                    log::error!("❌ Failed to initialize SES email service: {}", e);
                    log::warn!("🔧 Check AWS credentials and SES setup");
                    std::process::exit(1);
                }
            }
        }
        EmailProvider::Log => {
            log::warn!("📧 EMAIL_PROVIDER=log, outbound email is only written to the log");
            Arc::new(LogEmailService)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting lodge backend server...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Create database connection pool
    let pool = match create_connection_pool(&config.database_url).await {
        Ok(pool) => {
            log::info!("🗃️ Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("❌ Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("❌ Failed to create database pool: {}", e);
            log::error!("💡 Make sure PostgreSQL is running and DATABASE_URL is correct");
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_schema(&pool).await {
        log::error!("❌ Failed to prepare database schema: {}", e);
        std::process::exit(1);
    }

    let mailer = build_mailer(&config).await;

    let jwt_service = JwtService::new(&config.jwt_secret);
    let admin_service = web::Data::new(AdminService::new(
        Arc::new(PgAdminStore::new(pool.clone())),
        mailer.clone(),
        AdminSettings::new(&config.admin_username, &config.operator_email),
    ));
    let booking_store: SharedBookingStore = Arc::new(PgBookingStore::new(pool.clone()));
    let mail_settings = BookingMailSettings {
        operator_email: config.operator_email.clone(),
        business_name: config.business_name.clone(),
    };

    let (host, port) = config.bind_address();
    let cors_origin = config.cors_allowed_origin.clone();
    log::info!("🌐 Server will be available at: http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .app_data(web::Data::new(booking_store.clone()))
            .app_data(web::Data::new(mail_settings.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(admin_service.clone())
            .app_data(json_config())
            .wrap(Logger::default())
            .wrap(build_cors(&cors_origin))
            .service(
                web::scope("/api")
                    // Public routes
                    .route("/health", web::get().to(health))
                    .route("/bookings", web::post().to(submit_booking))
                    .route("/feedbacks", web::post().to(submit_feedback))
                    .route("/feedbacks/approved", web::get().to(list_approved_feedback))
                    .route("/contacts", web::post().to(submit_contact))
                    .service(
                        web::scope("/admin")
                            .route("/login", web::post().to(admin_login))
                            .route("/forgot-password", web::post().to(admin_forgot_password))
                            .route("/verify-otp", web::post().to(admin_verify_otp))
                            .route("/reset-password", web::post().to(admin_reset_password)),
                    )
                    // Protected routes (require an admin session)
                    .service(
                        web::scope("/manage")
                            .wrap(AuthMiddleware::new(jwt_service.clone()))
                            .route("/bookings", web::get().to(list_bookings))
                            .route("/bookings/count", web::get().to(count_bookings))
                            .route("/bookings/{booking_id}", web::delete().to(delete_booking))
                            .route("/feedbacks", web::get().to(list_feedback))
                            .route("/feedbacks/count", web::get().to(count_feedback))
                            .route("/feedbacks/{feedback_id}", web::get().to(get_feedback))
                            .route("/feedbacks/{feedback_id}", web::put().to(update_feedback))
                            .route(
                                "/feedbacks/{feedback_id}/approve",
                                web::put().to(toggle_feedback_approval),
                            )
                            .route(
                                "/feedbacks/{feedback_id}",
                                web::delete().to(delete_feedback),
                            )
                            .route("/contacts", web::get().to(list_contacts))
                            .route("/contacts/{contact_id}", web::delete().to(delete_contact)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
