use actix_web::{HttpResponse, error, web};

/// Largest JSON body any route accepts.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// JSON extractor settings: a body size cap and malformed payloads reported
/// in the same `{error, message}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let message = err.to_string();
            let response = HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": message
            }));
            error::InternalError::from_response(err, response).into()
        })
}
