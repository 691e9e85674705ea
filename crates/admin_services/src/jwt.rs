use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::types::{Admin, AdminError, Claims};

/// How long an admin session token stays valid, in days.
pub const SESSION_TTL_DAYS: i64 = 2;

/// Issues and checks HS256 session tokens for admins.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    /// Creates a service signing with `secret` and the default session lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::days(SESSION_TTL_DAYS))
    }

    /// Creates a service signing with `secret` and a custom session lifetime.
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            ttl,
        }
    }

    /// Signs a session token for `admin`.
    pub fn generate_token(&self, admin: &Admin) -> Result<String, AdminError> {
        let now = Utc::now();

        let claims = Claims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            exp: (now + self.ttl).timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Checks the signature and expiry of `token`.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AdminError> {
        let token_data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }

    /// Returns the admin id carried by a valid token.
    pub fn extract_admin_id_from_token(&self, token: &str) -> Result<Uuid, AdminError> {
        let claims = self.verify_token(token)?;
        let admin_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            AdminError::Jwt(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidSubject,
            ))
        })?;

        Ok(admin_id)
    }
}
