use std::str::FromStr;

/// Where outbound email goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProvider {
    /// Amazon SES
    Ses,
    /// Written to the log only, for local development
    Log,
}

impl FromStr for EmailProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ses" => Ok(EmailProvider::Ses),
            "log" => Ok(EmailProvider::Log),
            _ => Err(ConfigError::Invalid {
                name: "EMAIL_PROVIDER",
                value: value.to_string(),
            }),
        }
    }
}

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used
    #[error("{name} has an invalid value: {value}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Runtime settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Postgres connection string
    pub database_url: String,
    /// HS256 secret for admin session tokens
    pub jwt_secret: String,
    /// Account the password recovery flow operates on
    pub admin_username: String,
    /// Mailbox receiving reset codes and booking alerts
    pub operator_email: String,
    /// Sender address, required for SES
    pub from_email: Option<String>,
    /// Backend used for outbound email
    pub email_provider: EmailProvider,
    /// Name signed on guest-facing mail
    pub business_name: String,
    /// A single origin, or `*` for any
    pub cors_allowed_origin: String,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port: u16 = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => 3000,
        };

        let email_provider = match get("EMAIL_PROVIDER") {
            Some(value) => value.parse()?,
            None => EmailProvider::Ses,
        };

        let from_email = get("FROM_EMAIL");
        if email_provider == EmailProvider::Ses && from_email.is_none() {
            return Err(ConfigError::Missing("FROM_EMAIL"));
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "postgres://localhost/lodge".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            admin_username: get("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            operator_email: required("OPERATOR_EMAIL")?,
            from_email,
            email_provider,
            business_name: get("BUSINESS_NAME")
                .unwrap_or_else(|| "Starry Mountain".to_string()),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string()),
        })
    }

    /// `host:port` pair to bind the server to.
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
