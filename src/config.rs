use std::env;

/// Process-wide configuration, loaded once at startup.
///
/// The session signing secret lives here so that key rotation is a restart-time
/// decision: rotating it invalidates all outstanding sessions.
pub struct Config {
    /// Connection string for the Postgres store. When absent the server falls
    /// back to the in-memory store (development only).
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    /// HMAC secret for session token signing.
    pub jwt_secret: String,
    /// Whether to set the `Secure` flag on the session cookie (production).
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok(),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            cookie_secure: env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
