use std::env;

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub access_token_secret: SecretString,
    pub access_token_expiry_minutes: i64,
    pub refresh_token_secret: SecretString,
    pub refresh_token_expiry_days: i64,
    pub cors_origin: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizhive-local".to_string()),
            access_token_secret: SecretString::from(
                env::var("ACCESS_TOKEN_SECRET")
                    .unwrap_or_else(|_| "dev_access_secret_change_in_production".to_string()),
            ),
            access_token_expiry_minutes: env::var("ACCESS_TOKEN_EXPIRY_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(15),
            refresh_token_secret: SecretString::from(
                env::var("REFRESH_TOKEN_SECRET")
                    .unwrap_or_else(|_| "dev_refresh_secret_change_in_production".to_string()),
            ),
            refresh_token_expiry_days: env::var("REFRESH_TOKEN_EXPIRY_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(7),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let access_secret = self.access_token_secret.expose_secret();
        let refresh_secret = self.refresh_token_secret.expose_secret();

        if access_secret == "dev_access_secret_change_in_production" {
            panic!(
                "FATAL: ACCESS_TOKEN_SECRET is using default value! Set ACCESS_TOKEN_SECRET environment variable to a secure random string."
            );
        }

        if access_secret.len() < 32 {
            panic!(
                "FATAL: ACCESS_TOKEN_SECRET is too short ({}). Must be at least 32 characters for security.",
                access_secret.len()
            );
        }

        if refresh_secret == "dev_refresh_secret_change_in_production" {
            panic!(
                "FATAL: REFRESH_TOKEN_SECRET is using default value! Set REFRESH_TOKEN_SECRET environment variable to a secure random string."
            );
        }

        if refresh_secret.len() < 32 {
            panic!(
                "FATAL: REFRESH_TOKEN_SECRET is too short ({}). Must be at least 32 characters for security.",
                refresh_secret.len()
            );
        }

        if access_secret == refresh_secret {
            panic!(
                "FATAL: ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must be distinct secrets."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizhive-test".to_string(),
            access_token_secret: SecretString::from("test_access_secret_key".to_string()),
            access_token_expiry_minutes: 15,
            refresh_token_secret: SecretString::from("test_refresh_secret_key".to_string()),
            refresh_token_expiry_days: 7,
            cors_origin: "http://localhost:5173".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            public_base_url: "http://localhost:8000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.access_token_expiry_minutes > 0);
        assert!(config.refresh_token_expiry_days > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "quizhive-test");
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.refresh_token_expiry_days, 7);
    }
}
