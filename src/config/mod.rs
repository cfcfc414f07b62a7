//! Configuration module for the club backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Password used for the bootstrap account when none is configured.
pub const DEFAULT_BOOTSTRAP_PASSWORD: &str = "change-me";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to (host from CLUB_BIND_HOST, port from PORT)
    pub bind_addr: SocketAddr,
    /// Path to the JSON document holding users, notifications, materials and team
    pub data_path: PathBuf,
    /// Static root; `uploads/` and `team/` live beneath it
    pub public_dir: PathBuf,
    /// Username of the undeletable superadmin seeded into a fresh document
    pub bootstrap_username: String,
    /// Initial password for the bootstrap superadmin
    pub bootstrap_password: String,
    /// Sessions expire after this many hours of inactivity
    pub session_ttl_hours: i64,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,
    /// Maximum accepted request body, mostly relevant for uploads
    pub max_upload_bytes: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("CLUB_BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("Invalid PORT value");
        let bind_addr = format!("{}:{}", host, port)
            .parse()
            .expect("Invalid CLUB_BIND_HOST format");

        let data_path = env::var("CLUB_DATA_PATH")
            .unwrap_or_else(|_| "./database.json".to_string())
            .into();

        let public_dir = env::var("CLUB_PUBLIC_DIR")
            .unwrap_or_else(|_| "./public".to_string())
            .into();

        let bootstrap_username =
            env::var("CLUB_BOOTSTRAP_USERNAME").unwrap_or_else(|_| "superadmin".to_string());
        let bootstrap_password = env::var("CLUB_BOOTSTRAP_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_PASSWORD.to_string());

        let session_ttl_hours = env::var("CLUB_SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "12".to_string())
            .parse()
            .expect("Invalid CLUB_SESSION_TTL_HOURS value");

        let cookie_secure = env::var("CLUB_COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let max_upload_bytes = env::var("CLUB_MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (100 * 1024 * 1024).to_string())
            .parse()
            .expect("Invalid CLUB_MAX_UPLOAD_BYTES value");

        let log_level = env::var("CLUB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            bind_addr,
            data_path,
            public_dir,
            bootstrap_username,
            bootstrap_password,
            session_ttl_hours,
            cookie_secure,
            max_upload_bytes,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        for key in [
            "PORT",
            "CLUB_BIND_HOST",
            "CLUB_DATA_PATH",
            "CLUB_PUBLIC_DIR",
            "CLUB_BOOTSTRAP_USERNAME",
            "CLUB_BOOTSTRAP_PASSWORD",
            "CLUB_SESSION_TTL_HOURS",
            "CLUB_COOKIE_SECURE",
            "CLUB_MAX_UPLOAD_BYTES",
            "CLUB_LOG_LEVEL",
        ] {
            env::remove_var(key);
        }

        let config = Config::from_env();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_path, PathBuf::from("./database.json"));
        assert_eq!(config.public_dir, PathBuf::from("./public"));
        assert_eq!(config.bootstrap_username, "superadmin");
        assert_eq!(config.bootstrap_password, DEFAULT_BOOTSTRAP_PASSWORD);
        assert_eq!(config.session_ttl_hours, 12);
        assert!(!config.cookie_secure);
        assert_eq!(config.max_upload_bytes, 104_857_600);
        assert_eq!(config.log_level, "info");
    }
}
