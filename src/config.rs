//! Configuration types.

use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the local database file.
    pub db_path: PathBuf,
    /// Port the REST/WS server listens on.
    pub port: u16,
    /// The verification code accepted by the code step.
    pub otp_code: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/heartline.db"),
            port: 8080,
            otp_code: crate::onboarding::draft::DEMO_CODE.to_string(),
        }
    }
}

impl AppConfig {
    /// Build config from environment variables, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let db_path = std::env::var("HEARTLINE_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let port: u16 = std::env::var("HEARTLINE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let otp_code = std::env::var("HEARTLINE_OTP_CODE").unwrap_or(defaults.otp_code);

        Self {
            db_path,
            port,
            otp_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./data/heartline.db"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.otp_code, "123456");
    }

    #[test]
    fn from_env_overrides_and_falls_back() {
        // SAFETY: This is the only test touching HEARTLINE_* vars; no other
        // thread reads them concurrently.
        unsafe {
            std::env::set_var("HEARTLINE_DB_PATH", "/tmp/hl-test.db");
            std::env::set_var("HEARTLINE_PORT", "not a port");
            std::env::set_var("HEARTLINE_OTP_CODE", "654321");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.db_path, PathBuf::from("/tmp/hl-test.db"));
        // Unparseable port falls back to the default.
        assert_eq!(config.port, 8080);
        assert_eq!(config.otp_code, "654321");

        unsafe {
            std::env::remove_var("HEARTLINE_DB_PATH");
            std::env::remove_var("HEARTLINE_PORT");
            std::env::remove_var("HEARTLINE_OTP_CODE");
        }
    }
}
