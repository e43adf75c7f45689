//! Service configuration

use anyhow::Result;

/// Default server-side token lifetime: 3 days, matching the cookie max-age
/// the previous generation of clients used.
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 259_200;

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Server-side session token lifetime in seconds
    pub token_ttl_seconds: u64,
    /// When true, the leaderboard only includes accepted friendships.
    /// When false it includes any user connected by a friend-request row
    /// in either direction, accepted or not.
    pub leaderboard_accepted_only: bool,
}

impl ServiceConfig {
    /// Create a new ServiceConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `AUTH_TOKEN_TTL_SECONDS`: token lifetime in seconds (default: 259200)
    /// - `LEADERBOARD_ACCEPTED_ONLY`: restrict the leaderboard to accepted
    ///   friendships (default: false)
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let token_ttl_seconds = std::env::var("AUTH_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);

        let leaderboard_accepted_only = std::env::var("LEADERBOARD_ACCEPTED_ONLY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);

        Ok(ServiceConfig {
            bind_addr,
            token_ttl_seconds,
            leaderboard_accepted_only,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_service_config_defaults() {
        unsafe {
            std::env::remove_var("BIND_ADDR");
            std::env::remove_var("AUTH_TOKEN_TTL_SECONDS");
            std::env::remove_var("LEADERBOARD_ACCEPTED_ONLY");
        }

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.token_ttl_seconds, 259_200);
        assert!(!config.leaderboard_accepted_only);
    }

    #[test]
    #[serial]
    fn test_service_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("BIND_ADDR", "127.0.0.1:8080");
            std::env::set_var("AUTH_TOKEN_TTL_SECONDS", "3600");
            std::env::set_var("LEADERBOARD_ACCEPTED_ONLY", "true");
        }

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.token_ttl_seconds, 3600);
        assert!(config.leaderboard_accepted_only);

        unsafe {
            std::env::remove_var("BIND_ADDR");
            std::env::remove_var("AUTH_TOKEN_TTL_SECONDS");
            std::env::remove_var("LEADERBOARD_ACCEPTED_ONLY");
        }
    }
}
