//! Application configuration
//!
//! Server settings read once from environment variables at startup.

use std::env;

/// Port used when `PORT` is unset or not a valid port number
pub const DEFAULT_PORT: u16 = 3000;

/// Host used when `HOST` is unset
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: DEFAULT_PORT,
                host: DEFAULT_HOST.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.trim().parse().ok())
                    .unwrap_or(DEFAULT_PORT),
                host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("PORT");
        env::remove_var("HOST");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config, Config::default());
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    #[serial]
    fn test_port_and_host_from_env() {
        clear_env();
        env::set_var("PORT", "8081");
        env::set_var("HOST", "127.0.0.1");
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        clear_env();
        env::set_var("PORT", "not-a-port");
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.server.port, DEFAULT_PORT);
    }
}
