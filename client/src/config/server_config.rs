use common::config::{Validate, validate_http_url};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOCKET_PATH: &str = "/ws/game/";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub base_url: String,
    #[serde(default = "default_socket_path")]
    pub socket_path: String,
}

fn default_socket_path() -> String {
    DEFAULT_SOCKET_PATH.to_string()
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("server.base_url", &self.base_url)?;
        if !self.socket_path.starts_with('/') {
            return Err(format!(
                "server.socket_path must start with '/', got '{}'",
                self.socket_path
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            socket_path: default_socket_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_path_must_be_absolute() {
        let config = ServerConfig {
            socket_path: "ws/game/".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ServerConfig::default().validate().is_ok());
    }
}
