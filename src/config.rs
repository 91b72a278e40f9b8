use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

/// Process-level settings read once at startup. Component-level settings
/// (store credentials, LLM credentials, cache directory) live with their
/// components' own `from_env` constructors.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    /// Directory for the daily-rolling log file; `None` disables file logging.
    pub file_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env_parsed("HOST").unwrap_or_else(|| IpAddr::from([0, 0, 0, 0]));
        let port = env_parsed("PORT").unwrap_or(DEFAULT_PORT);

        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let file_dir = match std::env::var("ENABLE_FILE_LOGS").as_deref() {
            Ok("true") | Ok("1") => Some(PathBuf::from(
                std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
            )),
            _ => None,
        };

        Self {
            host,
            port,
            log: LogConfig { level, file_dir },
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = ServerConfig {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            log: LogConfig {
                level: "info".into(),
                file_dir: None,
            },
        };
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
    }
}
