// Server configuration loaded from environment variables
// Decision: No DATABASE_URL means dev mode with the in-memory store

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL URL; `None` selects in-memory storage
    pub database_url: Option<String>,
    pub bind_addr: String,
    /// Prefix for all API routes, e.g. "/api/v1". Empty mounts them at the root.
    pub api_prefix: String,
    /// Origins allowed by CORS; empty disables the CORS layer
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_prefix = var("API_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            database_url: var("DATABASE_URL").filter(|s| !s.is_empty()),
            bind_addr: var("BIND_ADDR")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            api_prefix,
            cors_allowed_origins,
        }
    }
}

/// "/api/v1/" and "api/v1" both become "/api/v1"; "/" becomes ""
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);

        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.api_prefix, "/api/v1");
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_explicit_values() {
        let config = ServerConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/hbnb".to_string()),
            "BIND_ADDR" => Some("127.0.0.1:8080".to_string()),
            "API_PREFIX" => Some("v2/".to_string()),
            "CORS_ALLOWED_ORIGINS" => Some("https://a.example, ,https://b.example".to_string()),
            _ => None,
        });

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/hbnb")
        );
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/v2");
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/api/v1/"), "/api/v1");
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }
}
