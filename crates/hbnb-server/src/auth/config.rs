// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config
// Decision: Missing JWT secret falls back to a random per-process secret (tokens die on restart)

use std::time::Duration;

const DEFAULT_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Admin user configuration (bootstrapped at startup)
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Admin user created or promoted at startup
    pub admin: Option<AdminConfig>,
    /// Whether to disable signup (registration)
    pub disable_signup: bool,
}

fn parse_flag(value: Option<String>) -> bool {
    value
        .map(|s| s.to_lowercase() == "true" || s == "1")
        .unwrap_or(false)
}

fn random_secret() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let secret = match var("AUTH_JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!(
                    "AUTH_JWT_SECRET not set, using a random secret; tokens will not survive a restart"
                );
                random_secret()
            }
        };

        let access_token_lifetime = var("AUTH_JWT_ACCESS_TOKEN_LIFETIME")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME);

        let admin = match (var("AUTH_ADMIN_EMAIL"), var("AUTH_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminConfig { email, password })
            }
            _ => None,
        };

        Self {
            jwt: JwtConfig {
                secret,
                access_token_lifetime,
            },
            admin,
            disable_signup: parse_flag(var("AUTH_DISABLE_SIGNUP")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup(&[]));

        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(3600));
        assert!(config.admin.is_none());
        assert!(!config.disable_signup);
        // Random 32-byte hex secret
        assert_eq!(config.jwt.secret.len(), 64);
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::from_lookup(lookup(&[]));
        let b = AuthConfig::from_lookup(lookup(&[]));
        assert_ne!(a.jwt.secret, b.jwt.secret);
    }

    #[test]
    fn test_explicit_values() {
        let config = AuthConfig::from_lookup(lookup(&[
            ("AUTH_JWT_SECRET", "s3cret"),
            ("AUTH_JWT_ACCESS_TOKEN_LIFETIME", "120"),
            ("AUTH_ADMIN_EMAIL", "admin@hbnb.io"),
            ("AUTH_ADMIN_PASSWORD", "admin1234"),
            ("AUTH_DISABLE_SIGNUP", "TRUE"),
        ]));

        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(120));
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "admin@hbnb.io");
        assert_eq!(admin.password, "admin1234");
        assert!(config.disable_signup);
    }

    #[test]
    fn test_admin_requires_both_values() {
        let config = AuthConfig::from_lookup(lookup(&[("AUTH_ADMIN_EMAIL", "admin@hbnb.io")]));
        assert!(config.admin.is_none());

        let config = AuthConfig::from_lookup(lookup(&[
            ("AUTH_ADMIN_EMAIL", "admin@hbnb.io"),
            ("AUTH_ADMIN_PASSWORD", ""),
        ]));
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_unparseable_lifetime_falls_back() {
        let config =
            AuthConfig::from_lookup(lookup(&[("AUTH_JWT_ACCESS_TOKEN_LIFETIME", "soon")]));
        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(3600));
    }

    #[test]
    fn test_signup_flag_parsing() {
        assert!(parse_flag(Some("1".to_string())));
        assert!(parse_flag(Some("true".to_string())));
        assert!(!parse_flag(Some("no".to_string())));
        assert!(!parse_flag(None));
    }
}
