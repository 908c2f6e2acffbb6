// Authentication module
// Decision: Bearer JWTs (HS256) issued by /auth/login and /auth/register
// Decision: Authorization rules live in `guard`, applied by handlers after loading the target

pub mod config;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::AuthConfig;
pub use jwt::JwtService;
pub use middleware::{AdminUser, AuthError, AuthState, AuthUser, OptionalAuthUser};
