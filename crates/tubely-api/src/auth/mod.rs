//! Bearer-token authentication

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{get_bearer_token, make_jwt, validate_jwt};
pub use middleware::{auth_middleware, AuthState};
pub use models::{AuthUser, JwtClaims};
