pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::{AccessClaims, RefreshClaims};
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser, CurrentUser};
