//! Authentication
//!
//! JWT tokens, Argon2 password hashing, the auth middleware and the
//! observable session state.

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use session::SessionHub;
