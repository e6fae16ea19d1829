pub mod middleware;
pub mod policy;
pub mod session;
pub mod session_service;

pub use middleware::{CurrentSession, RequireLogin};
pub use policy::{check_credentials, requires_login};
pub use session::{SessionClaims, SessionData};
pub use session_service::{SessionService, SESSION_COOKIE};
