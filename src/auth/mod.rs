pub mod claims;
pub mod guard;
pub mod session;

pub use claims::{decode_claims, role_from_token, ClaimsError};
pub use guard::{decide, RouteDecision};
pub use session::{SessionError, SessionManager, SessionPhase};
