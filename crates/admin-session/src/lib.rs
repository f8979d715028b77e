//! Session handling for the admin console.
//!
//! Auth state has one owner, [`SessionContext`], which is passed to the
//! views that need it. Token persistence sits behind [`TokenStore`] so the
//! lifecycle can be exercised without browser storage.

mod error;
mod guard;
mod session;
mod store;
mod token;

pub use error::SessionError;
pub use guard::{Access, GuardDecision};
pub use session::{LogoutOutcome, SessionContext};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{AuthToken, LoginRequest, LoginResponse, TokenKind};
