//! Session module — current-user lifecycle + directory credential checks.
//!
//! # Resources
//!
//! - **AuthUser** — the currently signed-in identity (id, email, name, role)
//! - **UserRecord** — a signup record in the users directory
//! - **AdminRecord** — an admin credential record, managed elsewhere
//!
//! The module owns exactly one persisted value: the session snapshot.
//! The users and admin directories live under their own keys in the same
//! store and are shared with other components; this module reads both and
//! appends to the users directory on signup.
//!
//! # Usage
//!
//! ```ignore
//! use session::{LoginIntent, SessionConfig, SessionService};
//!
//! let svc = SessionService::new(kv, SessionConfig::default())?;
//! if svc.login("a@x.com", "pw", LoginIntent::Individual)? {
//!     let user = svc.current().unwrap();
//! }
//! ```

pub mod model;
pub mod notify;
pub mod service;
pub mod verify;

pub use model::{AdminRecord, AuthUser, LoginIntent, Role, UserRecord};
pub use notify::{ChangeHandler, SubscriptionId};
pub use service::{SessionConfig, SessionError, SessionService};
pub use verify::{PasswordVerifier, PlaintextVerifier};
