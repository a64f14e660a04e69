//! MedVault identity seam
//!
//! The identity provider is an external collaborator; this crate defines the
//! trait the flows program against, the session gate that keeps
//! unauthenticated callers out of protected flows, and an in-memory provider
//! for local runs and tests.

pub mod error;
pub mod memory;
pub mod provider;
pub mod session;

pub use error::AuthError;
pub use memory::MemoryAuthProvider;
pub use provider::{AuthProvider, AuthUser, SessionChange};
pub use session::{SessionContext, SessionGate};
