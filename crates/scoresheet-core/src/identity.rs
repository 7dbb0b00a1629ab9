//! Judge identity.
//!
//! The form refuses to save until a provider yields a non-empty identity;
//! "not ready yet" is a normal transient state, not an error.

use uuid::Uuid;

/// Supplies the judge identity used as the sub-record key within a
/// submission's document.
pub trait IdentityProvider: Send + Sync {
    /// Current identity, or `None` while authentication has not settled.
    fn judge_identity(&self) -> Option<String>;
}

/// Constant identity for single-evaluator deployments.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    id: String,
}

impl FixedIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl IdentityProvider for FixedIdentity {
    fn judge_identity(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

/// Per-session anonymous identity for multi-judge deployments. The id is
/// minted once at construction and stable for the life of the session.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    id: String,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self {
            id: format!("anon-{}", Uuid::new_v4()),
        }
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for SessionIdentity {
    fn judge_identity(&self) -> Option<String> {
        Some(self.id.clone())
    }
}
