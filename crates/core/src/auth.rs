//! Administrator allow-list.
//!
//! Write access to the catalog belongs to exactly one administrator
//! identity. Every mutating catalog operation takes a [`VerifiedAdmin`],
//! which can only be obtained from [`AdminPolicy::authorize`], so the check
//! always happens before any data is touched.

use crate::error::CoreError;

/// An identity asserted by a verified identity-provider token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub email: Option<String>,
}

/// Proof that the caller passed the administrator check.
#[derive(Debug, Clone)]
pub struct VerifiedAdmin {
    identity: Identity,
}

impl VerifiedAdmin {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// Single-administrator policy, keyed on the verified email address.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    admin_email: String,
}

impl AdminPolicy {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into().trim().to_lowercase(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Accept `identity` only if its email matches the allow-listed admin
    /// (case-insensitive). An empty allow-list accepts nobody.
    pub fn authorize(&self, identity: Identity) -> Result<VerifiedAdmin, CoreError> {
        let matches = !self.admin_email.is_empty()
            && identity
                .email
                .as_deref()
                .is_some_and(|email| email.trim().to_lowercase() == self.admin_email);

        if !matches {
            tracing::warn!(subject = %identity.subject, "Rejected non-admin identity");
            return Err(CoreError::Forbidden("Administrator access required".into()));
        }
        Ok(VerifiedAdmin { identity })
    }
}
