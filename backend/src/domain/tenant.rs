//! Tenant identity and the per-unit-of-work tenant context.
//!
//! Every database-facing unit of work is opened with exactly one
//! [`TenantContext`], supplied explicitly by the caller. The context is
//! immutable once constructed and is never inferred: an absent identifier
//! must be turned into [`TenantContext::Unbound`] by an explicit choice,
//! never by silently accepting an empty string. The row-level policies in
//! PostgreSQL compare the ambient `app.tenant_id` setting textually, so an
//! empty identifier would be indistinguishable from "no restriction" at the
//! storage layer — construction rejects it up front.

use std::fmt;

use thiserror::Error;

/// Validated tenant identifier.
///
/// Stable, globally unique string assigned at provisioning time. No format
/// or existence checks happen here; the tenant catalog's foreign keys and
/// the upstream identity layer own those.
///
/// # Examples
/// ```
/// use backend::domain::TenantId;
///
/// let id = TenantId::new("acme")?;
/// assert_eq!(id.as_str(), "acme");
/// # Ok::<(), backend::domain::TenantContextError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    /// Construct an identifier after validating it is non-empty and carries
    /// no surrounding whitespace.
    ///
    /// # Errors
    /// Returns [`TenantContextError::EmptyIdentifier`] for empty or
    /// whitespace-only input, and
    /// [`TenantContextError::SurroundingWhitespace`] when the identifier
    /// would not compare equal to its stored form.
    pub fn new(value: impl Into<String>) -> Result<Self, TenantContextError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TenantContextError::EmptyIdentifier);
        }
        if raw.trim() != raw {
            return Err(TenantContextError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    ///
    /// This is the exact text serialized into the session attribute; the
    /// policy layer only understands text-typed comparisons.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Isolation scope of one unit of work.
///
/// `Bound` restricts every query in the session to one tenant's rows.
/// `Unbound` is the explicit absence of a tenant and is legitimate only for
/// global operations such as reading the tenant catalog or seeding: under
/// the row-level policies it means "see nothing tenant-scoped", never "see
/// everything".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TenantContext {
    /// Unit of work owned by a single tenant.
    Bound(TenantId),
    /// Explicitly tenant-free unit of work (catalog reads, provisioning).
    Unbound,
}

impl TenantContext {
    /// Construct a bound context from a caller-supplied identifier.
    ///
    /// # Errors
    /// Fails with [`TenantContextError`] when the identifier is empty or
    /// whitespace-only; it never degrades to [`TenantContext::Unbound`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{TenantContext, TenantContextError};
    ///
    /// let ctx = TenantContext::bound("acme")?;
    /// assert!(matches!(ctx, TenantContext::Bound(_)));
    /// assert_eq!(TenantContext::bound("  "), Err(TenantContextError::EmptyIdentifier));
    /// # Ok::<(), TenantContextError>(())
    /// ```
    pub fn bound(tenant_id: impl Into<String>) -> Result<Self, TenantContextError> {
        TenantId::new(tenant_id).map(Self::Bound)
    }

    /// Construct the explicit no-tenant context.
    pub const fn unbound() -> Self {
        Self::Unbound
    }

    /// The owning tenant, when bound.
    pub const fn tenant_id(&self) -> Option<&TenantId> {
        match self {
            Self::Bound(id) => Some(id),
            Self::Unbound => None,
        }
    }

    /// Whether this context is bound to a tenant.
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

impl fmt::Display for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound(id) => write!(f, "bound({id})"),
            Self::Unbound => f.write_str("unbound"),
        }
    }
}

/// Validation failures raised when constructing a bound tenant context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TenantContextError {
    /// Identifier is empty after trimming whitespace.
    #[error("invalid tenant context: identifier must not be empty")]
    EmptyIdentifier,
    /// Identifier carries leading or trailing whitespace and would not
    /// match its stored form under textual comparison.
    #[error("invalid tenant context: identifier must not have surrounding whitespace")]
    SurroundingWhitespace,
}
