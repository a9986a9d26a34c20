//! Error types for vdom-mount.
//!
//! Only host writes are fallible. Creation and tree assembly never fail;
//! property and style writes may be refused by the host and are surfaced
//! through [`DomError`] so callers can contain them per key.

use thiserror::Error;

/// Errors a host can raise while writing into a platform node.
#[derive(Debug, Error)]
pub enum DomError {
    /// The slot exists but refused the value.
    #[error("property `{name}` rejected assignment: {reason}")]
    PropertyRejected {
        /// Property slot name
        name: String,
        /// Host-provided refusal reason
        reason: String,
    },

    /// The slot is present on the node but cannot be written.
    #[error("property `{name}` is read-only")]
    ReadOnly {
        /// Property slot name
        name: String,
    },

    /// A style declaration could not be stored.
    #[error("style `{key}` rejected value: {reason}")]
    StyleRejected {
        /// Style key
        key: String,
        /// Host-provided refusal reason
        reason: String,
    },
}

/// Result type alias for host write operations.
pub type DomResult<T> = Result<T, DomError>;

impl DomError {
    /// Create a property rejection with a reason.
    pub fn property_rejected(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PropertyRejected {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a read-only rejection.
    pub fn read_only(name: impl Into<String>) -> Self {
        Self::ReadOnly { name: name.into() }
    }

    /// Create a style rejection with a reason.
    pub fn style_rejected(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StyleRejected {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
