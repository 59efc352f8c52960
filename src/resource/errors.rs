//! Resource-level error types.
//!
//! These extend the transport taxonomy with resource semantics: lookup
//! misses, unusable filters, and lifecycle precondition violations. All of
//! them surface synchronously to the immediate caller; nothing is retried.

use crate::client::TransportError;
use crate::resource::path::PathError;
use thiserror::Error;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A lookup by id missed (HTTP 404), wrapping the transport failure.
    #[error("{kind} with id {id} not found")]
    NotFound {
        /// The resource kind that was requested.
        kind: String,
        /// The id that was requested.
        id: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// A filter operation was attempted with no usable criteria: the filter
    /// set was empty or every supplied value was falsy. Rejected before any
    /// network call, since the parameter encoding would silently drop every
    /// value and issue an unfiltered request.
    #[error("at least one non-empty filter value must be provided")]
    EmptyFilter,

    /// `create` was called on an entity that already has an id.
    #[error("cannot create a {kind} that already has an id")]
    AlreadyPersisted {
        /// The entity's kind.
        kind: String,
    },

    /// `update` was called on an entity that has no id yet.
    #[error("cannot update a {kind} without an id")]
    NotPersisted {
        /// The entity's kind.
        kind: String,
    },

    /// A locally-set attribute is not declared for the entity's kind.
    #[error("attribute '{attribute}' is not declared for {kind}")]
    UnknownAttribute {
        /// The entity's kind.
        kind: String,
        /// The undeclared attribute name.
        attribute: String,
    },

    /// The kind/id/parent combination does not resolve to a path.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A transport-level error occurred.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
