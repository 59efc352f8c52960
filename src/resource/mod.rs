//! Generic resource layer.
//!
//! This module provides the polymorphic [`Entity`] type and its supporting
//! infrastructure:
//!
//! - **[`Entity`]**: one remote resource instance of any [`Kind`], with the
//!   full query surface (get/filter/find/find_by/first_or_create/
//!   first_or_initialize) and lifecycle operations (create/update/save)
//! - **[`Kind`]**: the wire-level type discriminator with declared writable
//!   attribute sets for known kinds
//! - **[`resolve`]**: pure path resolution, including parent-scoped
//!   `/{parent}/{parent_id}/relationships/{kind}` nesting
//! - **[`ResourceError`] / [`PathError`]**: resource-level failure taxonomy

mod entity;
mod errors;
mod kind;
mod path;

pub use entity::{Attributes, Entity, Relationships};
pub use errors::ResourceError;
pub use kind::Kind;
pub use path::{resolve, PathError};
