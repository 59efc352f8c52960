//! Resource path resolution.
//!
//! Builds the URL path for a resource kind, optionally nested under a parent
//! resource: `/{kind}`, `/{kind}/{id}`,
//! `/{parent}/{parent_id}/relationships/{kind}`, or
//! `/{parent}/{parent_id}/relationships/{kind}/{id}`.

use thiserror::Error;

/// Error produced by an unresolvable kind/id/parent combination.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A parent id was supplied without a parent kind.
    #[error("a parent id was provided without a parent kind")]
    MissingParentKind,

    /// A parent kind was supplied without a persisted id.
    #[error("parent {kind} must be persisted before it can scope a request")]
    UnpersistedParent {
        /// The parent resource kind.
        kind: String,
    },
}

/// Resolves the request path for a resource kind.
///
/// # Errors
///
/// Returns [`PathError`] if a parent is half-specified: a kind without an id
/// or an id without a kind.
///
/// # Example
///
/// ```rust
/// use asset_sync::resource::resolve;
///
/// assert_eq!(resolve("configurations", None, None, None).unwrap(), "/configurations");
/// assert_eq!(
///     resolve("configurations", Some("5"), Some("organizations"), Some("9")).unwrap(),
///     "/organizations/9/relationships/configurations/5",
/// );
/// ```
pub fn resolve(
    kind: &str,
    id: Option<&str>,
    parent_kind: Option<&str>,
    parent_id: Option<&str>,
) -> Result<String, PathError> {
    let mut path = match (parent_kind, parent_id) {
        (Some(parent_kind), Some(parent_id)) => {
            format!("/{parent_kind}/{parent_id}/relationships/{kind}")
        }
        (Some(parent_kind), None) => {
            return Err(PathError::UnpersistedParent {
                kind: parent_kind.to_string(),
            })
        }
        (None, Some(_)) => return Err(PathError::MissingParentKind),
        (None, None) => format!("/{kind}"),
    };
    if let Some(id) = id {
        path.push('/');
        path.push_str(id);
    }
    Ok(path)
}
