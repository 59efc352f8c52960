//! Attribute translators.
//!
//! A translator maps one inventory source record to the attribute map of a
//! target resource. Each concrete translator declares an ordered field list
//! and one derivation rule per field; derivations are pure, and results are
//! memoized per translation pass.
//!
//! # Memoization
//!
//! [`Translator::translate`] treats a falsy cached value as not-yet-computed
//! and derives it again, while [`Translator::translated`] only derives
//! fields with no cached entry at all. A field whose legitimate value is
//! falsy (e.g. empty notes) is therefore re-derived on every
//! [`Translator::translate`] call. Derivations are cheap and pure, so the
//! repeat work is redundancy, not a correctness hazard.

mod desktop;
mod instance;
mod interface;
mod placement;

pub use desktop::{DesktopTranslator, UNNAMED_DESKTOP};
pub use instance::{InstanceTranslator, UNNAMED_INSTANCE};
pub use interface::InterfaceTranslator;
pub use placement::PlacementTranslator;

use serde_json::Value;
use thiserror::Error;

use crate::client::is_falsy;
use crate::resource::Attributes;

/// Errors raised while deriving attribute values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// A status-dependent field was requested without both status ids.
    #[error("Both an active_status_id and an inactive_status_id must be provided")]
    MissingStatusOptions,

    /// The requested field is not part of the translator's field list.
    #[error("no derivation rule for field '{field}'")]
    UnknownField {
        /// The unknown field name.
        field: String,
    },
}

/// Option values shared by translators.
///
/// Status-dependent fields pick between the two configured status ids;
/// requesting such a field with either id missing fails with
/// [`TranslationError::MissingStatusOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Status id assigned to running/available records.
    pub active_status_id: Option<String>,
    /// Status id assigned to all other records.
    pub inactive_status_id: Option<String>,
}

impl TranslatorOptions {
    /// Creates options with both status ids set.
    #[must_use]
    pub fn with_status_ids(active: impl Into<String>, inactive: impl Into<String>) -> Self {
        Self {
            active_status_id: Some(active.into()),
            inactive_status_id: Some(inactive.into()),
        }
    }

    /// Returns both status ids.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::MissingStatusOptions`] if either id is
    /// unset.
    pub fn status_ids(&self) -> Result<(&str, &str), TranslationError> {
        match (&self.active_status_id, &self.inactive_status_id) {
            (Some(active), Some(inactive)) => Ok((active, inactive)),
            _ => Err(TranslationError::MissingStatusOptions),
        }
    }
}

/// A source-record-to-attributes translator with per-field memoization.
pub trait Translator {
    /// The ordered attribute names this translator produces.
    const FIELDS: &'static [&'static str];

    /// Computes the value for one field. Pure; never touches the cache.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the field is unknown or a required
    /// option is missing.
    fn derive(&self, field: &str) -> Result<Value, TranslationError>;

    /// Returns the memoization cache for this pass.
    fn cache(&mut self) -> &mut Attributes;

    /// Returns the memoized value for `field`, deriving it first when the
    /// cache holds nothing, or holds a falsy value, for that field.
    ///
    /// # Errors
    ///
    /// Propagates [`Translator::derive`] failures.
    fn translate(&mut self, field: &str) -> Result<Value, TranslationError> {
        if let Some(value) = self.cache().get(field) {
            if !is_falsy(value) {
                return Ok(value.clone());
            }
        }
        let value = self.derive(field)?;
        self.cache().insert(field.to_string(), value.clone());
        Ok(value)
    }

    /// Derives every not-yet-cached field and returns the full attribute
    /// map.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Translator::derive`] failure.
    fn translated(&mut self) -> Result<Attributes, TranslationError> {
        for field in Self::FIELDS {
            if !self.cache().contains_key(*field) {
                self.translate(field)?;
            }
        }
        Ok(self.cache().clone())
    }
}

/// Joins `key: \tvalue` lines into a free-text notes block. Missing values
/// render as empty strings.
#[must_use]
pub fn format_notes(entries: &[(&str, Option<String>)]) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{key}: \t{}", value.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}
