//! Placement translator.

use serde_json::Value;

use crate::resource::Attributes;
use crate::source::Placement;
use crate::translate::{TranslationError, Translator};

/// Translates a [`Placement`] into location attributes.
#[derive(Debug)]
pub struct PlacementTranslator<'a> {
    placement: &'a Placement,
    cache: Attributes,
}

impl<'a> PlacementTranslator<'a> {
    /// Creates a translator for one placement.
    #[must_use]
    pub fn new(placement: &'a Placement) -> Self {
        Self {
            placement,
            cache: Attributes::new(),
        }
    }
}

impl Translator for PlacementTranslator<'_> {
    const FIELDS: &'static [&'static str] = &["name"];

    fn derive(&self, field: &str) -> Result<Value, TranslationError> {
        match field {
            "name" => Ok(self
                .placement
                .availability_zone
                .clone()
                .map_or(Value::Null, Value::String)),
            other => Err(TranslationError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    fn cache(&mut self) -> &mut Attributes {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_is_availability_zone() {
        let placement = Placement {
            availability_zone: Some("us-east-1a".to_string()),
        };
        let mut translator = PlacementTranslator::new(&placement);
        assert_eq!(translator.translate("name").unwrap(), json!("us-east-1a"));
    }

    #[test]
    fn test_name_is_null_without_zone() {
        let placement = Placement::default();
        let mut translator = PlacementTranslator::new(&placement);
        assert_eq!(translator.translate("name").unwrap(), Value::Null);
    }
}
