//! Network-interface translator.

use serde_json::Value;

use crate::resource::Attributes;
use crate::source::NetworkInterface;
use crate::translate::{format_notes, TranslationError, Translator};

/// Translates a [`NetworkInterface`] into configuration-interface
/// attributes.
#[derive(Debug)]
pub struct InterfaceTranslator<'a> {
    interface: &'a NetworkInterface,
    cache: Attributes,
}

impl<'a> InterfaceTranslator<'a> {
    /// Creates a translator for one interface.
    #[must_use]
    pub fn new(interface: &'a NetworkInterface) -> Self {
        Self {
            interface,
            cache: Attributes::new(),
        }
    }
}

impl Translator for InterfaceTranslator<'_> {
    const FIELDS: &'static [&'static str] = &["name", "ip_address", "notes"];

    fn derive(&self, field: &str) -> Result<Value, TranslationError> {
        match field {
            "name" => Ok(Value::String(self.interface.interface_id.clone())),
            "ip_address" => Ok(self
                .interface
                .private_ip_address
                .clone()
                .map_or(Value::Null, Value::String)),
            "notes" => Ok(Value::String(format_notes(&[
                ("vpc_id", self.interface.vpc_id.clone()),
                ("subnet_id", self.interface.subnet_id.clone()),
            ]))),
            other => Err(TranslationError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    fn cache(&mut self) -> &mut Attributes {
        &mut self.cache
    }
}
