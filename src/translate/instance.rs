//! Compute-instance translator.

use serde_json::Value;

use crate::resource::Attributes;
use crate::source::ComputeInstance;
use crate::translate::{format_notes, TranslationError, Translator, TranslatorOptions};

/// Placeholder name for instances with no usable name source.
pub const UNNAMED_INSTANCE: &str = "[Unnamed Instance]";

/// Translates a [`ComputeInstance`] into configuration attributes.
///
/// # Example
///
/// ```rust
/// use asset_sync::source::ComputeInstance;
/// use asset_sync::translate::{InstanceTranslator, Translator, TranslatorOptions};
///
/// # fn run(instance: &ComputeInstance) {
/// let mut translator =
///     InstanceTranslator::new(instance, TranslatorOptions::with_status_ids("1", "2"));
/// let attributes = translator.translated().unwrap();
/// assert!(attributes.contains_key("serial_number"));
/// # }
/// ```
#[derive(Debug)]
pub struct InstanceTranslator<'a> {
    instance: &'a ComputeInstance,
    options: TranslatorOptions,
    cache: Attributes,
}

impl<'a> InstanceTranslator<'a> {
    /// Creates a translator for one instance.
    #[must_use]
    pub fn new(instance: &'a ComputeInstance, options: TranslatorOptions) -> Self {
        Self {
            instance,
            options,
            cache: Attributes::new(),
        }
    }

    /// Name resolution falls through: "Name" tag, key pair name, instance
    /// id, then the placeholder.
    fn name(&self) -> Value {
        for tag in &self.instance.tags {
            if tag.key == "Name" {
                if let Some(value) = tag.value.as_deref().filter(|v| !v.is_empty()) {
                    return Value::String(value.to_string());
                }
            }
        }
        if let Some(key_name) = self.instance.key_name.as_deref().filter(|k| !k.is_empty()) {
            return Value::String(key_name.to_string());
        }
        if !self.instance.instance_id.is_empty() {
            return Value::String(self.instance.instance_id.clone());
        }
        Value::String(UNNAMED_INSTANCE.to_string())
    }

    fn serial_number(&self) -> Value {
        Value::String(self.instance.instance_id.clone())
    }

    fn purchased_at(&self) -> Value {
        Value::String(self.instance.launch_time.format("%Y-%m-%d").to_string())
    }

    fn configuration_status_id(&self) -> Result<Value, TranslationError> {
        let (active, inactive) = self.options.status_ids()?;
        if self.instance.state == "running" {
            Ok(Value::String(active.to_string()))
        } else {
            Ok(Value::String(inactive.to_string()))
        }
    }

    fn mac_address(&self) -> Value {
        self.instance
            .primary_interface()
            .and_then(|interface| interface.mac_address.clone())
            .map_or(Value::Null, Value::String)
    }

    fn notes(&self) -> Value {
        let security_groups = self.instance.security_groups.join(", ");
        let availability_zone = self
            .instance
            .placement
            .as_ref()
            .and_then(|placement| placement.availability_zone.clone());
        Value::String(format_notes(&[
            ("key_name", self.instance.key_name.clone()),
            ("security_groups", Some(security_groups)),
            ("instance_type", self.instance.instance_type.clone()),
            ("public_dns_name", self.instance.public_dns_name.clone()),
            ("private_dns_name", self.instance.private_dns_name.clone()),
            ("image_id", self.instance.image_id.clone()),
            ("availability_zone", availability_zone),
        ]))
    }
}

impl Translator for InstanceTranslator<'_> {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "serial_number",
        "purchased_at",
        "configuration_status_id",
        "mac_address",
        "notes",
    ];

    fn derive(&self, field: &str) -> Result<Value, TranslationError> {
        match field {
            "name" => Ok(self.name()),
            "serial_number" => Ok(self.serial_number()),
            "purchased_at" => Ok(self.purchased_at()),
            "configuration_status_id" => self.configuration_status_id(),
            "mac_address" => Ok(self.mac_address()),
            "notes" => Ok(self.notes()),
            other => Err(TranslationError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    fn cache(&mut self) -> &mut Attributes {
        &mut self.cache
    }
}
