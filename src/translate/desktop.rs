//! Virtual-desktop translator.

use serde_json::Value;

use crate::resource::Attributes;
use crate::source::VirtualDesktop;
use crate::translate::{format_notes, TranslationError, Translator, TranslatorOptions};

/// Placeholder name for desktops with no identifier.
pub const UNNAMED_DESKTOP: &str = "Unnamed Desktop";

/// Translates a [`VirtualDesktop`] into configuration attributes plus the
/// `ip_address`/`ip_notes` pair consumed by the interface sync.
#[derive(Debug)]
pub struct DesktopTranslator<'a> {
    desktop: &'a VirtualDesktop,
    options: TranslatorOptions,
    cache: Attributes,
}

impl<'a> DesktopTranslator<'a> {
    /// Creates a translator for one desktop.
    #[must_use]
    pub fn new(desktop: &'a VirtualDesktop, options: TranslatorOptions) -> Self {
        Self {
            desktop,
            options,
            cache: Attributes::new(),
        }
    }

    fn name(&self) -> Value {
        if self.desktop.desktop_id.is_empty() {
            Value::String(UNNAMED_DESKTOP.to_string())
        } else {
            Value::String(self.desktop.desktop_id.clone())
        }
    }

    fn configuration_status_id(&self) -> Result<Value, TranslationError> {
        let (active, inactive) = self.options.status_ids()?;
        if self.desktop.state.eq_ignore_ascii_case("available") {
            Ok(Value::String(active.to_string()))
        } else {
            Ok(Value::String(inactive.to_string()))
        }
    }

    fn notes(&self) -> Value {
        let properties = &self.desktop.properties;
        Value::String(format_notes(&[
            ("desktop_id", Some(self.desktop.desktop_id.clone())),
            ("computer_name", self.desktop.computer_name.clone()),
            ("compute_type", properties.compute_type_name.clone()),
            ("bundle_id", self.desktop.bundle_id.clone()),
            ("subnet_id", self.desktop.subnet_id.clone()),
            ("directory_id", self.desktop.directory_id.clone()),
            ("error_code", self.desktop.error_code.clone()),
            ("error_message", self.desktop.error_message.clone()),
            (
                "root_volume_size_gib",
                properties.root_volume_size_gib.map(|v| v.to_string()),
            ),
            ("running_mode", properties.running_mode.clone()),
            (
                "running_mode_auto_stop_timeout_in_min",
                properties
                    .running_mode_auto_stop_timeout_in_minutes
                    .map(|v| v.to_string()),
            ),
            (
                "user_volume_size_gib",
                properties.user_volume_size_gib.map(|v| v.to_string()),
            ),
        ]))
    }

    fn ip_address(&self) -> Value {
        Value::String(self.desktop.ip_address.clone().unwrap_or_default())
    }

    fn ip_notes(&self) -> Value {
        Value::String(format_notes(&[(
            "subnet_id",
            self.desktop.subnet_id.clone(),
        )]))
    }
}

impl Translator for DesktopTranslator<'_> {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "configuration_status_id",
        "notes",
        "ip_address",
        "ip_notes",
    ];

    fn derive(&self, field: &str) -> Result<Value, TranslationError> {
        match field {
            "name" => Ok(self.name()),
            "configuration_status_id" => self.configuration_status_id(),
            "notes" => Ok(self.notes()),
            "ip_address" => Ok(self.ip_address()),
            "ip_notes" => Ok(self.ip_notes()),
            other => Err(TranslationError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    fn cache(&mut self) -> &mut Attributes {
        &mut self.cache
    }
}
