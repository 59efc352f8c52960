//! JSON:API envelope types.
//!
//! Responses arrive wrapped in an envelope: a `data` member holding either a
//! single resource object or an array of them, plus optional `meta` and
//! `links` members that drive collection pagination.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One resource object as it appears on the wire: a `type` discriminator, an
/// optional server-assigned `id`, and the attribute map.
///
/// Ids are accepted as either JSON strings or numbers and normalized to
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// The resource type discriminator (e.g., "configurations").
    #[serde(rename = "type")]
    pub kind: String,
    /// The server-assigned identity; `None` until the resource is persisted.
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// The resource attributes. Unknown server-added attributes are kept.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("invalid id value: {other}"))),
    }
}

/// Normalized response data: a single resource object or a fully-paginated
/// collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A single-object `data` member.
    One(ResourceObject),
    /// A collection `data` member, with all pages concatenated in page order.
    Many(Vec<ResourceObject>),
}

impl Document {
    /// Returns the resource objects as a list, treating a single object as a
    /// one-element collection.
    #[must_use]
    pub fn into_many(self) -> Vec<ResourceObject> {
        match self {
            Self::One(object) => vec![object],
            Self::Many(objects) => objects,
        }
    }

    /// Returns the single resource object, or `None` for a collection.
    #[must_use]
    pub fn into_one(self) -> Option<ResourceObject> {
        match self {
            Self::One(object) => Some(object),
            Self::Many(_) => None,
        }
    }
}

/// The raw response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope {
    pub data: EnvelopeData,
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum EnvelopeData {
    Many(Vec<ResourceObject>),
    One(ResourceObject),
}

/// The `meta` member; only the pagination flag is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Meta {
    /// Boolean-ish: any truthy value signals a further page.
    #[serde(rename = "next-page", default)]
    pub next_page: Option<Value>,
}

impl Meta {
    pub(crate) fn has_next_page(&self) -> bool {
        self.next_page
            .as_ref()
            .is_some_and(|value| !super::params::is_falsy(value))
    }
}

/// The `links` member; only the `next` URL is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

/// Wraps a request payload under the top-level `data` key.
pub(crate) fn data_wrap(payload: Value) -> Value {
    let mut wrapped = Map::new();
    wrapped.insert("data".to_string(), payload);
    Value::Object(wrapped)
}
