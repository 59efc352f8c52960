//! The generic resource entity.
//!
//! [`Entity`] models one remote resource instance of any kind: a
//! [`Kind`] discriminator, an optional server-assigned id, and a dynamic
//! attribute map. The same type serves organizations, configurations,
//! interfaces, locations, statuses, and types; no per-kind struct exists.
//!
//! # Lifecycle
//!
//! An entity is constructed in memory (unpersisted), optionally `create`d
//! (the server assigns its id), and from then on may be `update`d any number
//! of times. There is no delete operation. After every successful write the
//! entity reloads id, kind, and attributes wholesale from the response body:
//! the server is authoritative, and locally-set attributes the server did
//! not echo back are replaced, not merged.

use serde_json::{Map, Value};

use crate::client::{is_falsy, Document, ResourceObject, Transport, TransportError};
use crate::resource::kind::Kind;
use crate::resource::path::{self, PathError};
use crate::resource::ResourceError;

/// The dynamic attribute map carried by every [`Entity`].
pub type Attributes = Map<String, Value>;

/// A transient named association from one entity to a list of related
/// entities.
///
/// Relationships exist only at payload-construction time: they are rendered
/// into a create request body and never persisted as their own addressable
/// structure.
///
/// # Example
///
/// ```rust
/// use asset_sync::{Entity, Relationships};
///
/// let interface = Entity::new("configuration_interfaces");
/// let relationships =
///     Relationships::new().with("configuration_interfaces", vec![interface]);
/// assert!(!relationships.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships(Vec<(String, Vec<Entity>)>);

impl Relationships {
    /// Creates an empty relationship set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named relationship, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, related: Vec<Entity>) -> Self {
        self.insert(name, related);
        self
    }

    /// Adds a named relationship.
    pub fn insert(&mut self, name: impl Into<String>, related: Vec<Entity>) {
        self.0.push((name.into(), related));
    }

    /// Returns whether the set contains no relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders each relationship as a list of item payloads keyed by name.
    fn render(&self) -> Map<String, Value> {
        let mut rendered = Map::new();
        for (name, related) in &self.0 {
            let items = related.iter().map(Entity::payload).collect();
            rendered.insert(name.clone(), Value::Array(items));
        }
        rendered
    }
}

/// The generic client-side representation of one remote resource instance.
///
/// Two entities are equal iff kind, id, and attributes are all equal.
/// Entities are value-like and independently owned; there is no shared
/// entity graph.
///
/// # Example
///
/// ```rust
/// use asset_sync::Entity;
/// use serde_json::json;
///
/// let mut location = Entity::new("locations");
/// location.set_attr("name", "us-east-1a").unwrap();
/// assert!(!location.is_persisted());
/// assert_eq!(location.attr("name"), Some(&json!("us-east-1a")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: Kind,
    id: Option<String>,
    attributes: Attributes,
}

impl Entity {
    /// Creates a new unpersisted entity with no attributes.
    #[must_use]
    pub fn new(kind: impl Into<Kind>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            attributes: Attributes::new(),
        }
    }

    /// Creates a new unpersisted entity with the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] if an attribute is not
    /// declared for the kind.
    pub fn with_attributes(
        kind: impl Into<Kind>,
        attributes: Attributes,
    ) -> Result<Self, ResourceError> {
        let mut entity = Self::new(kind);
        entity.set_attributes(attributes)?;
        Ok(entity)
    }

    /// Returns the entity's kind.
    #[must_use]
    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Returns the server-assigned id, if the entity is persisted.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns whether the entity has been persisted by the server.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the attribute map.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the value of one attribute, or `None` if it is not set.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets the value of one attribute. Local mutation only; no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] if the attribute is not
    /// declared for this entity's kind.
    pub fn set_attr(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ResourceError> {
        let name = name.into();
        if !self.kind.declares(&name) {
            return Err(ResourceError::UnknownAttribute {
                kind: self.kind.to_string(),
                attribute: name,
            });
        }
        self.attributes.insert(name, value.into());
        Ok(self)
    }

    /// Sets multiple attributes. Local mutation only; no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] on the first attribute
    /// that is not declared for this entity's kind.
    pub fn set_attributes(&mut self, attributes: Attributes) -> Result<&mut Self, ResourceError> {
        for (name, value) in attributes {
            self.set_attr(name, value)?;
        }
        Ok(self)
    }

    /// Renders the entity as a request payload: `type`, `attributes`, and
    /// `id` when persisted.
    #[must_use]
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        if let Some(id) = &self.id {
            payload.insert("id".to_string(), Value::String(id.clone()));
        }
        payload.insert(
            "attributes".to_string(),
            Value::Object(self.attributes.clone()),
        );
        Value::Object(payload)
    }

    /// Lists all entities of `kind`, scoped to `parent` when given.
    ///
    /// Issues one GET request plus any pagination follow-ups.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] on path or transport failure.
    pub async fn get(
        transport: &Transport,
        kind: impl Into<Kind>,
        parent: Option<&Self>,
    ) -> Result<Vec<Self>, ResourceError> {
        let kind = kind.into();
        let path = Self::scoped_path(&kind, None, parent)?;
        let document = transport.get(&path, None).await?;
        Ok(Self::load_all(document))
    }

    /// Lists all entities of `kind` matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyFilter`], before any network call, if
    /// the filter set is empty or every supplied value is falsy.
    pub async fn filter(
        transport: &Transport,
        kind: impl Into<Kind>,
        parent: Option<&Self>,
        filters: &Attributes,
    ) -> Result<Vec<Self>, ResourceError> {
        if filters.values().all(is_falsy) {
            return Err(ResourceError::EmptyFilter);
        }
        let kind = kind.into();
        let path = Self::scoped_path(&kind, None, parent)?;
        let mut params = Map::new();
        params.insert("filter".to_string(), Value::Object(filters.clone()));
        let document = transport.get(&path, Some(&params)).await?;
        Ok(Self::load_all(document))
    }

    /// Fetches exactly one entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`], wrapping the transport failure,
    /// when the service answers 404. Other transport failures propagate
    /// unchanged.
    pub async fn find(
        transport: &Transport,
        kind: impl Into<Kind>,
        id: &str,
        parent: Option<&Self>,
    ) -> Result<Self, ResourceError> {
        let kind = kind.into();
        let path = Self::scoped_path(&kind, Some(id), parent)?;
        match transport.get(&path, None).await {
            Ok(Document::One(object)) => Ok(Self::from_object(object)),
            Ok(Document::Many(_)) => Err(TransportError::UnexpectedCollection.into()),
            Err(error) if error.status() == Some(404) => Err(ResourceError::NotFound {
                kind: kind.to_string(),
                id: id.to_string(),
                source: error,
            }),
            Err(error) => Err(error.into()),
        }
    }

    /// Returns the first entity matching `filters`, or `None` when nothing
    /// matches.
    ///
    /// The first element of the remote listing is taken as-is; no additional
    /// ordering is imposed on top of the service's own.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyFilter`] under the same conditions as
    /// [`Entity::filter`].
    pub async fn find_by(
        transport: &Transport,
        kind: impl Into<Kind>,
        parent: Option<&Self>,
        filters: &Attributes,
    ) -> Result<Option<Self>, ResourceError> {
        let mut matches = Self::filter(transport, kind, parent, filters).await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.swap_remove(0)))
        }
    }

    /// Finds the first entity matching `attributes`, creating one with
    /// exactly those attributes when nothing matches.
    ///
    /// On a hit the existing entity is returned unmodified: one GET, no
    /// write. On a miss: one GET and one POST. The parent scopes the lookup
    /// only; creation posts to the kind's top-level path.
    ///
    /// This operation is not atomic. Two concurrent callers can both miss
    /// the lookup and both issue a create, yielding duplicate remote
    /// entities; the window is bounded by the two requests. Callers that
    /// need at-most-one creation per logical key must serialize calls
    /// through a coordinator, as [`LocationCache`](crate::sync::LocationCache)
    /// does for locations.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyFilter`] when `attributes` provides no
    /// usable lookup criteria, or any path/transport failure.
    pub async fn first_or_create(
        transport: &Transport,
        kind: impl Into<Kind>,
        parent: Option<&Self>,
        attributes: Attributes,
    ) -> Result<Self, ResourceError> {
        let kind = kind.into();
        if let Some(existing) = Self::find_by(transport, kind.clone(), parent, &attributes).await? {
            return Ok(existing);
        }
        let mut entity = Self::with_attributes(kind, attributes)?;
        entity.create(transport, None, Relationships::new()).await?;
        Ok(entity)
    }

    /// Like [`Entity::first_or_create`], but returns an unpersisted entity
    /// on a miss instead of writing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyFilter`] when `attributes` provides no
    /// usable lookup criteria, or any path/transport failure.
    pub async fn first_or_initialize(
        transport: &Transport,
        kind: impl Into<Kind>,
        parent: Option<&Self>,
        attributes: Attributes,
    ) -> Result<Self, ResourceError> {
        let kind = kind.into();
        if let Some(existing) = Self::find_by(transport, kind.clone(), parent, &attributes).await? {
            return Ok(existing);
        }
        Self::with_attributes(kind, attributes)
    }

    /// Creates the entity with a POST request, rendering `relationships`
    /// into the payload, then reloads id, kind, and attributes from the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AlreadyPersisted`], without any network
    /// call, if the entity already has an id.
    pub async fn create(
        &mut self,
        transport: &Transport,
        parent: Option<&Self>,
        relationships: Relationships,
    ) -> Result<&mut Self, ResourceError> {
        if self.id.is_some() {
            return Err(ResourceError::AlreadyPersisted {
                kind: self.kind.to_string(),
            });
        }
        let path = Self::scoped_path(&self.kind, None, parent)?;
        let rendered = (!relationships.is_empty()).then(|| relationships.render());
        let object = transport.post(&path, self.payload(), rendered).await?;
        self.reload(object);
        Ok(self)
    }

    /// Updates the entity with a PATCH request, then reloads id, kind, and
    /// attributes from the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotPersisted`], without any network call,
    /// if the entity has no id.
    pub async fn update(
        &mut self,
        transport: &Transport,
        parent: Option<&Self>,
    ) -> Result<&mut Self, ResourceError> {
        let id = self.id.clone().ok_or_else(|| ResourceError::NotPersisted {
            kind: self.kind.to_string(),
        })?;
        let path = Self::scoped_path(&self.kind, Some(&id), parent)?;
        let object = transport.patch(&path, self.payload()).await?;
        self.reload(object);
        Ok(self)
    }

    /// Saves the entity: [`Entity::update`] when it has an id,
    /// [`Entity::create`] otherwise.
    ///
    /// # Errors
    ///
    /// Propagates the dispatched operation's errors.
    pub async fn save(
        &mut self,
        transport: &Transport,
        parent: Option<&Self>,
    ) -> Result<&mut Self, ResourceError> {
        if self.id.is_some() {
            self.update(transport, parent).await
        } else {
            self.create(transport, parent, Relationships::new()).await
        }
    }

    /// Resolves the request path for `kind`, nested under `parent` when
    /// given. The parent must be persisted.
    fn scoped_path(
        kind: &Kind,
        id: Option<&str>,
        parent: Option<&Self>,
    ) -> Result<String, ResourceError> {
        match parent {
            Some(parent) => {
                let parent_id = parent.id().ok_or_else(|| PathError::UnpersistedParent {
                    kind: parent.kind.to_string(),
                })?;
                Ok(path::resolve(
                    kind.as_str(),
                    id,
                    Some(parent.kind.as_str()),
                    Some(parent_id),
                )?)
            }
            None => Ok(path::resolve(kind.as_str(), id, None, None)?),
        }
    }

    fn load_all(document: Document) -> Vec<Self> {
        document
            .into_many()
            .into_iter()
            .map(Self::from_object)
            .collect()
    }

    fn from_object(object: ResourceObject) -> Self {
        Self::from(object)
    }

    /// Replaces id, kind, and attributes wholesale from a response object.
    fn reload(&mut self, object: ResourceObject) {
        self.kind = Kind::from(object.kind);
        self.id = object.id;
        self.attributes = object.attributes;
    }
}

impl From<ResourceObject> for Entity {
    /// Builds an entity from a wire-level resource object, keeping whatever
    /// id and attributes the object carries.
    fn from(object: ResourceObject) -> Self {
        Self {
            kind: Kind::from(object.kind),
            id: object.id,
            attributes: object.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_new_entity_is_unpersisted() {
        let entity = Entity::new("configurations");
        assert!(!entity.is_persisted());
        assert_eq!(entity.id(), None);
        assert!(entity.attributes().is_empty());
    }

    #[test]
    fn test_set_attr_stores_value() {
        let mut entity = Entity::new("configurations");
        entity.set_attr("name", "web-1").unwrap();
        assert_eq!(entity.attr("name"), Some(&json!("web-1")));
    }

    #[test]
    fn test_set_attr_rejects_undeclared_attribute() {
        let mut entity = Entity::new("configurations");
        let result = entity.set_attr("serial_numer", "abc");
        assert!(matches!(
            result,
            Err(ResourceError::UnknownAttribute { kind, attribute })
                if kind == "configurations" && attribute == "serial_numer"
        ));
    }

    #[test]
    fn test_set_attr_accepts_anything_for_unknown_kind() {
        let mut entity = Entity::new("flexible_assets");
        entity.set_attr("traits", json!({"size": "xl"})).unwrap();
        assert!(entity.attr("traits").is_some());
    }

    #[test]
    fn test_set_attributes_applies_every_entry() {
        let mut entity = Entity::new("locations");
        entity
            .set_attributes(attrs(json!({"name": "us-east-1a", "city": "Ashburn"})))
            .unwrap();
        assert_eq!(entity.attr("name"), Some(&json!("us-east-1a")));
        assert_eq!(entity.attr("city"), Some(&json!("Ashburn")));
    }

    #[test]
    fn test_payload_for_unpersisted_entity_has_no_id() {
        let mut entity = Entity::new("locations");
        entity.set_attr("name", "us-east-1a").unwrap();
        assert_eq!(
            entity.payload(),
            json!({"type": "locations", "attributes": {"name": "us-east-1a"}})
        );
    }

    #[test]
    fn test_payload_for_persisted_entity_includes_id() {
        let object = ResourceObject {
            kind: "locations".to_string(),
            id: Some("7".to_string()),
            attributes: attrs(json!({"name": "us-east-1a"})),
        };
        let entity = Entity::from_object(object);
        assert_eq!(
            entity.payload(),
            json!({
                "type": "locations",
                "id": "7",
                "attributes": {"name": "us-east-1a"}
            })
        );
    }

    #[test]
    fn test_equality_requires_kind_id_and_attributes() {
        let mut a = Entity::new("locations");
        a.set_attr("name", "us-east-1a").unwrap();
        let mut b = Entity::new("locations");
        b.set_attr("name", "us-east-1a").unwrap();
        assert_eq!(a, b);

        b.set_attr("name", "us-east-1b").unwrap();
        assert_ne!(a, b);

        let c = Entity::new("configurations");
        assert_ne!(a, c);
    }

    #[test]
    fn test_reload_replaces_attributes_wholesale() {
        let mut entity = Entity::new("configurations");
        entity.set_attr("name", "local-name").unwrap();
        entity.set_attr("notes", "local-notes").unwrap();

        entity.reload(ResourceObject {
            kind: "configurations".to_string(),
            id: Some("12".to_string()),
            attributes: attrs(json!({"name": "server-name"})),
        });

        assert_eq!(entity.id(), Some("12"));
        assert_eq!(entity.attr("name"), Some(&json!("server-name")));
        // Attributes the server did not echo back are gone, not merged.
        assert_eq!(entity.attr("notes"), None);
    }

    #[test]
    fn test_relationships_render_as_payload_lists() {
        let mut interface = Entity::new("configuration_interfaces");
        interface.set_attr("ip_address", "10.0.0.5").unwrap();
        let relationships =
            Relationships::new().with("configuration_interfaces", vec![interface]);

        let rendered = relationships.render();
        assert_eq!(
            Value::Object(rendered),
            json!({
                "configuration_interfaces": [
                    {
                        "type": "configuration_interfaces",
                        "attributes": {"ip_address": "10.0.0.5"}
                    }
                ]
            })
        );
    }

    #[test]
    fn test_scoped_path_requires_persisted_parent() {
        let parent = Entity::new("organizations");
        let result = Entity::scoped_path(&Kind::Configurations, None, Some(&parent));
        assert!(matches!(
            result,
            Err(ResourceError::Path(PathError::UnpersistedParent { kind })) if kind == "organizations"
        ));
    }

    #[test]
    fn test_scoped_path_nests_under_persisted_parent() {
        let parent = Entity::from_object(ResourceObject {
            kind: "organizations".to_string(),
            id: Some("9".to_string()),
            attributes: Attributes::new(),
        });
        let path = Entity::scoped_path(&Kind::Configurations, Some("5"), Some(&parent)).unwrap();
        assert_eq!(path, "/organizations/9/relationships/configurations/5");
    }
}
