//! The dynamic model layer: attributes, relationships and the CRUD verbs that
//! move them to and from the API.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use time::{Date, macros::format_description};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    filter::Filter,
    markup,
    service::{Method, RemoteResponse, RemoteService},
};

mod collection;
mod kind;

pub use collection::Collection;
pub use kind::{Cardinality, Endpoint, EntityKind, lookup, singular_of};

/// The sentinel the API expects in the status field of a deleted entity.
pub const DELETED: &str = "DELETED";

/// An entity-valued or collection-valued field.
#[derive(Debug, Clone, PartialEq)]
pub enum Relationship {
    One(Model),
    Many(Collection),
}

impl Relationship {
    #[must_use]
    pub fn kind(&self) -> &'static EntityKind {
        match self {
            Self::One(model) => model.kind(),
            Self::Many(collection) => collection.kind(),
        }
    }

    #[must_use]
    pub fn singular_name(&self) -> &'static str {
        self.kind().singular
    }

    #[must_use]
    pub fn to_serialized_map(&self) -> Map<String, Value> {
        match self {
            Self::One(model) => {
                let mut map = Map::new();
                map.insert(
                    model.singular_name().to_string(),
                    Value::Object(model.to_serialized_map()),
                );
                map
            }
            Self::Many(collection) => collection.to_serialized_map(),
        }
    }
}

/// Anything that can be stored under a field name.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Value(Value),
    One(Model),
    Many(Collection),
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Model> for Attribute {
    fn from(model: Model) -> Self {
        Self::One(model)
    }
}

impl From<Collection> for Attribute {
    fn from(collection: Collection) -> Self {
        Self::Many(collection)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<bool> for Attribute {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

/// Amounts are kept as their decimal string so no precision is lost on the way out.
impl From<Decimal> for Attribute {
    fn from(value: Decimal) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<Uuid> for Attribute {
    fn from(value: Uuid) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<Date> for Attribute {
    fn from(value: Date) -> Self {
        let formatted = value
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_default();
        Self::Value(Value::String(formatted))
    }
}

/// A borrowed view of whatever a field name resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Value(&'a Value),
    One(&'a Model),
    Many(&'a Collection),
}

/// One remote accounting object: ordered attributes plus related entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    kind: &'static EntityKind,
    attributes: Map<String, Value>,
    relationships: Vec<Relationship>,
}

impl Model {
    #[must_use]
    pub fn new(kind: &'static EntityKind) -> Self {
        Self {
            kind,
            attributes: Map::new(),
            relationships: Vec::new(),
        }
    }

    /// Builds a model from a raw map, resolving nested entities through the registry.
    #[must_use]
    pub fn with_attributes(kind: &'static EntityKind, data: Value) -> Self {
        let mut model = Self::new(kind);
        model.set_attributes(data);
        model
    }

    #[must_use]
    pub fn kind(&self) -> &'static EntityKind {
        self.kind
    }

    #[must_use]
    pub fn plural_name(&self) -> &'static str {
        self.kind.name
    }

    #[must_use]
    pub fn singular_name(&self) -> &'static str {
        self.kind.singular
    }

    /// Sets one field.
    ///
    /// Models and collections become relationships. Nested maps and lists whose key
    /// names a registered entity (`Contact`, `LineItems`, ...) are hydrated into a
    /// model or collection; any other nested value is kept as a raw attribute.
    /// Reports never resolve nested values and keep them verbatim.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Attribute>) {
        let key = key.into();
        match value.into() {
            Attribute::One(model) => {
                self.attributes.shift_remove(&key);
                self.insert_relationship(Relationship::One(model));
            }
            Attribute::Many(collection) => {
                self.attributes.shift_remove(&key);
                self.insert_relationship(Relationship::Many(collection));
            }
            Attribute::Value(value @ (Value::Object(_) | Value::Array(_)))
                if !self.kind.is_report() =>
            {
                match (lookup(&key), value) {
                    (Some((kind, Cardinality::One)), value @ Value::Object(_)) => {
                        self.attributes.shift_remove(&key);
                        self.insert_relationship(Relationship::One(Self::with_attributes(
                            kind, value,
                        )));
                    }
                    (Some((kind, Cardinality::Many)), value) => {
                        self.attributes.shift_remove(&key);
                        self.insert_relationship(Relationship::Many(Collection::from_value(
                            kind, value,
                        )));
                    }
                    (_, value) => self.insert_value(key, value),
                }
            }
            Attribute::Value(value) => self.insert_value(key, value),
        }
    }

    fn insert_value(&mut self, key: String, value: Value) {
        if !self.kind.is_known_field(&key) {
            trace!(entity = self.kind.singular, field = %key, "field is not in the schema");
        }
        let singular = singular_of(&key);
        self.relationships
            .retain(|relationship| relationship.singular_name() != singular);
        self.attributes.insert(key, value);
    }

    fn insert_relationship(&mut self, relationship: Relationship) {
        let kind = relationship.kind();
        self.attributes.shift_remove(kind.singular);
        self.attributes.shift_remove(kind.name);
        match self
            .relationships
            .iter_mut()
            .find(|existing| existing.singular_name() == kind.singular)
        {
            Some(existing) => *existing = relationship,
            None => self.relationships.push(relationship),
        }
    }

    /// Sets every field of `data` in order, after stripping the response envelope.
    ///
    /// A list payload hydrates from its first map; the API only returns one for
    /// single-entity JSON responses.
    pub fn set_attributes(&mut self, data: Value) {
        match self.strip_response_data(data) {
            Value::Object(map) => {
                for (key, value) in map {
                    self.set_attribute(key, value);
                }
            }
            Value::Array(items) => {
                if let Some(first @ Value::Object(_)) = items.into_iter().next() {
                    self.set_attributes(first);
                }
            }
            other => trace!(?other, entity = self.kind.singular, "ignoring scalar payload"),
        }
    }

    /// Peels the plural envelope, then the singular one, when they hold a map or list.
    #[must_use]
    pub fn strip_response_data(&self, data: Value) -> Value {
        let data = peel(data, self.kind.name);
        peel(data, self.kind.singular)
    }

    /// Whether a response carries a non-empty payload for this kind.
    #[must_use]
    pub fn has_response_data(&self, data: &Value) -> bool {
        let mut found = false;
        let mut data = data;
        for key in [self.kind.name, self.kind.singular] {
            if let Some(inner @ (Value::Object(_) | Value::Array(_))) = data.get(key) {
                data = inner;
                found = true;
            }
        }
        found && !is_empty(data)
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    /// The relationship a field name refers to, by singular name.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        let singular = singular_of(name);
        self.relationships
            .iter()
            .find(|relationship| relationship.singular_name() == singular)
    }

    pub fn relationship_mut(&mut self, name: &str) -> Option<&mut Relationship> {
        let singular = singular_of(name);
        self.relationships
            .iter_mut()
            .find(|relationship| relationship.singular_name() == singular)
    }

    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Attribute lookup first, then relationship lookup.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<Field<'_>> {
        if let Some(value) = self.attributes.get(key) {
            return Some(Field::Value(value));
        }
        self.relationship(key).map(|relationship| match relationship {
            Relationship::One(model) => Field::One(model),
            Relationship::Many(collection) => Field::Many(collection),
        })
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// A numeric attribute, whether stored as a JSON number or a decimal string.
    #[must_use]
    pub fn decimal(&self, key: &str) -> Option<Decimal> {
        match self.attributes.get(key)? {
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            Value::Number(n) => Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.attributes
            .get(self.kind.primary_key)
            .filter(|value| !is_empty(value))
    }

    /// The primary key rendered for use in a URL.
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        match self.id()? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn set_id(&mut self, id: impl Into<Attribute>) -> &mut Self {
        self.set_attribute(self.kind.primary_key, id);
        self
    }

    /// Appends `model` to the collection relationship of its kind, creating it if needed.
    pub fn push(&mut self, model: Model) -> Result<&mut Self> {
        let kind = model.kind();
        match self.relationship_mut(kind.singular) {
            Some(Relationship::Many(collection)) => collection.push(model)?,
            Some(existing) => {
                let mut collection = Collection::new(kind);
                if let Relationship::One(previous) =
                    std::mem::replace(existing, Relationship::Many(Collection::new(kind)))
                {
                    collection.push(previous)?;
                }
                collection.push(model)?;
                *existing = Relationship::Many(collection);
            }
            None => {
                let mut collection = Collection::new(kind);
                collection.push(model)?;
                self.insert_relationship(Relationship::Many(collection));
            }
        }
        Ok(self)
    }

    /// Attributes merged with every relationship's serialized form.
    #[must_use]
    pub fn to_serialized_map(&self) -> Map<String, Value> {
        let mut output = self.attributes.clone();
        for relationship in &self.relationships {
            output.extend(relationship.to_serialized_map());
        }
        output
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Object(self.to_serialized_map()).to_string()
    }

    /// The XML body sent to the API: `<Plural><Singular>…</Singular></Plural>`, or
    /// just `<Singular>…</Singular>` when `singular` is set.
    pub fn to_markup(&self, singular: bool) -> Result<String> {
        let map = self.to_serialized_map();
        if singular {
            markup::to_markup(self.kind.singular, None, &map)
        } else {
            markup::to_markup(self.kind.name, Some(self.kind.singular), &map)
        }
    }

    pub fn url<S: RemoteService>(&self, service: &S) -> Result<String> {
        service.url(&self.kind.path(), self.kind.section)
    }

    /// The URL of this particular record.
    pub fn instance_url<S: RemoteService>(&self, service: &S) -> Result<String> {
        let id = self.require_id("address")?;
        Ok(format!("{}/{id}", self.url(service)?))
    }

    fn require_id(&self, operation: &'static str) -> Result<String> {
        self.id_string().ok_or(Error::MissingIdentifier {
            entity: self.kind.singular,
            field: self.kind.primary_key,
            operation,
        })
    }

    /// Sends one request and interprets its status.
    ///
    /// A service reporting diagnostics is refused with
    /// [`Error::InvalidConfiguration`] before anything is sent. `200` parses the body (hydrating this model when `hydrate` is set), `404`
    /// yields `None`, and anything else is an [`Error::RemoteService`].
    #[instrument(skip(self, service, params, body), fields(entity = self.kind.singular))]
    pub async fn request<S: RemoteService>(
        &mut self,
        service: &S,
        method: Method,
        url: &str,
        params: &Filter,
        body: Option<&str>,
        hydrate: bool,
    ) -> Result<Option<Value>> {
        let diagnostics = service.diagnostics();
        if !diagnostics.is_empty() {
            error!(?diagnostics, "invalid Xero configuration");
            return Err(Error::InvalidConfiguration { diagnostics });
        }

        trace!(?params, ?body, "sending request");
        let response = service
            .request(method, url, &params.params(), body, service.format())
            .await?;
        self.parse_response(service, url, response, hydrate)
    }

    fn parse_response<S: RemoteService>(
        &mut self,
        service: &S,
        url: &str,
        response: RemoteResponse,
        hydrate: bool,
    ) -> Result<Option<Value>> {
        match response.code {
            200 => {
                let data = service.parse_response(&response.body, response.format)?;
                if hydrate && data.is_object() {
                    self.set_attributes(data.clone());
                }
                Ok(Some(data))
            }
            404 => {
                debug!(url, "not found");
                Ok(None)
            }
            status_code => {
                error!(status_code, url, "unexpected response from Xero");
                Err(Error::RemoteService {
                    status_code,
                    url: url.to_string(),
                    response_body: response.body,
                })
            }
        }
    }

    /// Loads one record by id. A `404` is `Ok(None)`.
    pub async fn find<S: RemoteService>(
        service: &S,
        kind: &'static EntityKind,
        id: impl fmt::Display,
    ) -> Result<Option<Self>> {
        let mut model = Self::new(kind);
        let url = format!("{}/{id}", model.url(service)?);
        let data = model
            .request(service, Method::GET, &url, &Filter::new(), None, true)
            .await?;
        Ok(data.filter(|data| !is_empty(data)).map(|_| model))
    }

    /// The stripped payload of a collection query, or `None` when there is none.
    pub async fn model_data<S: RemoteService>(
        service: &S,
        kind: &'static EntityKind,
        params: &Filter,
    ) -> Result<Option<Value>> {
        let mut model = Self::new(kind);
        let url = model.url(service)?;
        let Some(data) = model
            .request(service, Method::GET, &url, params, None, false)
            .await?
        else {
            return Ok(None);
        };

        if !model.has_response_data(&data) {
            return Ok(None);
        }
        Ok(Some(model.strip_response_data(data)))
    }

    /// Queries the collection endpoint. A single map payload becomes a one item collection.
    pub async fn get<S: RemoteService>(
        service: &S,
        kind: &'static EntityKind,
        params: &Filter,
    ) -> Result<Collection> {
        let mut collection = Collection::new(kind);
        match Self::model_data(service, kind, params).await? {
            Some(Value::Array(items)) => collection.set_items(items),
            Some(data @ Value::Object(_)) => {
                collection.push(Self::with_attributes(kind, data))?;
            }
            _ => {}
        }
        Ok(collection)
    }

    /// Same as [`Model::get`]; kept for callers that read better with it.
    pub async fn find_by<S: RemoteService>(
        service: &S,
        kind: &'static EntityKind,
        params: &Filter,
    ) -> Result<Collection> {
        Self::get(service, kind, params).await
    }

    /// Loads a report and keeps the payload verbatim as attributes.
    pub async fn fetch_report<S: RemoteService>(
        service: &S,
        kind: &'static EntityKind,
        params: &Filter,
    ) -> Result<Option<Self>> {
        let attributes = match Self::model_data(service, kind, params).await? {
            Some(Value::Object(map)) => map,
            Some(Value::Array(items)) => match items.into_iter().next() {
                Some(Value::Object(map)) => map,
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };

        Ok(Some(Self {
            kind,
            attributes,
            relationships: Vec::new(),
        }))
    }

    /// Creates the entity with a `PUT` to the collection URL.
    pub async fn create<S: RemoteService>(&mut self, service: &S, params: &Filter) -> Result<bool> {
        let url = self.url(service)?;
        let body = self.to_markup(false)?;
        self.send(service, Method::PUT, &url, params, &body).await
    }

    /// Updates the entity with a `POST` to the collection URL.
    pub async fn update<S: RemoteService>(&mut self, service: &S, params: &Filter) -> Result<bool> {
        let url = self.url(service)?;
        let body = self.to_markup(false)?;
        self.send(service, Method::POST, &url, params, &body).await
    }

    /// Updates when the primary key is set, creates otherwise.
    pub async fn save<S: RemoteService>(&mut self, service: &S, params: &Filter) -> Result<bool> {
        if self.id().is_some() {
            self.update(service, params).await
        } else {
            self.create(service, params).await
        }
    }

    /// Marks the entity `DELETED` and posts it. The record is not removed locally.
    pub async fn delete<S: RemoteService>(&mut self, service: &S) -> Result<bool> {
        self.require_id("delete")?;
        self.set_attribute(self.kind.status_field, DELETED);

        let url = self.url(service)?;
        let body = self.to_markup(false)?;
        self.send(service, Method::POST, &url, &Filter::new(), &body)
            .await
    }

    /// Attaches `other` to this record with a `PUT` to `{instance}/{other plural name}`.
    pub async fn associate<S: RemoteService>(
        &mut self,
        service: &S,
        other: &Model,
        params: &Filter,
    ) -> Result<bool> {
        let url = format!("{}/{}", self.instance_url(service)?, other.plural_name());
        let body = other.to_markup(false)?;
        self.send(service, Method::PUT, &url, params, &body).await
    }

    async fn send<S: RemoteService>(
        &mut self,
        service: &S,
        method: Method,
        url: &str,
        params: &Filter,
        body: &str,
    ) -> Result<bool> {
        Ok(self
            .request(service, method, url, params, Some(body), true)
            .await?
            .is_some())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

fn peel(data: Value, key: &str) -> Value {
    match data {
        Value::Object(mut map)
            if matches!(map.get(key), Some(Value::Object(_) | Value::Array(_))) =>
        {
            map.remove(key).unwrap_or_default()
        }
        other => other,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
