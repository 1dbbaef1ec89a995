use serde_json::{Map, Value};

use super::{EntityKind, Model};
use crate::{
    entities::Entity,
    error::{Error, Result},
};

/// An ordered group of models of one kind, as returned by list queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    kind: &'static EntityKind,
    items: Vec<Model>,
}

impl Collection {
    #[must_use]
    pub fn new(kind: &'static EntityKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Hydrates a collection from any shape the API uses for a list of `kind`:
    /// a JSON list, the XML `{Singular: item | [items]}` wrapper or a lone map.
    #[must_use]
    pub fn from_value(kind: &'static EntityKind, value: Value) -> Self {
        match value {
            Value::Array(items) => {
                let mut collection = Self::new(kind);
                collection.set_items(items);
                collection
            }
            Value::Object(mut map) => {
                if let Some(inner) = map.remove(kind.singular) {
                    return Self::from_value(kind, inner);
                }
                let mut collection = Self::new(kind);
                if !map.is_empty() {
                    collection
                        .items
                        .push(Model::with_attributes(kind, Value::Object(map)));
                }
                collection
            }
            _ => Self::new(kind),
        }
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

    /// Appends a model, rejecting models of another kind.
    pub fn push(&mut self, model: Model) -> Result<()> {
        if model.kind() != self.kind {
            return Err(Error::KindMismatch {
                expected: self.kind.name,
                found: model.kind().singular,
            });
        }
        self.items.push(model);
        Ok(())
    }

    /// Replaces the contents with one model per raw map.
    pub fn set_items(&mut self, items: Vec<Value>) {
        self.items = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(_) => Some(Model::with_attributes(self.kind, item)),
                other => {
                    trace!(?other, collection = self.kind.name, "skipping non-map item");
                    None
                }
            })
            .collect();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Model> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Model> {
        self.items.first()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Model> {
        self.items.get(index)
    }

    /// Converts every item into the typed entity `E`.
    pub fn into_entities<E: Entity>(self) -> Result<Vec<E>> {
        if self.kind != E::KIND {
            return Err(Error::KindMismatch {
                expected: E::KIND.name,
                found: self.kind.singular,
            });
        }
        Ok(self.items.into_iter().map(E::from).collect())
    }

    /// Each item's serialized map, in order.
    #[must_use]
    pub fn to_serialized_list(&self) -> Vec<Value> {
        self.items
            .iter()
            .map(|item| Value::Object(item.to_serialized_map()))
            .collect()
    }

    /// `{Plural: {Singular: [items]}}`, or `{Plural: {}}` when empty.
    #[must_use]
    pub fn to_serialized_map(&self) -> Map<String, Value> {
        let mut inner = Map::new();
        if !self.items.is_empty() {
            inner.insert(
                self.kind.singular.to_string(),
                Value::Array(self.to_serialized_list()),
            );
        }
        let mut map = Map::new();
        map.insert(self.kind.name.to_string(), Value::Object(inner));
        map
    }
}

impl IntoIterator for Collection {
    type Item = Model;
    type IntoIter = std::vec::IntoIter<Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{contact, line_item};
    use serde_json::json;

    #[test]
    fn every_response_shape_hydrates() {
        let list = Collection::from_value(
            &line_item::KIND,
            json!([{ "LineAmount": "1" }, { "LineAmount": "2" }]),
        );
        assert_eq!(list.len(), 2);

        let wrapped = Collection::from_value(
            &line_item::KIND,
            json!({ "LineItem": [{ "LineAmount": "1" }, { "LineAmount": "2" }] }),
        );
        assert_eq!(wrapped, list);

        let single = Collection::from_value(&line_item::KIND, json!({ "LineItem": { "LineAmount": "1" } }));
        assert_eq!(single.len(), 1);
        assert_eq!(single.first().unwrap().str("LineAmount"), Some("1"));

        assert!(Collection::from_value(&line_item::KIND, json!({})).is_empty());
        assert!(Collection::from_value(&line_item::KIND, json!("")).is_empty());
    }

    #[test]
    fn push_rejects_other_kinds() {
        let mut lines = Collection::new(&line_item::KIND);
        lines.push(Model::new(&line_item::KIND)).unwrap();
        let err = lines.push(Model::new(&contact::KIND)).unwrap_err();
        assert!(matches!(
            err,
            Error::KindMismatch { expected: "LineItems", found: "Contact" }
        ));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn empty_collections_serialize_without_items() {
        let lines = Collection::new(&line_item::KIND);
        assert_eq!(Value::Object(lines.to_serialized_map()), json!({ "LineItems": {} }));
    }
}
