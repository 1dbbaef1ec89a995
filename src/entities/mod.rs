//! Typed wrappers around [`Model`] for every entity kind the crate knows about.
//!
//! Each wrapper is a newtype generated by `entity!` that dereferences to its
//! [`Model`], so the generic verbs (`save`, `delete`, `associate`, ...) are
//! available on all of them, next to a handful of typed getters.

use std::fmt;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
    error::{Error, Result},
    filter::Filter,
    model::{Collection, EntityKind, Model, Relationship},
    service::RemoteService,
};

/// Declares a newtype over [`Model`] bound to one [`EntityKind`].
macro_rules! entity {
    ($(#[$meta:meta])* $name:ident => $kind:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($crate::model::Model);

        impl $crate::entities::Entity for $name {
            const KIND: &'static $crate::model::EntityKind = &$kind;
        }

        impl From<$crate::model::Model> for $name {
            fn from(model: $crate::model::Model) -> Self {
                Self(model)
            }
        }

        impl From<$name> for $crate::model::Model {
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl From<$name> for $crate::model::Attribute {
            fn from(entity: $name) -> Self {
                Self::One(entity.0)
            }
        }

        impl AsRef<$crate::model::Model> for $name {
            fn as_ref(&self) -> &$crate::model::Model {
                &self.0
            }
        }

        impl AsMut<$crate::model::Model> for $name {
            fn as_mut(&mut self) -> &mut $crate::model::Model {
                &mut self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::model::Model;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as $crate::entities::Entity>::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub mod account;
pub mod bank_statement;
pub mod bank_transaction;
pub mod contact;
pub mod credit_note;
pub mod invoice;
pub mod item;
pub mod journal;
pub mod journal_line;
pub mod line_item;
pub mod manual_journal;
pub mod organisation;
pub mod overpayment;
pub mod payment;
pub mod prepayment;
pub mod report;
pub mod tracking_category;

/// Every kind a nested field can resolve to, keyed by its singular and plural names.
///
/// Reports are absent: they are fetched, never nested.
pub static REGISTRY: &[&EntityKind] = &[
    &account::KIND,
    &bank_transaction::KIND,
    &contact::KIND,
    &credit_note::KIND,
    &invoice::KIND,
    &item::KIND,
    &journal::KIND,
    &journal_line::KIND,
    &line_item::KIND,
    &manual_journal::KIND,
    &organisation::KIND,
    &overpayment::KIND,
    &payment::KIND,
    &prepayment::KIND,
    &tracking_category::KIND,
];

/// A typed view over a [`Model`] of one fixed kind.
pub trait Entity: From<Model> + Into<Model> + AsRef<Model> + AsMut<Model> {
    const KIND: &'static EntityKind;

    #[must_use]
    fn new() -> Self {
        Model::new(Self::KIND).into()
    }

    #[must_use]
    fn from_attributes(data: Value) -> Self {
        Model::with_attributes(Self::KIND, data).into()
    }

    #[must_use]
    fn new_collection() -> Collection {
        Collection::new(Self::KIND)
    }

    /// Loads one record; `Ok(None)` when Xero answers `404`.
    async fn find<S: RemoteService>(service: &S, id: impl fmt::Display) -> Result<Option<Self>> {
        Ok(Model::find(service, Self::KIND, id).await?.map(Self::from))
    }

    async fn get<S: RemoteService>(service: &S, params: &Filter) -> Result<Collection> {
        Model::get(service, Self::KIND, params).await
    }

    async fn find_by<S: RemoteService>(service: &S, params: &Filter) -> Result<Collection> {
        Model::find_by(service, Self::KIND, params).await
    }

    /// [`Entity::get`], converted to typed entities.
    async fn all<S: RemoteService>(service: &S, params: &Filter) -> Result<Vec<Self>> {
        Self::get(service, params).await?.into_entities()
    }
}

/// Entities that carry child lines with a `LineAmount`.
pub trait HasLines: Entity {
    /// The kind of the child lines.
    const LINES: &'static EntityKind;

    fn lines(&self) -> Option<&Collection> {
        match self.as_ref().relationship(Self::LINES.singular) {
            Some(Relationship::Many(lines)) => Some(lines),
            _ => None,
        }
    }

    /// Sum of the lines' `LineAmount`, or `None` when there are no lines at all.
    fn line_items_total(&self) -> Option<Decimal> {
        let lines = self.lines().filter(|lines| !lines.is_empty())?;
        Some(lines.iter().filter_map(|line| line.decimal("LineAmount")).sum())
    }

    fn add_line(&mut self, line: impl Into<Model>) -> Result<&mut Self> {
        let line = line.into();
        if line.kind() != Self::LINES {
            return Err(Error::KindMismatch {
                expected: Self::LINES.name,
                found: line.kind().singular,
            });
        }
        self.as_mut().push(line)?;
        Ok(self)
    }
}

/// Reads an attribute holding one of the API's string enums.
pub(crate) fn parse_enum<T: serde::de::DeserializeOwned>(model: &Model, key: &str) -> Option<T> {
    model
        .attribute(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

/// Reads an attribute holding any date form Xero returns.
pub(crate) fn parse_date(model: &Model, key: &str) -> Option<time::Date> {
    model
        .str(key)
        .and_then(|value| crate::utils::date_format::parse_date(value).ok())
}

/// The model behind a single-entity relationship.
pub(crate) fn related<'a>(model: &'a Model, name: &str) -> Option<&'a Model> {
    match model.relationship(name) {
        Some(Relationship::One(related)) => Some(related),
        _ => None,
    }
}
