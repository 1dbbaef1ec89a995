use std::borrow::Cow;

use crate::{endpoints::ApiSection, entities::REGISTRY};

/// Where an entity kind is read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The plural entity name, e.g. `Invoices`.
    Collection,
    /// A fixed `Reports/<name>` path.
    Report(&'static str),
}

/// Static description of one remote entity type.
#[derive(Debug, PartialEq, Eq)]
pub struct EntityKind {
    /// Plural entity name, used for URLs, envelopes and collections.
    pub name: &'static str,
    pub singular: &'static str,
    pub primary_key: &'static str,
    pub status_field: &'static str,
    pub section: ApiSection,
    pub endpoint: Endpoint,
    /// Scalar fields the API documents for this kind.
    pub fields: &'static [&'static str],
}

impl EntityKind {
    /// A core accounting entity served from its plural name.
    #[must_use]
    pub const fn collection(
        name: &'static str,
        singular: &'static str,
        primary_key: &'static str,
        fields: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            singular,
            primary_key,
            status_field: "Status",
            section: ApiSection::Core,
            endpoint: Endpoint::Collection,
            fields,
        }
    }

    /// A report served from `Reports/<report>` and enveloped as `Reports`/`Report`.
    #[must_use]
    pub const fn report(report: &'static str) -> Self {
        Self {
            name: "Reports",
            singular: "Report",
            primary_key: "ReportID",
            status_field: "Status",
            section: ApiSection::Core,
            endpoint: Endpoint::Report(report),
            fields: &[],
        }
    }

    /// The entity path handed to [`RemoteService::url`](crate::RemoteService::url).
    #[must_use]
    pub fn path(&self) -> Cow<'static, str> {
        match self.endpoint {
            Endpoint::Collection => Cow::Borrowed(self.name),
            Endpoint::Report(report) => Cow::Owned(format!("Reports/{report}")),
        }
    }

    #[must_use]
    pub fn is_report(&self) -> bool {
        matches!(self.endpoint, Endpoint::Report(_))
    }

    #[must_use]
    pub fn is_known_field(&self, key: &str) -> bool {
        key == self.primary_key || key == self.status_field || self.fields.contains(&key)
    }
}

/// Whether a registry key named one entity or a collection of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Resolves a field name to a registered kind.
///
/// Only exact singular (`Contact`) or plural (`LineItems`) entity names match; no
/// inflection is attempted.
#[must_use]
pub fn lookup(key: &str) -> Option<(&'static EntityKind, Cardinality)> {
    REGISTRY.iter().find_map(|kind| {
        if kind.singular == key {
            Some((*kind, Cardinality::One))
        } else if kind.name == key {
            Some((*kind, Cardinality::Many))
        } else {
            None
        }
    })
}

/// The singular relationship name a field name refers to.
#[must_use]
pub fn singular_of(key: &str) -> &str {
    lookup(key).map_or(key, |(kind, _)| kind.singular)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_exact_names_only() {
        let (kind, cardinality) = lookup("LineItems").unwrap();
        assert_eq!(kind.singular, "LineItem");
        assert_eq!(cardinality, Cardinality::Many);

        let (kind, cardinality) = lookup("Contact").unwrap();
        assert_eq!(kind.name, "Contacts");
        assert_eq!(cardinality, Cardinality::One);

        assert!(lookup("lineitems").is_none());
        assert!(lookup("Addresses").is_none());
        assert_eq!(singular_of("JournalLines"), "JournalLine");
        assert_eq!(singular_of("Addresses"), "Addresses");
    }

    #[test]
    fn report_paths_are_fixed() {
        let kind = EntityKind::report("BankStatement");
        assert_eq!(kind.path(), "Reports/BankStatement");
        assert_eq!(kind.name, "Reports");
        assert!(kind.is_report());
    }
}
