use serde::{Deserialize, Serialize};

use crate::model::EntityKind;

use super::parse_enum;

pub static KIND: EntityKind = EntityKind::collection(
    "Contacts",
    "Contact",
    "ContactID",
    &[
        "ContactNumber",
        "AccountNumber",
        "ContactStatus",
        "Name",
        "FirstName",
        "LastName",
        "EmailAddress",
        "SkypeUserName",
        "BankAccountDetails",
        "TaxNumber",
        "AccountsReceivableTaxType",
        "AccountsPayableTaxType",
        "Addresses",
        "Phones",
        "IsSupplier",
        "IsCustomer",
        "DefaultCurrency",
        "UpdatedDateUTC",
        "ContactGroups",
        "ContactPersons",
        "HasAttachments",
    ],
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Active,
    Archived,
    GdprRequest,
}

entity! {
    Contact => KIND
}

impl Contact {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str("Name")
    }

    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        self.str("EmailAddress")
    }

    #[must_use]
    pub fn contact_status(&self) -> Option<Status> {
        parse_enum(self, "ContactStatus")
    }

    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.attribute("IsCustomer").is_some_and(is_truthy)
    }

    #[must_use]
    pub fn is_supplier(&self) -> bool {
        self.attribute("IsSupplier").is_some_and(is_truthy)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_attribute("Name", name.into());
        self
    }

    #[must_use]
    pub fn with_email_address(mut self, email: impl Into<String>) -> Self {
        self.set_attribute("EmailAddress", email.into());
        self
    }
}

// JSON responses carry booleans, XML responses the strings "true"/"false".
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::Entity, model::Model};
    use serde_json::json;

    #[test]
    fn flags_read_from_json_and_xml_shapes() {
        let from_json = Contact::from_attributes(json!({ "IsCustomer": true, "ContactStatus": "ACTIVE" }));
        let from_xml = Contact::from_attributes(json!({ "IsCustomer": "true", "IsSupplier": "false" }));

        assert!(from_json.is_customer());
        assert!(from_xml.is_customer());
        assert!(!from_xml.is_supplier());
        assert_eq!(from_json.contact_status(), Some(Status::Active));
        assert_eq!(from_xml.contact_status(), None);
    }

    #[test]
    fn contact_name_is_not_the_entity_name() {
        let contact = Contact::new().with_name("Ridgeway University");
        let model: &Model = &contact;

        assert_eq!(contact.name(), Some("Ridgeway University"));
        assert_eq!(model.plural_name(), "Contacts");
        assert_eq!(contact.plural_name(), "Contacts");
        assert_eq!(model.str("Name"), contact.name());
    }
}
