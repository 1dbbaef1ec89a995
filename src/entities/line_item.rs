use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::EntityKind;

use super::Entity;

pub static KIND: EntityKind = EntityKind::collection(
    "LineItems",
    "LineItem",
    "LineItemID",
    &[
        "Description",
        "Quantity",
        "UnitAmount",
        "ItemCode",
        "AccountCode",
        "AccountID",
        "TaxType",
        "TaxAmount",
        "LineAmount",
        "DiscountRate",
        "DiscountAmount",
        "Tracking",
        "Item",
    ],
);

/// How line amounts relate to tax, shared by every entity with lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LineAmountType {
    #[serde(alias = "NONE")]
    None,
    #[serde(alias = "EXCLUSIVE")]
    Exclusive,
    #[serde(alias = "INCLUSIVE")]
    Inclusive,
    #[serde(alias = "NOTAX")]
    NoTax,
}

entity! {
    /// One line of an invoice, credit note, bank transaction or payment.
    LineItem => KIND
}

/// Rounds half away from zero and always renders two decimal places.
pub(crate) fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Builds a line from a description and amount on top of any extra `fields`.
///
/// `Quantity` defaults to `1.00`; `Description` and `LineAmount` always win over
/// values of the same name in `fields`.
#[must_use]
pub fn make(description: &str, amount: Decimal, fields: Value) -> LineItem {
    let mut line = LineItem::new();
    if let Value::Object(fields) = fields {
        for (key, value) in fields {
            line.set_attribute(key, value);
        }
    }
    if line.attribute("Quantity").is_none() {
        line.set_attribute("Quantity", "1.00");
    }
    line.set_attribute("Description", description);
    line.set_attribute("LineAmount", format_amount(amount));
    line
}

impl LineItem {
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.str("Description")
    }

    #[must_use]
    pub fn quantity(&self) -> Option<Decimal> {
        self.decimal("Quantity")
    }

    #[must_use]
    pub fn unit_amount(&self) -> Option<Decimal> {
        self.decimal("UnitAmount")
    }

    #[must_use]
    pub fn line_amount(&self) -> Option<Decimal> {
        self.decimal("LineAmount")
    }

    #[must_use]
    pub fn account_code(&self) -> Option<&str> {
        self.str("AccountCode")
    }

    #[must_use]
    pub fn with_account_code(mut self, code: impl Into<String>) -> Self {
        self.set_attribute("AccountCode", code.into());
        self
    }

    #[must_use]
    pub fn with_tax_type(mut self, tax_type: impl Into<String>) -> Self {
        self.set_attribute("TaxType", tax_type.into());
        self
    }

    #[must_use]
    pub fn with_item_code(mut self, code: impl Into<String>) -> Self {
        self.set_attribute("ItemCode", code.into());
        self
    }
}
