use rust_decimal::Decimal;

use crate::model::EntityKind;

use super::HasLines;

pub static KIND: EntityKind = EntityKind::collection(
    "Prepayments",
    "Prepayment",
    "PrepaymentID",
    &[
        "Type",
        "Date",
        "Reference",
        "LineAmountTypes",
        "SubTotal",
        "TotalTax",
        "Total",
        "RemainingCredit",
        "CurrencyCode",
        "CurrencyRate",
        "HasAttachments",
        "UpdatedDateUTC",
    ],
);

entity! {
    /// Money received or paid before an invoice exists.
    Prepayment => KIND
}

impl HasLines for Prepayment {
    const LINES: &'static EntityKind = &super::line_item::KIND;
}

impl Prepayment {
    #[must_use]
    pub fn remaining_credit(&self) -> Option<Decimal> {
        self.decimal("RemainingCredit")
    }
}
