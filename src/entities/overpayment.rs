use rust_decimal::Decimal;

use crate::model::EntityKind;

use super::HasLines;

pub static KIND: EntityKind = EntityKind::collection(
    "Overpayments",
    "Overpayment",
    "OverpaymentID",
    &[
        "Type",
        "Date",
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
    /// Money paid beyond what was owed, held as credit against the contact.
    Overpayment => KIND
}

impl HasLines for Overpayment {
    const LINES: &'static EntityKind = &super::line_item::KIND;
}

impl Overpayment {
    #[must_use]
    pub fn remaining_credit(&self) -> Option<Decimal> {
        self.decimal("RemainingCredit")
    }
}
