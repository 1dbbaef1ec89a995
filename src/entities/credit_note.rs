use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::model::{EntityKind, Model};

use super::{HasLines, parse_date, parse_enum, related};

pub static KIND: EntityKind = EntityKind::collection(
    "CreditNotes",
    "CreditNote",
    "CreditNoteID",
    &[
        "Type",
        "Date",
        "DueDate",
        "LineAmountTypes",
        "CreditNoteNumber",
        "Reference",
        "SentToContact",
        "CurrencyCode",
        "CurrencyRate",
        "SubTotal",
        "TotalTax",
        "Total",
        "RemainingCredit",
        "FullyPaidOnDate",
        "BrandingThemeID",
        "HasAttachments",
        "UpdatedDateUTC",
    ],
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    #[serde(rename = "ACCPAYCREDIT")]
    AccountsPayableCredit,
    #[serde(rename = "ACCRECCREDIT")]
    AccountsReceivableCredit,
}

entity! {
    CreditNote => KIND
}

impl HasLines for CreditNote {
    const LINES: &'static EntityKind = &super::line_item::KIND;
}

impl CreditNote {
    #[must_use]
    pub fn credit_note_type(&self) -> Option<Type> {
        parse_enum(self, "Type")
    }

    #[must_use]
    pub fn credit_note_number(&self) -> Option<&str> {
        self.str("CreditNoteNumber")
    }

    #[must_use]
    pub fn date(&self) -> Option<Date> {
        parse_date(self, "Date")
    }

    #[must_use]
    pub fn remaining_credit(&self) -> Option<Decimal> {
        self.decimal("RemainingCredit")
    }

    #[must_use]
    pub fn contact(&self) -> Option<&Model> {
        related(self, "Contact")
    }
}
