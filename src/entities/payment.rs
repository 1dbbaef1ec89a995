use rust_decimal::Decimal;
use time::Date;

use crate::model::{EntityKind, Model};

use super::{parse_date, related};

pub static KIND: EntityKind = EntityKind::collection(
    "Payments",
    "Payment",
    "PaymentID",
    &[
        "Date",
        "CurrencyRate",
        "Amount",
        "BankAmount",
        "Reference",
        "IsReconciled",
        "PaymentType",
        "UpdatedDateUTC",
        "BatchPaymentID",
        "HasAccount",
        "HasValidationErrors",
    ],
);

entity! {
    /// Applies money from an account against an invoice, credit note or prepayment.
    Payment => KIND
}

impl Payment {
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        self.decimal("Amount")
    }

    #[must_use]
    pub fn date(&self) -> Option<Date> {
        parse_date(self, "Date")
    }

    #[must_use]
    pub fn invoice(&self) -> Option<&Model> {
        related(self, "Invoice")
    }

    #[must_use]
    pub fn account(&self) -> Option<&Model> {
        related(self, "Account")
    }
}
