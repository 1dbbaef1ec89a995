use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::model::{EntityKind, Model};

use super::{HasLines, contact::Contact, line_item::LineAmountType, parse_date, parse_enum, related};

pub static KIND: EntityKind = EntityKind::collection(
    "Invoices",
    "Invoice",
    "InvoiceID",
    &[
        "Type",
        "Date",
        "DueDate",
        "DateString",
        "DueDateString",
        "LineAmountTypes",
        "InvoiceNumber",
        "Reference",
        "BrandingThemeID",
        "Url",
        "CurrencyCode",
        "CurrencyRate",
        "SentToContact",
        "ExpectedPaymentDate",
        "PlannedPaymentDate",
        "SubTotal",
        "TotalTax",
        "Total",
        "TotalDiscount",
        "HasAttachments",
        "IsDiscounted",
        "AmountDue",
        "AmountPaid",
        "AmountCredited",
        "FullyPaidOnDate",
        "UpdatedDateUTC",
        "RepeatingInvoiceID",
    ],
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    #[serde(rename = "ACCPAY")]
    AccountsPayable,

    #[serde(rename = "ACCREC")]
    AccountsReceivable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Draft,
    Submitted,
    Deleted,
    Authorised,
    Paid,
    Voided,
}

entity! {
    /// A sales invoice (`ACCREC`) or a bill (`ACCPAY`).
    Invoice => KIND
}

impl HasLines for Invoice {
    const LINES: &'static EntityKind = &super::line_item::KIND;
}

impl Invoice {
    #[must_use]
    pub fn invoice_type(&self) -> Option<Type> {
        parse_enum(self, "Type")
    }

    #[must_use]
    pub fn status(&self) -> Option<Status> {
        parse_enum(self, "Status")
    }

    #[must_use]
    pub fn line_amount_types(&self) -> Option<LineAmountType> {
        parse_enum(self, "LineAmountTypes")
    }

    #[must_use]
    pub fn invoice_number(&self) -> Option<&str> {
        self.str("InvoiceNumber")
    }

    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.str("Reference")
    }

    #[must_use]
    pub fn date(&self) -> Option<Date> {
        parse_date(self, "Date")
    }

    #[must_use]
    pub fn due_date(&self) -> Option<Date> {
        parse_date(self, "DueDate")
    }

    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.decimal("Total")
    }

    #[must_use]
    pub fn amount_due(&self) -> Option<Decimal> {
        self.decimal("AmountDue")
    }

    #[must_use]
    pub fn contact(&self) -> Option<&Model> {
        related(self, "Contact")
    }

    pub fn set_contact(&mut self, contact: Contact) -> &mut Self {
        self.set_attribute("Contact", contact);
        self
    }

    #[must_use]
    pub fn with_type(mut self, invoice_type: Type) -> Self {
        let value = match invoice_type {
            Type::AccountsPayable => "ACCPAY",
            Type::AccountsReceivable => "ACCREC",
        };
        self.set_attribute("Type", value);
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.set_attribute("Reference", reference.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: Date) -> Self {
        self.set_attribute("Date", date);
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, date: Date) -> Self {
        self.set_attribute("DueDate", date);
        self
    }
}
