use time::Date;

use crate::model::EntityKind;

use super::{HasLines, parse_date};

pub static KIND: EntityKind = EntityKind::collection(
    "ManualJournals",
    "ManualJournal",
    "ManualJournalID",
    &[
        "Narration",
        "Date",
        "LineAmountTypes",
        "Url",
        "ShowOnCashBasisReports",
        "HasAttachments",
        "UpdatedDateUTC",
    ],
);

entity! {
    /// A hand-entered journal; its lines must balance to zero.
    ManualJournal => KIND
}

impl HasLines for ManualJournal {
    const LINES: &'static EntityKind = &super::journal_line::KIND;
}

impl ManualJournal {
    #[must_use]
    pub fn narration(&self) -> Option<&str> {
        self.str("Narration")
    }

    #[must_use]
    pub fn date(&self) -> Option<Date> {
        parse_date(self, "Date")
    }

    #[must_use]
    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.set_attribute("Narration", narration.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: Date) -> Self {
        self.set_attribute("Date", date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Entity, journal_line};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn balanced_journals_total_zero() {
        let mut journal = ManualJournal::new().with_narration("Accrual");
        journal
            .add_line(journal_line::make("Debit", dec!(250), "400", json!({})))
            .unwrap()
            .add_line(journal_line::make("Credit", dec!(-250), "800", json!({})))
            .unwrap();

        assert_eq!(journal.line_items_total(), Some(dec!(0)));
        assert_eq!(journal.narration(), Some("Accrual"));
    }
}
