use time::Date;

use crate::model::EntityKind;

use super::{HasLines, parse_date};

pub static KIND: EntityKind = EntityKind::collection(
    "Journals",
    "Journal",
    "JournalID",
    &[
        "JournalDate",
        "JournalNumber",
        "CreatedDateUTC",
        "Reference",
        "SourceID",
        "SourceType",
    ],
);

entity! {
    /// A read-only ledger journal produced by any posted transaction.
    Journal => KIND
}

impl HasLines for Journal {
    const LINES: &'static EntityKind = &super::journal_line::KIND;
}

impl Journal {
    #[must_use]
    pub fn journal_number(&self) -> Option<&str> {
        self.str("JournalNumber")
    }

    #[must_use]
    pub fn journal_date(&self) -> Option<Date> {
        parse_date(self, "JournalDate")
    }

    #[must_use]
    pub fn source_type(&self) -> Option<&str> {
        self.str("SourceType")
    }
}
