use std::fmt;

use serde_json::{Map, Value};
use time::{Date, macros::format_description};

use crate::{
    error::{Error, Result},
    filter::Filter,
    model::EntityKind,
    service::RemoteService,
};

use super::report::Report;

pub static KIND: EntityKind = EntityKind::report("BankStatement");

entity! {
    /// The statement lines imported for one bank account.
    BankStatement => KIND
}

impl Report for BankStatement {}

/// Fetches the statement of one bank account and returns its raw attributes,
/// or an empty map when there is none.
pub async fn get_array<S: RemoteService>(
    service: &S,
    bank_account_id: impl fmt::Display,
    from: Option<Date>,
    to: Option<Date>,
) -> Result<Map<String, Value>> {
    let mut params = Filter::new().param("BankAccountID", bank_account_id.to_string());
    if let Some(from) = from {
        params = params.param("fromDate", format_date(from)?);
    }
    if let Some(to) = to {
        params = params.param("toDate", format_date(to)?);
    }

    Ok(BankStatement::fetch(service, &params)
        .await?
        .map(|statement| statement.attributes().clone())
        .unwrap_or_default())
}

fn format_date(date: Date) -> Result<String> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| Error::InvalidDate(e.to_string()))
}
