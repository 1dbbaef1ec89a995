//! Reports are opaque documents: fetched with one `GET` from `Reports/<Name>` and
//! kept verbatim as attributes, without resolving nested entities.

use serde_json::Value;

use crate::{
    error::Result,
    filter::Filter,
    model::{EntityKind, Model},
    service::RemoteService,
};

use super::Entity;

pub static PROFIT_AND_LOSS: EntityKind = EntityKind::report("ProfitAndLoss");
pub static BALANCE_SHEET: EntityKind = EntityKind::report("BalanceSheet");
pub static TRIAL_BALANCE: EntityKind = EntityKind::report("TrialBalance");

/// Shared behaviour of every report type.
pub trait Report: Entity {
    /// Fetches the report; `Ok(None)` when Xero returns nothing or `404`.
    async fn fetch<S: RemoteService>(service: &S, params: &Filter) -> Result<Option<Self>> {
        Ok(Model::fetch_report(service, Self::KIND, params)
            .await?
            .map(Self::from))
    }

    fn report_name(&self) -> Option<&str> {
        self.as_ref().str("ReportName")
    }

    fn report_date(&self) -> Option<&str> {
        self.as_ref().str("ReportDate")
    }

    fn rows(&self) -> Option<&Value> {
        self.as_ref().attribute("Rows")
    }
}

entity! {
    ProfitAndLoss => PROFIT_AND_LOSS
}

entity! {
    BalanceSheet => BALANCE_SHEET
}

entity! {
    TrialBalance => TRIAL_BALANCE
}

impl Report for ProfitAndLoss {}
impl Report for BalanceSheet {}
impl Report for TrialBalance {}
