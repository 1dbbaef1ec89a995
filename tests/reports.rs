
use anyhow::Result;
use serde_json::json;
use test_utils::{MockService, do_setup};
use time::macros::date;
use xero_models::{
    Entity, Filter, Model, Report,
    entities::{
        bank_statement::{self, BankStatement},
        report::ProfitAndLoss,
    },
};

const STATEMENT: &str = r#"<Response>
  <Status>OK</Status>
  <Reports>
    <Report>
      <ReportID>BankStatement</ReportID>
      <ReportName>Bank Statement</ReportName>
      <ReportDate>1 March 2024</ReportDate>
      <Rows>
        <Row><RowType>Header</RowType></Row>
        <Row><RowType>Section</RowType></Row>
      </Rows>
    </Report>
  </Reports>
</Response>"#;

#[tokio::test]
async fn bank_statements_pass_account_and_dates() -> Result<()> {
    do_setup();
    let service = MockService::xml().respond(200, STATEMENT);

    let attributes = bank_statement::get_array(
        &service,
        "13918178-849a-4823-9a31-57b7eac713d7",
        Some(date!(2024 - 02 - 01)),
        Some(date!(2024 - 02 - 29)),
    )
    .await?;

    let request = service.last_request();
    assert_eq!(
        request.url,
        "https://api.xero.test/api.xro/2.0/Reports/BankStatement"
    );
    assert_eq!(
        request.params,
        vec![
            ("BankAccountID".to_string(), "13918178-849a-4823-9a31-57b7eac713d7".to_string()),
            ("fromDate".to_string(), "2024-02-01".to_string()),
            ("toDate".to_string(), "2024-02-29".to_string()),
        ]
    );

    assert_eq!(attributes["ReportName"], json!("Bank Statement"));
    assert_eq!(
        attributes["Rows"],
        json!({ "Row": [{ "RowType": "Header" }, { "RowType": "Section" }] })
    );
    Ok(())
}

#[tokio::test]
async fn missing_statements_are_empty() -> Result<()> {
    do_setup();
    let service = MockService::xml();

    let attributes = bank_statement::get_array(&service, "abc", None, None).await?;
    assert!(attributes.is_empty());
    assert_eq!(service.last_request().params.len(), 1);
    Ok(())
}

#[tokio::test]
async fn reports_keep_their_payload_verbatim() -> Result<()> {
    do_setup();
    let service = MockService::json().respond(
        200,
        json!({
            "Reports": [{
                "ReportID": "ProfitAndLoss",
                "ReportName": "Profit and Loss",
                "ReportDate": "31 March 2024",
                "Rows": [{ "RowType": "Header", "Cells": [{ "Value": "" }] }],
                "Contact": { "Name": "not an entity here" }
            }]
        })
        .to_string(),
    );

    let report = ProfitAndLoss::fetch(&service, &Filter::new().param("periods", "3"))
        .await?
        .expect("report");

    assert_eq!(report.report_name(), Some("Profit and Loss"));
    assert_eq!(report.report_date(), Some("31 March 2024"));
    assert!(report.rows().is_some_and(serde_json::Value::is_array));
    assert!(report.relationships().is_empty());
    assert_eq!(report.attribute("Contact"), Some(&json!({ "Name": "not an entity here" })));
    assert_eq!(
        service.last_request().url,
        "https://api.xero.test/api.xro/2.0/Reports/ProfitAndLoss"
    );
    assert_eq!(service.last_request().param("periods"), Some("3"));
    Ok(())
}

#[tokio::test]
async fn statements_can_be_fetched_as_reports() -> Result<()> {
    do_setup();
    let service = MockService::xml().respond(200, STATEMENT);

    let statement = BankStatement::fetch(&service, &Filter::new()).await?.expect("statement");
    assert_eq!(statement.id_string().as_deref(), Some("BankStatement"));
    Ok(())
}

fn profit_and_loss_payload() -> String {
    json!({
        "Reports": [{
            "ReportID": "ProfitAndLoss",
            "ReportName": "Profit and Loss",
            "Contact": { "Name": "Ridgeway University" },
            "LineItems": [{ "LineAmount": "10.00" }]
        }]
    })
    .to_string()
}

fn assert_verbatim(report: &Model) {
    assert!(report.relationships().is_empty());
    assert_eq!(
        report.attribute("Contact"),
        Some(&json!({ "Name": "Ridgeway University" }))
    );
    assert_eq!(
        report.attribute("LineItems"),
        Some(&json!([{ "LineAmount": "10.00" }]))
    );
}

#[tokio::test]
async fn reports_never_resolve_nested_entities() -> Result<()> {
    do_setup();
    let service = MockService::json()
        .respond(200, profit_and_loss_payload())
        .respond(200, profit_and_loss_payload())
        .respond(200, profit_and_loss_payload())
        .respond(200, profit_and_loss_payload());

    let listed = ProfitAndLoss::get(&service, &Filter::new()).await?;
    assert_eq!(listed.len(), 1);
    listed.iter().for_each(assert_verbatim);

    let found = ProfitAndLoss::find(&service, "ProfitAndLoss").await?.expect("report");
    assert_verbatim(&found);

    let filtered = ProfitAndLoss::find_by(&service, &Filter::new()).await?;
    filtered.iter().for_each(assert_verbatim);

    let all = ProfitAndLoss::all(&service, &Filter::new()).await?;
    assert_eq!(all.len(), 1);
    assert_verbatim(&all[0]);

    let built = ProfitAndLoss::from_attributes(json!({
        "Contact": { "Name": "Ridgeway University" },
        "LineItems": [{ "LineAmount": "10.00" }]
    }));
    assert_verbatim(&built);
    Ok(())
}
