
use anyhow::Result;
use rust_decimal_macros::dec;
use serde_json::json;
use test_utils::{MockService, do_setup};
use xero_models::{
    Entity, Error, Filter, HasLines, Method,
    entities::{
        contact::Contact,
        invoice::{Invoice, Status, Type},
        line_item,
    },
};

const CREATED: &str = r#"<Response>
  <Id>e1b2c3</Id>
  <Status>OK</Status>
  <Invoices>
    <Invoice>
      <InvoiceID>243216c5-369e-4056-ac67-05388f86dc81</InvoiceID>
      <Type>ACCREC</Type>
      <Status>DRAFT</Status>
      <InvoiceNumber>INV-0042</InvoiceNumber>
      <Contact>
        <ContactID>025867f1-d741-4d6b-b1af-9ac774b59ba7</ContactID>
        <Name>City Agency</Name>
      </Contact>
      <LineItems>
        <LineItem>
          <Description>Widget</Description>
          <LineAmount>10.00</LineAmount>
        </LineItem>
        <LineItem>
          <Description>Gadget</Description>
          <LineAmount>5.50</LineAmount>
        </LineItem>
      </LineItems>
    </Invoice>
  </Invoices>
</Response>"#;

fn draft_invoice() -> Invoice {
    let mut invoice = Invoice::new().with_type(Type::AccountsReceivable);
    invoice.set_contact(Contact::new().with_name("City Agency"));
    invoice
        .add_line(line_item::make("Widget", dec!(10), json!({})))
        .unwrap();
    invoice
}

#[tokio::test]
async fn save_without_an_id_creates_with_put() -> Result<()> {
    do_setup();
    let service = MockService::xml().respond(200, CREATED);
    let mut invoice = draft_invoice();

    assert!(invoice.save(&service, &Filter::new()).await?);

    let request = service.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url, "https://api.xero.test/api.xro/2.0/Invoices");
    assert_eq!(
        request.body.as_deref(),
        Some(concat!(
            r#"<?xml version="1.0"?><Invoices><Invoice><Type>ACCREC</Type>"#,
            "<Contact><Name>City Agency</Name></Contact>",
            "<LineItems><LineItem><Quantity>1.00</Quantity><Description>Widget</Description>",
            "<LineAmount>10.00</LineAmount></LineItem></LineItems>",
            "</Invoice></Invoices>"
        ))
    );

    // the response hydrates the model in place
    assert_eq!(invoice.id_string().as_deref(), Some("243216c5-369e-4056-ac67-05388f86dc81"));
    assert_eq!(invoice.status(), Some(Status::Draft));
    assert_eq!(invoice.invoice_number(), Some("INV-0042"));
    assert_eq!(invoice.lines().map(|lines| lines.len()), Some(2));
    assert_eq!(invoice.line_items_total(), Some(dec!(15.50)));
    Ok(())
}

#[tokio::test]
async fn save_with_an_id_updates_with_post() -> Result<()> {
    do_setup();
    let service = MockService::xml().respond(200, CREATED);
    let mut invoice = draft_invoice();
    invoice.set_id("243216c5-369e-4056-ac67-05388f86dc81");

    assert!(invoice.save(&service, &Filter::new().param("unitdp", "4")).await?);

    let request = service.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, "https://api.xero.test/api.xro/2.0/Invoices");
    assert_eq!(request.param("unitdp"), Some("4"));
    assert!(request
        .body
        .unwrap()
        .contains("<InvoiceID>243216c5-369e-4056-ac67-05388f86dc81</InvoiceID>"));
    Ok(())
}

#[tokio::test]
async fn delete_requires_an_id_before_any_request() {
    do_setup();
    let service = MockService::xml().respond(200, CREATED);
    let mut invoice = draft_invoice();

    let err = invoice.delete(&service).await.unwrap_err();
    assert!(matches!(
        err,
        Error::MissingIdentifier { entity: "Invoice", field: "InvoiceID", .. }
    ));
    assert!(service.requests().is_empty());
    assert_eq!(invoice.attribute("Status"), None);
}

#[tokio::test]
async fn delete_posts_the_deleted_status() -> Result<()> {
    do_setup();
    let service = MockService::xml().respond(200, CREATED);
    let mut invoice = Invoice::from_attributes(json!({ "InvoiceID": "abc", "Status": "DRAFT" }));

    assert!(invoice.delete(&service).await?);

    let request = service.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, "https://api.xero.test/api.xro/2.0/Invoices");
    assert_eq!(
        request.body.as_deref(),
        Some(r#"<?xml version="1.0"?><Invoices><Invoice><InvoiceID>abc</InvoiceID><Status>DELETED</Status></Invoice></Invoices>"#)
    );
    Ok(())
}

#[tokio::test]
async fn find_returns_none_on_404() -> Result<()> {
    do_setup();
    let service = MockService::xml().respond(404, "The resource you're looking for cannot be found");

    let found = Invoice::find(&service, "missing").await?;
    assert!(found.is_none());
    assert_eq!(
        service.last_request().url,
        "https://api.xero.test/api.xro/2.0/Invoices/missing"
    );
    assert_eq!(service.last_request().method, Method::GET);
    Ok(())
}

#[tokio::test]
async fn unexpected_statuses_are_errors() {
    do_setup();
    let service = MockService::xml().respond(500, "<ApiException><Message>boom</Message></ApiException>");

    let err = Invoice::find(&service, "abc").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    match err {
        Error::RemoteService { status_code, url, response_body } => {
            assert_eq!(status_code, 500);
            assert_eq!(url, "https://api.xero.test/api.xro/2.0/Invoices/abc");
            assert!(response_body.contains("boom"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn mutations_report_404_as_false() -> Result<()> {
    do_setup();
    let service = MockService::xml();
    let mut invoice = draft_invoice();

    assert!(!invoice.save(&service, &Filter::new()).await?);
    assert_eq!(service.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn find_hydrates_from_json() -> Result<()> {
    do_setup();
    let service = MockService::json().respond(
        200,
        json!({
            "Id": "req",
            "Status": "OK",
            "Invoices": [{
                "InvoiceID": "abc",
                "Type": "ACCPAY",
                "Total": 42.5,
                "LineItems": [{ "LineAmount": 40.0 }, { "LineAmount": 2.5 }]
            }]
        })
        .to_string(),
    );

    let invoice = Invoice::find(&service, "abc").await?.expect("invoice");
    assert_eq!(invoice.invoice_type(), Some(Type::AccountsPayable));
    assert_eq!(invoice.total(), Some(dec!(42.5)));
    assert_eq!(invoice.line_items_total(), Some(dec!(42.5)));
    Ok(())
}

#[tokio::test]
async fn associate_puts_the_other_model_below_the_instance() -> Result<()> {
    do_setup();
    let service = MockService::xml().respond(200, "<Response><Status>OK</Status></Response>");
    let mut contact = Contact::from_attributes(json!({ "ContactID": "c-1" }));
    let invoice = Invoice::from_attributes(json!({ "InvoiceID": "i-1" }));

    assert!(contact.associate(&service, &invoice, &Filter::new()).await?);

    let request = service.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url, "https://api.xero.test/api.xro/2.0/Contacts/c-1/Invoices");
    assert_eq!(
        request.body.as_deref(),
        Some(r#"<?xml version="1.0"?><Invoices><Invoice><InvoiceID>i-1</InvoiceID></Invoice></Invoices>"#)
    );
    Ok(())
}

#[tokio::test]
async fn associate_needs_an_id() {
    do_setup();
    let service = MockService::xml();
    let mut contact = Contact::new();
    let invoice = Invoice::new();

    let err = contact
        .associate(&service, &invoice, &Filter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingIdentifier { entity: "Contact", .. }));
    assert!(service.requests().is_empty());
}
