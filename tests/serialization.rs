
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use test_utils::do_setup;
use xero_models::{
    Entity, Field, Format, HasLines, Model, markup,
    entities::{
        bank_transaction::{self, BankTransaction},
        contact::Contact,
        invoice::Invoice,
        line_item::{self, LineItem},
        manual_journal::ManualJournal,
    },
};

fn invoice_fixture() -> Value {
    json!({
        "InvoiceID": "243216c5-369e-4056-ac67-05388f86dc81",
        "Type": "ACCREC",
        "Reference": "Ref & Co",
        "Contact": { "ContactID": "c-1", "Name": "City Agency" },
        "LineItems": [
            { "Description": "Widget", "Quantity": "2.0000", "LineAmount": "10.00" },
            { "Description": "Gadget", "Quantity": "1.0000", "LineAmount": "5.50" }
        ],
        "Payments": [{ "PaymentID": "p-1", "Amount": "15.50" }]
    })
}

#[test]
fn serialized_maps_round_trip() {
    do_setup();
    let invoice = Invoice::from_attributes(invoice_fixture());

    let serialized = Value::Object(invoice.to_serialized_map());
    let restored = Invoice::from_attributes(serialized);

    assert_eq!(restored.attributes(), invoice.attributes());
    assert_eq!(restored, invoice);
}

#[test]
fn markup_round_trips_through_the_parser() {
    do_setup();
    let invoice = Invoice::from_attributes(invoice_fixture());

    let xml = invoice.to_markup(false).unwrap();
    assert!(xml.contains("<Reference>Ref &amp; Co</Reference>"));
    assert!(xml.contains("<Payments><Payment><PaymentID>p-1</PaymentID>"));

    let parsed = markup::parse(&xml, Format::Xml).unwrap();
    let restored = Invoice::from_attributes(parsed);

    assert_eq!(restored.attributes(), invoice.attributes());
    assert_eq!(restored.line_items_total(), Some(dec!(15.50)));
    match restored.field("Payments") {
        Some(Field::Many(payments)) => assert_eq!(payments.len(), 1),
        other => panic!("expected payments, got {other:?}"),
    }
}

#[test]
fn xml_and_json_responses_hydrate_alike() {
    do_setup();
    let xml = r#"<Response>
      <BankTransactions>
        <BankTransaction>
          <BankTransactionID>bt-1</BankTransactionID>
          <Type>SPEND</Type>
          <Contact><Name>Office Supplies</Name></Contact>
          <LineItems>
            <LineItem><Description>Paper</Description><LineAmount>12.00</LineAmount></LineItem>
          </LineItems>
        </BankTransaction>
      </BankTransactions>
    </Response>"#;
    let json = json!({
        "BankTransactions": [{
            "BankTransactionID": "bt-1",
            "Type": "SPEND",
            "Contact": { "Name": "Office Supplies" },
            "LineItems": [{ "Description": "Paper", "LineAmount": "12.00" }]
        }]
    });

    let from_xml = BankTransaction::from_attributes(markup::parse(xml, Format::Xml).unwrap());
    let from_json = BankTransaction::from_attributes(json);

    assert_eq!(from_xml, from_json);
    assert_eq!(from_xml.transaction_type(), Some(bank_transaction::Type::Spend));
    assert_eq!(from_xml.line_items_total(), Some(dec!(12)));
    assert_eq!(
        from_xml.contact().and_then(|contact| contact.str("Name")),
        Some("Office Supplies")
    );
}

#[test]
fn singular_markup_has_no_wrapper() {
    do_setup();
    let contact = Contact::new().with_name("Acme").with_email_address("ap@acme.test");
    assert_eq!(
        contact.to_markup(true).unwrap(),
        r#"<?xml version="1.0"?><Contact><Name>Acme</Name><EmailAddress>ap@acme.test</EmailAddress></Contact>"#
    );
}

#[test]
fn json_output_nests_relationships() {
    do_setup();
    let mut transaction = BankTransaction::new();
    transaction.set_attribute("Type", "RECEIVE");
    transaction
        .add_line(line_item::make("Refund", dec!(3.5), json!({ "AccountCode": "200" })))
        .unwrap();

    let output: Value = serde_json::from_str(&transaction.to_json()).unwrap();
    assert_eq!(
        output,
        json!({
            "Type": "RECEIVE",
            "LineItems": {
                "LineItem": [{
                    "AccountCode": "200",
                    "Quantity": "1.00",
                    "Description": "Refund",
                    "LineAmount": "3.50"
                }]
            }
        })
    );
    assert_eq!(transaction.to_string(), transaction.to_json());
}

#[test]
fn journals_and_lines_use_their_own_kinds() {
    do_setup();
    let journal = ManualJournal::from_attributes(json!({
        "Narration": "Accrual",
        "JournalLines": { "JournalLine": [{ "LineAmount": "100" }, { "LineAmount": "-100" }] }
    }));
    assert_eq!(journal.lines().map(|lines| lines.singular_name()), Some("JournalLine"));
    assert_eq!(journal.line_items_total(), Some(dec!(0)));

    let stray: Model = LineItem::new().into();
    let mut journal = journal;
    assert!(journal.add_line(stray).is_err());
}

#[test]
fn entities_without_lines_total_to_none() {
    do_setup();
    let transaction = BankTransaction::from_attributes(json!({ "Type": "SPEND", "LineItems": [] }));
    assert_eq!(transaction.line_items_total(), None);
    assert!(bank_transaction::KIND.is_known_field("IsReconciled"));
}
