//! # xero-models
//!
//! An active-record style model layer for the Xero accounting API.
//!
//! Entities are dynamic [`Model`]s: ordered attributes plus related entities,
//! hydrated from whatever Xero returns (XML or JSON) and serialized back to the
//! XML documents Xero expects. Typed wrappers such as
//! [`Invoice`](entities::invoice::Invoice) add getters on top, and every model
//! talks to the API through a [`RemoteService`], normally a [`Client`].
//!
//! ```no_run
//! use rust_decimal_macros::dec;
//! use serde_json::json;
//! use xero_models::{
//!     Client, Config, Filter, HasLines, Scope,
//!     entities::{Entity, contact::Contact, invoice::{Invoice, Type}, line_item},
//! };
//!
//! # async fn run() -> xero_models::Result<()> {
//! let client = Client::from_client_credentials(Config::from_env()?, Scope::all_accounting()).await?;
//!
//! let mut invoice = Invoice::new().with_type(Type::AccountsReceivable);
//! invoice.set_contact(Contact::new().with_name("Ridgeway University"));
//! invoice.add_line(line_item::make("Consulting", dec!(150), json!({ "AccountCode": "200" })))?;
//! invoice.save(&client, &Filter::new()).await?;
//!
//! let drafts = Invoice::get(&client, &Filter::new().r#where("Status", "DRAFT")).await?;
//! for draft in &drafts {
//!     println!("{}", draft.to_json());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Everything is instrumented with `tracing`; request and response bodies are
//! logged at `trace`, statuses at `debug`, and configuration problems and
//! unexpected responses at `error`. Install any subscriber to see them.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, async_fn_in_trait)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod config;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod filter;
pub mod markup;
pub mod model;
pub mod oauth;
pub mod scope;
pub mod service;

pub mod utils {
    pub mod date_format;
}

pub use client::{Client, RateLimitInfo};
pub use config::Config;
pub use endpoints::ApiSection;
pub use entities::{Entity, HasLines, report::Report};
pub use error::{Error, Result};
pub use filter::{Direction, Filter, FilterValue, ModifiedSince};
pub use model::{Attribute, Collection, EntityKind, Field, Model, Relationship};
pub use oauth::KeyPair;
pub use scope::{Permission, Scope, ScopeType};
pub use service::{Format, Method, RemoteResponse, RemoteService};
