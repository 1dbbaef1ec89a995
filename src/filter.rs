//! Query parameters for collection reads.
//!
//! A [`Filter`] is a consuming builder over an ordered parameter list. Clauses added
//! with [`Filter::r#where`] and friends are glued into Xero's `where` expression
//! language; everything else is a flat key/value pass-through.
//!
//! ```
//! use xero_models::{Direction, Filter};
//!
//! let filter = Filter::new()
//!     .r#where("Status", "AUTHORISED")
//!     .or_where("Status", "PAID")
//!     .order_by("Date", Direction::Desc);
//!
//! assert_eq!(filter.get("where"), Some(r#"Status=="AUTHORISED" OR Status=="PAID""#));
//! assert_eq!(filter.get("order"), Some("Date DESC"));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::{
    error::Result,
    utils::date_format::{format_http_date, parse_datetime},
};

pub const WHERE: &str = "where";
pub const ORDER: &str = "order";
pub const PAGE: &str = "page";
pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";

/// Sort direction for [`Filter::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// A right-hand side in a `where` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(String),
    Bool(bool),
    Guid(Uuid),
    Date(Date),
    Null,
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "\"{}\"", text.replace('"', "\\\"")),
            Self::Number(number) => f.write_str(number),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Guid(id) => write!(f, "Guid(\"{id}\")"),
            Self::Date(date) => write!(
                f,
                "DateTime({}, {:02}, {:02})",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<Decimal> for FilterValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}

impl From<Date> for FilterValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Anything [`Filter::modified_since`] accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ModifiedSince {
    /// Seconds since the Unix epoch.
    Timestamp(i64),
    /// Any string [`parse_datetime`] understands.
    Text(String),
    DateTime(OffsetDateTime),
    Date(Date),
}

impl ModifiedSince {
    fn resolve(self) -> Result<OffsetDateTime> {
        match self {
            Self::Timestamp(seconds) => OffsetDateTime::from_unix_timestamp(seconds)
                .map_err(|e| crate::Error::InvalidDate(format!("{seconds}: {e}"))),
            Self::Text(text) => parse_datetime(&text),
            Self::DateTime(datetime) => Ok(datetime),
            Self::Date(date) => Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc()),
        }
    }
}

impl From<i64> for ModifiedSince {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

impl From<&str> for ModifiedSince {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ModifiedSince {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<OffsetDateTime> for ModifiedSince {
    fn from(value: OffsetDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Date> for ModifiedSince {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

/// Ordered query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    params: Vec<(String, String)>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `field=="value"`, joined to earlier clauses with `AND`.
    #[must_use]
    pub fn r#where(self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.clause("AND", format!("{field}=={}", value.into()))
    }

    /// `field=="value"`, joined to earlier clauses with `OR`.
    #[must_use]
    pub fn or_where(self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.clause("OR", format!("{field}=={}", value.into()))
    }

    #[must_use]
    pub fn contains(self, field: &str, value: &str) -> Self {
        self.clause("AND", method_call(field, "Contains", value))
    }

    #[must_use]
    pub fn or_contains(self, field: &str, value: &str) -> Self {
        self.clause("OR", method_call(field, "Contains", value))
    }

    #[must_use]
    pub fn starts_with(self, field: &str, value: &str) -> Self {
        self.clause("AND", method_call(field, "StartsWith", value))
    }

    #[must_use]
    pub fn or_starts_with(self, field: &str, value: &str) -> Self {
        self.clause("OR", method_call(field, "StartsWith", value))
    }

    #[must_use]
    pub fn ends_with(self, field: &str, value: &str) -> Self {
        self.clause("AND", method_call(field, "EndsWith", value))
    }

    #[must_use]
    pub fn or_ends_with(self, field: &str, value: &str) -> Self {
        self.clause("OR", method_call(field, "EndsWith", value))
    }

    /// `field!=null`.
    #[must_use]
    pub fn not_null(self, field: &str) -> Self {
        self.clause("AND", format!("{field}!=null"))
    }

    #[must_use]
    pub fn or_not_null(self, field: &str) -> Self {
        self.clause("OR", format!("{field}!=null"))
    }

    /// Only return records changed after `since`, sent as `If-Modified-Since`.
    pub fn modified_since(self, since: impl Into<ModifiedSince>) -> Result<Self> {
        let header = format_http_date(since.into().resolve()?)?;
        Ok(self.param(IF_MODIFIED_SINCE, header))
    }

    /// Replaces any earlier ordering.
    #[must_use]
    pub fn order_by(self, field: &str, direction: Direction) -> Self {
        self.param(ORDER, format!("{field} {direction}"))
    }

    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param(PAGE, page.to_string())
    }

    /// Sets a raw parameter, replacing an earlier value for the same key in place.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key, value)),
        }
        self
    }

    fn clause(self, glue: &str, clause: String) -> Self {
        let expression = match self.get(WHERE) {
            Some(existing) if !existing.is_empty() => format!("{existing} {glue} {clause}"),
            _ => clause,
        };
        self.param(WHERE, expression)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// The accumulated parameters, in insertion order.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        self.params.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn method_call(field: &str, method: &str, value: &str) -> String {
    format!("{field}.{method}({})", FilterValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use time::macros::{date, datetime};

    #[test]
    fn where_clauses_glue_in_order() {
        let filter = Filter::new().r#where("Name", "John").or_where("Name", "Jane");
        assert_eq!(filter.get(WHERE), Some(r#"Name=="John" OR Name=="Jane""#));

        let filter = Filter::new()
            .r#where("Type", "ACCREC")
            .r#where("AmountDue", 0)
            .r#where("IsDiscounted", false)
            .r#where("Reference", None::<&str>);
        assert_eq!(
            filter.get(WHERE),
            Some(r#"Type=="ACCREC" AND AmountDue==0 AND IsDiscounted==false AND Reference==null"#)
        );
    }

    #[test]
    fn string_predicates_use_method_calls() {
        assert_eq!(
            Filter::new().contains("Name", "Smith").get(WHERE),
            Some(r#"Name.Contains("Smith")"#)
        );
        let filter = Filter::new()
            .starts_with("Name", "A")
            .or_ends_with("Name", "z")
            .not_null("EmailAddress");
        assert_eq!(
            filter.get(WHERE),
            Some(r#"Name.StartsWith("A") OR Name.EndsWith("z") AND EmailAddress!=null"#)
        );
    }

    #[test]
    fn typed_values_render_in_the_query_language() {
        let id = Uuid::nil();
        let filter = Filter::new()
            .r#where("Contact.ContactID", id)
            .r#where("Date", date!(2024 - 03 - 05))
            .r#where("Name", r#"Say "hi""#);
        assert_eq!(
            filter.get(WHERE),
            Some(
                r#"Contact.ContactID==Guid("00000000-0000-0000-0000-000000000000") AND Date==DateTime(2024, 03, 05) AND Name=="Say \"hi\"""#
            )
        );
    }

    #[test]
    fn last_order_wins_and_keys_keep_their_position() {
        let filter = Filter::new()
            .order_by("Name", Direction::Asc)
            .page(2)
            .order_by("Date", Direction::Desc);
        assert_eq!(
            filter.params(),
            vec![
                ("order".to_string(), "Date DESC".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn modified_since_normalizes_every_input() {
        let expected = Some("Mon, 02 Jan 2006 15:04:05 GMT");
        let inputs: Vec<ModifiedSince> = vec![
            1_136_214_245_i64.into(),
            "2006-01-02T15:04:05Z".into(),
            "2006-01-02 15:04:05".into(),
            datetime!(2006-01-02 16:04:05 +01:00).into(),
        ];
        for input in inputs {
            let filter = Filter::new().modified_since(input).unwrap();
            assert_eq!(filter.get(IF_MODIFIED_SINCE), expected);
        }

        let filter = Filter::new().modified_since(date!(2006 - 01 - 02)).unwrap();
        assert_eq!(filter.get(IF_MODIFIED_SINCE), Some("Mon, 02 Jan 2006 00:00:00 GMT"));
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        let err = Filter::new().modified_since("last tuesday").unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
    }
}
