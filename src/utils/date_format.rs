use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time,
    format_description::well_known::{Rfc2822, Rfc3339},
    macros::format_description,
};

use crate::error::{Error, Result};

// Extracts the millisecond timestamp out of Xero's .NET JSON form: /Date(1439434356790+0000)/
fn dotnet_millis(value: &str) -> Option<i64> {
    let inner = value.strip_prefix("/Date(")?.strip_suffix(")/")?;
    let end = inner
        .get(1..)?
        .find(['+', '-'])
        .map_or(inner.len(), |offset| offset + 1);
    inner[..end].parse().ok()
}

/// Parses any timestamp Xero hands out, or a caller is likely to pass in.
///
/// Accepts the .NET `/Date(ms)/` form, RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM:SS`
/// with or without fractional seconds, `YYYY-MM-DD HH:MM:SS` and a bare
/// `YYYY-MM-DD`. Values without an offset are taken as UTC.
pub fn parse_datetime(value: &str) -> Result<OffsetDateTime> {
    let value = value.trim();

    if let Some(millis) = dotnet_millis(value) {
        return OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map_err(|e| Error::InvalidDate(format!("{value}: {e}")));
    }

    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc2822) {
        return Ok(dt);
    }

    // e.g. "2025-03-03T06:17:25.8448470"
    let fractional = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    let iso = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let spaced = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    for format in [fractional, iso, spaced] {
        if let Ok(dt) = PrimitiveDateTime::parse(value, format) {
            return Ok(dt.assume_utc());
        }
    }

    if let Ok(date) = Date::parse(value, &format_description!("[year]-[month]-[day]")) {
        return Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc());
    }

    Err(Error::InvalidDate(value.to_string()))
}

/// Parses a calendar date, dropping any time component.
pub fn parse_date(value: &str) -> Result<Date> {
    parse_datetime(value).map(OffsetDateTime::date)
}

/// Formats a timestamp for the `If-Modified-Since` header: `Mon, 02 Jan 2006 15:04:05 GMT`.
pub fn format_http_date(datetime: OffsetDateTime) -> Result<String> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    datetime
        .to_offset(time::UtcOffset::UTC)
        .format(&format)
        .map_err(|e| Error::InvalidDate(e.to_string()))
}
