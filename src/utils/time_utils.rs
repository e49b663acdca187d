use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};

// The content repository isn't very consistent with dates. Contentful
// date fields look like "2024-01-31T10:00+01:00" (no seconds), the date
// inputs of the front end send "2024-01-31", and our own comments use
// full RFC 3339 strings.
// chrono formatting reference:
// https://docs.rs/chrono/latest/chrono/format/strftime/index.html
const DATE_FORMAT_NO_SECONDS: &'static str = "%Y-%m-%dT%H:%M%:z";
const DATE_FORMAT_NAIVE: &'static str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT_NAIVE_NO_SECONDS: &'static str = "%Y-%m-%dT%H:%M";
const DATE_FORMAT_USCOMPACT: &'static str = "%Y-%m-%d";

// Truncated to milliseconds because that's all the comments file keeps.
pub fn current_datetime() -> DateTime<Utc> {
  Utc::now().trunc_subsecs(3)
}

/**
 * Try all the date formats we know about, most precise first.
 * Date-only values are midnight UTC and so are date-times that
 * came without an offset.
 */
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
  let value = value.trim();
  if let Ok(d) = DateTime::parse_from_rfc3339(value) {
    return Some(d.with_timezone(&Utc));
  }
  if let Ok(d) = DateTime::parse_from_str(value, DATE_FORMAT_NO_SECONDS) {
    return Some(d.with_timezone(&Utc));
  }
  if let Ok(d) = NaiveDateTime::parse_from_str(value, DATE_FORMAT_NAIVE)
    .or_else(|_| NaiveDateTime::parse_from_str(value, DATE_FORMAT_NAIVE_NO_SECONDS)) {
    return Some(d.and_utc());
  }
  NaiveDate::parse_from_str(value, DATE_FORMAT_USCOMPACT)
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|d| d.and_utc())
}

// Same thing as what JavaScript's toISOString() gives, which is
// what the comments file has always contained.
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
  date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
