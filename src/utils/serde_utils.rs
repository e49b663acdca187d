// Query strings coming from HTML forms carry empty strings for
// fields that weren't filled. These should be None.
// I tried the deserialize_with way at some point but plain old
// functions on the DTO side are easier to follow.
pub fn empty_string_to_none(value: Option<String>) -> Option<String> {
  match value {
    Some(s) => if s.trim().is_empty()
      { None } else { Some(s) },
    None => None
  }
}

// To be used with:
// #[serde(with = "serde_utils::iso_millis")]
// Default chrono serialization outputs nanoseconds, which doesn't
// look like what the comments file used to contain.
pub mod iso_millis {
  use chrono::{DateTime, Utc};
  use serde::{de::Error, Deserialize, Deserializer, Serializer};
  use crate::utils::time_utils;

  pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&time_utils::to_iso_string(date))
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    time_utils::parse_date(&s)
      .ok_or_else(|| D::Error::custom(format!("invalid date: {}", s)))
  }
}

// Same thing for dates that might not be there, which
// serialize as null:
// #[serde(default, with = "serde_utils::iso_millis_option")]
pub mod iso_millis_option {
  use chrono::{DateTime, Utc};
  use serde::{de::Error, Deserialize, Deserializer, Serializer};
  use crate::utils::time_utils;

  pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match date {
      Some(date) => serializer.serialize_some(&time_utils::to_iso_string(date)),
      None => serializer.serialize_none()
    }
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
  where
    D: Deserializer<'de>,
  {
    match Option::<String>::deserialize(deserializer)? {
      Some(s) => time_utils::parse_date(&s)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("invalid date: {}", s))),
      None => Ok(None)
    }
  }
}
