use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::serde_utils;

// The persisted format and the API format are the same thing, the
// front end has always read the comments file shape directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  pub id: i64,
  pub post_slug: String,
  pub author: String,
  pub content: String,
  #[serde(with = "serde_utils::iso_millis")]
  pub date: DateTime<Utc>
}

// What we need to create a comment. The store decides
// about the id and the date.
#[derive(Debug, Clone)]
pub struct NewComment {
  pub post_slug: String,
  pub author: String,
  pub content: String
}
