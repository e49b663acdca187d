use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::content::Post;
use crate::posts::filters::PostFilters;
use crate::posts::listing::Page;
use crate::store::entities::NewComment;
use crate::utils::{serde_utils, time_utils};
use super::error::Error;

// Comments go out exactly the way they're stored.
pub use crate::store::entities::Comment as CommentDto;

/* --- Request body or query objects --- */
// Everything is optional so that a missing field gets our
// own 400 message instead of a deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
  pub post_slug: Option<String>,
  pub author: Option<String>,
  pub content: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdateForm {
  pub id: Option<i64>,
  pub content: Option<String>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQuery {
  pub post_slug: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct DeleteCommentQuery {
  pub id: Option<i64>
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
  pub author: Option<String>,
  pub start_date: Option<String>,
  pub end_date: Option<String>
}

// Can't use serde flatten with PostsQuery in there, it doesn't
// get along with query strings and numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSearchQuery {
  pub author: Option<String>,
  pub start_date: Option<String>,
  pub end_date: Option<String>,
  pub q: Option<String>,
  pub page: Option<usize>
}
/* --- End request body or query objects --- */

// Empty strings count as missing, same as not sending
// the field at all.
fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

impl TryFrom<CommentForm> for NewComment {
  type Error = Error;

  fn try_from(form: CommentForm) -> Result<Self, Self::Error> {
    match (non_empty(form.post_slug), non_empty(form.author), non_empty(form.content)) {
      (Some(post_slug), Some(author), Some(content)) => Ok(NewComment {
        post_slug,
        author,
        content
      }),
      _ => Err(Error::BadRequest(String::from(
        "Missing required fields: postSlug, author, and content are required."
      )))
    }
  }
}

impl CommentUpdateForm {
  // Ids start at 1, a zero id in the body is the same as no id.
  pub fn validate(self) -> Result<(i64, String), Error> {
    match (self.id.filter(|id| *id != 0), non_empty(self.content)) {
      (Some(id), Some(content)) => Ok((id, content)),
      _ => Err(Error::BadRequest(String::from(
        "Missing required fields: id and new content are required."
      )))
    }
  }
}

impl CommentsQuery {
  pub fn validate(self) -> Result<String, Error> {
    non_empty(self.post_slug).ok_or_else(|| Error::BadRequest(String::from(
      "postSlug query parameter is required."
    )))
  }
}

impl DeleteCommentQuery {
  pub fn validate(&self) -> Result<i64, Error> {
    self.id.ok_or_else(|| Error::BadRequest(String::from(
      "id query parameter is required."
    )))
  }
}

fn parse_bound(name: &str, value: Option<String>) -> Result<Option<DateTime<Utc>>, Error> {
  match serde_utils::empty_string_to_none(value) {
    Some(value) => time_utils::parse_date(&value)
      .map(Some)
      .ok_or_else(|| Error::BadRequest(format!("Invalid {}: {}", name, value))),
    None => Ok(None)
  }
}

fn filters_from(
  author: Option<String>,
  start_date: Option<String>,
  end_date: Option<String>
) -> Result<PostFilters, Error> {
  Ok(PostFilters {
    author: serde_utils::empty_string_to_none(author),
    start_date: parse_bound("startDate", start_date)?,
    end_date: parse_bound("endDate", end_date)?
  })
}

impl TryFrom<PostsQuery> for PostFilters {
  type Error = Error;

  fn try_from(query: PostsQuery) -> Result<Self, Self::Error> {
    filters_from(query.author, query.start_date, query.end_date)
  }
}

impl PostSearchQuery {
  // Splits the query into the filters and what's left
  // for the listing: search text and page.
  pub fn into_parts(self) -> Result<(PostFilters, String, usize), Error> {
    let filters = filters_from(self.author, self.start_date, self.end_date)?;
    Ok((filters, self.q.unwrap_or_default(), self.page.unwrap_or(1)))
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPageDto {
  pub posts: Vec<Post>,
  pub current_page: usize,
  pub total_pages: usize,
  pub total_posts: usize
}

impl From<Page<&Post>> for PostPageDto {
  fn from(page: Page<&Post>) -> Self {
    Self {
      posts: page.items.into_iter().cloned().collect(),
      current_page: page.current_page,
      total_pages: page.total_pages,
      total_posts: page.total_items
    }
  }
}

// Used as the body of every error response.
#[derive(Debug, Deserialize, Serialize)]
pub struct JsonMessage {
  pub message: String
}

impl JsonMessage {
  pub fn new(message: &str) -> Self {
    Self {
      message: String::from(message)
    }
  }
}
