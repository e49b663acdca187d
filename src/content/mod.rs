use async_trait::async_trait;
use chrono::{DateTime, Utc};
use color_eyre::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::utils::{serde_utils, time_utils};
pub mod rich_text;
pub mod contentful;
pub mod file;
use rich_text::Node;

// Posts are owned by the content repository, we never write them.
// Editors can leave the date empty, such posts are still listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
  pub title: String,
  pub author: String,
  #[serde(default, with = "serde_utils::iso_millis_option")]
  pub date: Option<DateTime<Utc>>,
  #[serde(default)]
  pub content: Node,
  pub slug: String
}

// Post fields the way the repository hands them over. Editors can
// leave pretty much anything empty so it's all optional here.
// Content stays a raw JSON value until we look at it, one broken
// document shouldn't take the whole collection down with it.
#[derive(Debug, Default, Deserialize)]
pub struct PostFields {
  pub title: Option<String>,
  pub author: Option<String>,
  pub date: Option<String>,
  pub content: Option<Value>,
  pub slug: Option<String>
}

// Older entries have their content as a plain string, that becomes
// a single paragraph. Anything we can't read is an empty document.
fn content_to_document(slug: &str, content: Option<Value>) -> Node {
  match content {
    None | Some(Value::Null) => Node::default(),
    Some(Value::String(text)) => Node::Document {
      content: vec![Node::Paragraph {
        content: vec![Node::Text { value: text, marks: Vec::new() }]
      }]
    },
    Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
      warn!("Unreadable content for post {}, showing it empty - {}", slug, e);
      Node::default()
    })
  }
}

impl PostFields {

  // Posts without a slug can't be linked to, they get skipped.
  pub fn into_post(self) -> Option<Post> {
    let title = self.title.unwrap_or_default();
    let slug = match self.slug {
      Some(slug) if !slug.is_empty() => slug,
      _ => {
        warn!("Skipping post \"{}\" because it has no slug", title);
        return None;
      }
    };
    let date = self.date.as_deref().and_then(time_utils::parse_date);
    if date.is_none() {
      warn!("Post {} has no usable date: {:?}", slug, self.date);
    }
    let content = content_to_document(&slug, self.content);
    Some(Post {
      title,
      author: self.author.unwrap_or_default(),
      date,
      content,
      slug
    })
  }

}

/**
 * Where posts come from. The listing wants them newest first.
 */
#[async_trait]
pub trait PostRepository: Send + Sync {
  async fn all_posts(&self) -> Result<Vec<Post>>;
  async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>>;
}

// Undated posts go last.
pub fn sort_newest_first(posts: &mut Vec<Post>) {
  posts.sort_by(|a, b| b.date.cmp(&a.date));
}

// Handy for tests, a fixed list of posts is a repository too.
#[cfg(test)]
#[async_trait]
impl PostRepository for Vec<Post> {
  async fn all_posts(&self) -> Result<Vec<Post>> {
    Ok(self.clone())
  }

  async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
    Ok(self.iter().find(|p| p.slug == slug).cloned())
  }
}
