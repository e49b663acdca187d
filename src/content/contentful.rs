use async_trait::async_trait;
use color_eyre::Result;
use eyre::WrapErr;
use log::debug;
use serde::Deserialize;
use crate::config::ContentfulSettings;
use super::{Post, PostFields, PostRepository};

// Contentful won't give more than that per request anyway.
const PAGE_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct EntryCollection {
  #[serde(default)]
  items: Vec<Entry>,
  #[serde(default)]
  total: usize
}

#[derive(Debug, Deserialize)]
struct Entry {
  #[serde(default)]
  fields: PostFields
}

impl EntryCollection {
  fn into_posts(self) -> Vec<Post> {
    self.items
      .into_iter()
      .filter_map(|e| e.fields.into_post())
      .collect()
  }
}

/**
 * Client for the Contentful delivery API. Entries of the configured
 * content type are mapped to posts.
 */
pub struct ContentfulRepository {
  client: reqwest::Client,
  entries_url: String,
  access_token: String,
  content_type: String
}

impl ContentfulRepository {

  pub fn new(settings: ContentfulSettings) -> Self {
    Self {
      client: reqwest::Client::new(),
      entries_url: format!(
        "{}/spaces/{}/environments/{}/entries",
        settings.api_url.trim_end_matches('/'),
        settings.space_id,
        settings.environment
      ),
      access_token: settings.access_token,
      content_type: settings.content_type
    }
  }

  async fn fetch_entries(
    &self,
    extra_params: &[(&str, &str)],
    skip: usize,
    limit: usize
  ) -> Result<EntryCollection> {
    let skip = skip.to_string();
    let limit = limit.to_string();
    let mut params: Vec<(&str, &str)> = vec![
      ("content_type", self.content_type.as_str()),
      ("order", "-fields.date"),
      ("skip", skip.as_str()),
      ("limit", limit.as_str())
    ];
    params.extend_from_slice(extra_params);
    debug!("Fetching entries from {} with {:?}", self.entries_url, params);

    self.client.get(&self.entries_url)
      .bearer_auth(&self.access_token)
      .query(&params)
      .send()
      .await
      .context("Contacting Contentful")?
      .error_for_status()
      .context("Contentful responded with an error status")?
      .json::<EntryCollection>()
      .await
      .context("Parsing Contentful entries")
  }

}

#[async_trait]
impl PostRepository for ContentfulRepository {

  // The API pages its results, keep asking until we've seen
  // as many entries as it says there are.
  async fn all_posts(&self) -> Result<Vec<Post>> {
    let mut posts = Vec::new();
    let mut skip = 0;
    loop {
      let collection = self.fetch_entries(&[], skip, PAGE_LIMIT).await?;
      let received = collection.items.len();
      let total = collection.total;
      posts.extend(collection.into_posts());
      skip += received;
      if received == 0 || skip >= total {
        break;
      }
    }
    Ok(posts)
  }

  async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
    let collection = self.fetch_entries(&[("fields.slug", slug)], 0, 1).await?;
    Ok(collection.into_posts().into_iter().next())
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_the_entries_url() {
    let repository = ContentfulRepository::new(ContentfulSettings {
      api_url: "https://cdn.contentful.com/".to_string(),
      space_id: "abc123".to_string(),
      environment: "master".to_string(),
      access_token: "token".to_string(),
      content_type: "blogPage".to_string()
    });
    assert_eq!(
      "https://cdn.contentful.com/spaces/abc123/environments/master/entries",
      repository.entries_url
    );
  }

  #[test]
  fn maps_entry_collection_to_posts() {
    let json = r#"{
      "sys": { "type": "Array" },
      "total": 2,
      "skip": 0,
      "limit": 100,
      "items": [
        {
          "sys": { "id": "1" },
          "fields": {
            "title": "Hello",
            "author": "Jane",
            "date": "2024-01-10T09:00+00:00",
            "slug": "hello",
            "content": {
              "nodeType": "document",
              "data": {},
              "content": [{
                "nodeType": "paragraph",
                "data": {},
                "content": [{ "nodeType": "text", "value": "Body", "marks": [], "data": {} }]
              }]
            }
          }
        },
        {
          "sys": { "id": "2" },
          "fields": { "title": "Draft without slug", "date": "2024-01-09" }
        }
      ]
    }"#;
    let collection: EntryCollection = serde_json::from_str(json).unwrap();
    assert_eq!(2, collection.total);
    let posts = collection.into_posts();
    assert_eq!(1, posts.len());
    assert_eq!("hello", posts[0].slug);
    assert_eq!("Body", posts[0].content.to_plain_text());
  }
}
