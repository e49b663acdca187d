use async_trait::async_trait;
use color_eyre::Result;
use eyre::WrapErr;
use std::path::PathBuf;
use super::{sort_newest_first, Post, PostFields, PostRepository};

// Reads posts from a JSON array of post fields, the same
// shape Contentful uses for entry fields. The file is read
// again on every call so it can be edited while running.
pub struct FilePostRepository {
  path: PathBuf
}

impl FilePostRepository {
  pub fn new<P: Into<PathBuf>>(path: P) -> Self {
    Self { path: path.into() }
  }

  async fn load(&self) -> Result<Vec<Post>> {
    let data = tokio::fs::read_to_string(&self.path)
      .await
      .with_context(|| format!("Reading posts from {}", self.path.display()))?;
    let fields: Vec<PostFields> = serde_json::from_str(&data)
      .with_context(|| format!("Parsing posts from {}", self.path.display()))?;
    let mut posts: Vec<Post> = fields.into_iter()
      .filter_map(PostFields::into_post)
      .collect();
    sort_newest_first(&mut posts);
    Ok(posts)
  }
}

#[async_trait]
impl PostRepository for FilePostRepository {
  async fn all_posts(&self) -> Result<Vec<Post>> {
    self.load().await
  }

  async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
    Ok(self.load().await?.into_iter().find(|p| p.slug == slug))
  }
}
