// Adding the context method to errors:
use eyre::{WrapErr, eyre};
use color_eyre::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
  pub bind_address: String,
  pub comments_path: String,
  // Shared secret every API call has to present, and the
  // header it has to be in:
  pub api_key: String,
  pub api_key_header: String,
  pub posts_per_page: usize,
  // Origin of the front end, for CORS:
  pub allowed_origin: String,
  // When set, posts are read from this JSON file instead
  // of Contentful. Mostly for local development.
  #[serde(default)]
  pub posts_path: Option<String>,
  #[serde(default)]
  pub contentful_space_id: Option<String>,
  #[serde(default)]
  pub contentful_access_token: Option<String>,
  pub contentful_environment: String,
  pub contentful_content_type: String,
  pub contentful_api_url: String
}

// Everything the Contentful client needs and nothing else,
// same idea as not moving the whole config around the app
// because of the secrets in there.
#[derive(Debug, Clone)]
pub struct ContentfulSettings {
  pub api_url: String,
  pub space_id: String,
  pub environment: String,
  pub access_token: String,
  pub content_type: String
}

#[derive(Debug, Clone)]
pub enum ContentSource {
  Contentful(ContentfulSettings),
  File(PathBuf)
}

impl Config {

  pub fn from_env() -> Result<Config> {
    // RUST_LOG is already set in main.rs if it
    // was absent.
    // You have to use lowercase when compared to
    // what's in the .env file.
    let c = config::Config::builder()
      .set_default("bind_address", "127.0.0.1:8080")?
      .set_default("comments_path", "./data/comments.json")?
      .set_default("api_key_header", "x-api-key")?
      .set_default("posts_per_page", 3)?
      .set_default("allowed_origin", "http://localhost:3000")?
      .set_default("contentful_environment", "master")?
      .set_default("contentful_content_type", "blogPage")?
      .set_default("contentful_api_url", "https://cdn.contentful.com")?
      .add_source(config::Environment::default())
      .build()
      .context("Loading configuration from env")?;
    // The error has to be given a context for
    // color_eyre to work here:
    let config: Config = c.try_deserialize()
      .context("Deserializing configuration")?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    // An empty secret would mean "no header" is a valid
    // credential for anyone who sends an empty header.
    if self.api_key.trim().is_empty() {
      return Err(eyre!("API_KEY cannot be empty"));
    }
    if self.api_key_header.trim().is_empty() {
      return Err(eyre!("API_KEY_HEADER cannot be empty"));
    }
    if self.posts_per_page == 0 {
      return Err(eyre!("POSTS_PER_PAGE has to be at least 1"));
    }
    self.content_source().map(|_| ())
  }

  pub fn content_source(&self) -> Result<ContentSource> {
    if let Some(path) = &self.posts_path {
      return Ok(ContentSource::File(PathBuf::from(path)));
    }
    match (&self.contentful_space_id, &self.contentful_access_token) {
      (Some(space_id), Some(access_token)) => Ok(ContentSource::Contentful(
        ContentfulSettings {
          api_url: self.contentful_api_url.clone(),
          space_id: space_id.clone(),
          environment: self.contentful_environment.clone(),
          access_token: access_token.clone(),
          content_type: self.contentful_content_type.clone()
        }
      )),
      _ => Err(eyre!(
        "Either POSTS_PATH or both CONTENTFUL_SPACE_ID and \
        CONTENTFUL_ACCESS_TOKEN have to be set"
      ))
    }
  }

}
