mod app;
mod config;
mod content;
mod posts;
mod store;
mod utils;

use color_eyre::Result;
use dotenv::dotenv;
use std::env;
// I think we have to add crate here because
// of the other crate named "config" that we
// use as a dependency.
use crate::config::Config;

#[actix_web::main]
async fn main() -> Result<()> {
  dotenv().ok();
  if env::var("RUST_LOG").is_err() {
    env::set_var("RUST_LOG", "info");
  }
  env_logger::init();
  color_eyre::install()?;

  let config = Config::from_env()?;
  app::run(config).await
}
