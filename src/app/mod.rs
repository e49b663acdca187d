use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use color_eyre::Result;
use eyre::WrapErr;
use log::{debug, info};
// I think we have to add crate here because
// of the other crate named "config" that we
// use as a dependency.
use crate::config::{Config, ContentSource};
use crate::content::PostRepository;
use crate::content::contentful::ContentfulRepository;
use crate::content::file::FilePostRepository;
use crate::store::{self, CommentStore};
use error::Error;
pub use auth::ApiKeyAuth;
mod handlers;
mod dtos;
mod error;
mod helpers;
mod auth;

// Declare app state struct:
pub struct AppState {
  pub comment_store: CommentStore,
  pub post_repository: Box<dyn PostRepository>,
  pub posts_per_page: usize
}

fn post_repository(source: ContentSource) -> Box<dyn PostRepository> {
  match source {
    ContentSource::Contentful(settings) => {
      info!("Reading posts from Contentful space {}", settings.space_id);
      Box::new(ContentfulRepository::new(settings))
    },
    ContentSource::File(path) => {
      info!("Reading posts from {}", path.display());
      Box::new(FilePostRepository::new(path))
    }
  }
}

fn cors(allowed_origin: &str, api_key_header: &str) -> Cors {
  let cors = if allowed_origin == "*" {
    Cors::default().allow_any_origin()
  } else {
    Cors::default().allowed_origin(allowed_origin)
  };
  cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
    .allowed_header(header::CONTENT_TYPE)
    .allowed_header(api_key_header)
    .max_age(3600)
}

// Function to start the server.
// Has to be async because there should be a .await at the end.
pub async fn run(config: Config) -> Result<()> {
  // Not logging the whole config, it has secrets in it.
  debug!(
    "Current config: bind address {}, comments in {}, {} posts per page",
    config.bind_address,
    config.comments_path,
    config.posts_per_page
  );
  let post_repository = post_repository(config.content_source()?);
  let auth = ApiKeyAuth::new(&config.api_key_header, &config.api_key);

  let comment_store = CommentStore::new(&config.comments_path);
  info!(
    "{} comments found in {}",
    store::comment_count(&comment_store),
    comment_store.path().display()
  );

  let app_state = web::Data::new(
    AppState {
      comment_store,
      post_repository,
      posts_per_page: config.posts_per_page
    }
  );

  // Got to save these for later, the server closure
  // gets called once per worker.
  let bind_address = config.bind_address.clone();
  let allowed_origin = config.allowed_origin.clone();
  let api_key_header = config.api_key_header.clone();
  info!("Starting server on {}", bind_address);

  HttpServer::new(move|| {
    App::new()
      .app_data(app_state.clone())
      .configure(extractor_config)
      .wrap(cors(&allowed_origin, &api_key_header))
      .wrap(middleware::Logger::default())
      .service(
        web::scope("/api")
          .wrap(auth.clone())
          .configure(api_endpoints_config)
      )
      .default_service(web::route().to(handlers::not_found))
  })
  .bind(bind_address)?
  .run()
  .await
  .context("Start Actix web server")

}

// Extractor failures get the same JSON error body as
// everything else.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
  cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
      Error::BadRequest(format!("Invalid JSON body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
      Error::BadRequest(format!("Invalid query string arguments: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_, _| {
      Error::BadRequest(String::from("Invalid path arguments")).into()
    }));
}

// Route configuration, everything in there sits behind
// the API key check.
pub fn api_endpoints_config(cfg: &mut web::ServiceConfig) {
  cfg.service(
      web::resource("/comments")
        .route(web::post().to(handlers::create_comment))
        .route(web::get().to(handlers::comments_for_post))
        .route(web::put().to(handlers::update_comment))
        .route(web::delete().to(handlers::delete_comment))
        .default_service(web::route().to(handlers::comments_method_not_allowed))
    )
    .service(
      web::resource("/posts")
        .route(web::get().to(handlers::posts))
        .default_service(web::route().to(handlers::posts_method_not_allowed))
    )
    .route("/posts/search", web::get().to(handlers::search_posts))
    .route("/post/{slug}", web::get().to(handlers::post_by_slug));
}
