use actix_web::{
  web,
  HttpResponse,
  HttpRequest,
  Result
};
use log::info;
use crate::posts::filters::PostFilters;
use crate::posts::listing::PostListing;
use crate::store::{self, entities::NewComment};
use super::dtos::*;
use super::error::{Error, map_upstream_error};
use super::AppState;
use super::helpers;

// What the Allow header says when the verb isn't supported:
const COMMENTS_ALLOWED_METHODS: &'static str = "POST, GET, PUT, DELETE";
const POSTS_ALLOWED_METHODS: &'static str = "GET";

// Default response when no route matched the request:
pub async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::NotFound(String::from("Endpoint doesn't exist")))
}

fn method_not_allowed(req: &HttpRequest, allow: &'static str) -> Error {
  Error::MethodNotAllowed {
    method: req.method().to_string(),
    allow
  }
}

pub async fn comments_method_not_allowed(req: HttpRequest) -> Result<HttpResponse, Error> {
  Err(method_not_allowed(&req, COMMENTS_ALLOWED_METHODS))
}

pub async fn posts_method_not_allowed(req: HttpRequest) -> Result<HttpResponse, Error> {
  Err(method_not_allowed(&req, POSTS_ALLOWED_METHODS))
}

/* --- Comments --- */

pub async fn create_comment(
  app_state: web::Data<AppState>,
  comment_form: web::Json<CommentForm>
) -> Result<HttpResponse, Error> {
  let new_comment = NewComment::try_from(comment_form.into_inner())?;
  let comment = helpers::blocking(&app_state, move |state| {
    store::insert_comment(&state.comment_store, new_comment)
  }).await?;
  info!("Comment {} added to post {}", comment.id, comment.post_slug);
  Ok(HttpResponse::Created().json(CommentDto::from(comment)))
}

pub async fn comments_for_post(
  app_state: web::Data<AppState>,
  query: web::Query<CommentsQuery>
) -> Result<HttpResponse, Error> {
  let post_slug = query.into_inner().validate()?;
  let comments: Vec<CommentDto> = helpers::blocking(&app_state, move |state| {
    store::comments_for_post(&state.comment_store, &post_slug)
  }).await?;
  Ok(HttpResponse::Ok().json(comments))
}

pub async fn update_comment(
  app_state: web::Data<AppState>,
  update_form: web::Json<CommentUpdateForm>
) -> Result<HttpResponse, Error> {
  let (id, content) = update_form.into_inner().validate()?;
  let updated = helpers::blocking(&app_state, move |state| {
    store::update_comment_content(&state.comment_store, id, content)
  }).await?;
  match updated {
    Some(comment) => {
      info!("Comment {} updated", comment.id);
      Ok(HttpResponse::Ok().json(comment))
    },
    None => Err(Error::NotFound(String::from("Comment not found.")))
  }
}

pub async fn delete_comment(
  app_state: web::Data<AppState>,
  query: web::Query<DeleteCommentQuery>
) -> Result<HttpResponse, Error> {
  let id = query.validate()?;
  let deleted = helpers::blocking(&app_state, move |state| {
    store::delete_comment(&state.comment_store, id)
  }).await?;
  match deleted {
    Some(comment) => {
      info!("Comment {} deleted from post {}", comment.id, comment.post_slug);
      Ok(HttpResponse::Ok().json(comment))
    },
    None => Err(Error::NotFound(String::from("Comment not found.")))
  }
}

/* --- Posts --- */

pub async fn posts(
  app_state: web::Data<AppState>,
  query: web::Query<PostsQuery>
) -> Result<HttpResponse, Error> {
  let filters = PostFilters::try_from(query.into_inner())?;
  let posts = app_state.post_repository
    .all_posts()
    .await
    .map_err(map_upstream_error)?;
  Ok(HttpResponse::Ok().json(filters.apply(posts)))
}

// Same thing a browsing client does on its side: filters, then
// the text search, then cut out the requested page.
pub async fn search_posts(
  app_state: web::Data<AppState>,
  query: web::Query<PostSearchQuery>
) -> Result<HttpResponse, Error> {
  let (filters, search, page) = query.into_inner().into_parts()?;
  let mut listing = PostListing::new(app_state.posts_per_page);
  listing.set_filters(filters);
  listing.set_search(&search);

  let posts = app_state.post_repository
    .all_posts()
    .await
    .map_err(map_upstream_error)?;
  let posts = listing.filters().apply(posts);
  listing.go_to(page, &posts);

  Ok(HttpResponse::Ok().json(PostPageDto::from(listing.page(&posts))))
}

// Path variables have to be in a tuple.
pub async fn post_by_slug(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let slug = path.into_inner().0;
  let post = app_state.post_repository
    .post_by_slug(&slug)
    .await
    .map_err(map_upstream_error)?;
  match post {
    Some(post) => Ok(HttpResponse::Ok().json(post)),
    None => Err(Error::NotFound(String::from("Post not found")))
  }
}
