use actix_web::{
  body::EitherBody,
  dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
  ResponseError
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::warn;
use std::sync::Arc;
use super::error::Error;
use super::helpers;

/**
 * Middleware that only lets requests through when they carry the
 * shared secret in the configured header. Anything else gets a 401
 * right away, the wrapped services never see the request.
 *
 * A guard would just make the route not match and end up as a 404,
 * which is why this is a middleware.
 */
#[derive(Clone)]
pub struct ApiKeyAuth {
  header_name: Arc<str>,
  secret: Arc<str>
}

impl ApiKeyAuth {
  pub fn new(header_name: &str, secret: &str) -> Self {
    Self {
      header_name: Arc::from(header_name),
      secret: Arc::from(secret)
    }
  }

  // Exact match only. No header at all is never a match.
  pub fn is_authorized(&self, credential: Option<&str>) -> bool {
    credential.map_or(false, |c| c == &*self.secret)
  }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = actix_web::Error;
  type InitError = ();
  type Transform = ApiKeyAuthService<S>;
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(ApiKeyAuthService {
      service,
      auth: self.clone()
    }))
  }
}

pub struct ApiKeyAuthService<S> {
  service: S,
  auth: ApiKeyAuth
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = actix_web::Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let credential = helpers::header_value(req.headers(), &self.auth.header_name);
    if !self.auth.is_authorized(credential) {
      warn!(
        "Unauthorized {} request to {} (credential {})",
        req.method(),
        req.path(),
        if credential.is_some() { "invalid" } else { "missing" }
      );
      let response = Error::Unauthorized.error_response();
      return Box::pin(ready(Ok(req.into_response(response).map_into_right_body())));
    }

    let fut = self.service.call(req);
    Box::pin(async move {
      fut.await.map(ServiceResponse::map_into_left_body)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{
    http::StatusCode,
    test::{call_service, init_service, read_body, TestRequest},
    web,
    App,
    HttpResponse
  };

  fn auth() -> ApiKeyAuth {
    ApiKeyAuth::new("x-api-key", "s3cret")
  }

  #[test]
  fn exact_match_only() {
    let auth = auth();
    assert!(auth.is_authorized(Some("s3cret")));
    assert!(!auth.is_authorized(Some("S3CRET")));
    assert!(!auth.is_authorized(Some("s3cret ")));
    assert!(!auth.is_authorized(Some("")));
    assert!(!auth.is_authorized(None));
  }

  #[actix_web::test]
  async fn rejects_missing_credential() {
    let app = init_service(
      App::new()
        .wrap(auth())
        .route("/", web::get().to(|| async { HttpResponse::Ok().body("hello") }))
    ).await;
    let req = TestRequest::get().uri("/").to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());
    let body = read_body(resp).await;
    assert_eq!(body, r#"{"message":"HTTP ERROR 401: Unauthorized"}"#);
  }

  #[actix_web::test]
  async fn lets_valid_credential_through() {
    let app = init_service(
      App::new()
        .wrap(auth())
        .route("/", web::get().to(|| async { HttpResponse::Ok().body("hello") }))
    ).await;
    let req = TestRequest::get()
      .uri("/")
      .insert_header(("x-api-key", "s3cret"))
      .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(StatusCode::OK, resp.status());
    let wrong = TestRequest::get()
      .uri("/")
      .insert_header(("x-api-key", "nope"))
      .to_request();
    assert_eq!(StatusCode::UNAUTHORIZED, call_service(&app, wrong).await.status());
  }
}
