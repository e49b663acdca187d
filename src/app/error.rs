use actix_web::{
  error::ResponseError,
  http::{header, StatusCode},
  HttpResponse
};
use derive_more::Display;
use log::error;
use super::dtos::JsonMessage;

// The Display output is what ends up in the response body.
// The String in the 500 variants is only meant for the logs,
// random internet people don't get to see it.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "Internal Server Error")]
  InternalServerError(String),
  #[display(fmt = "Error fetching posts")]
  UpstreamError(String),
  #[display(fmt = "HTTP ERROR 401: Unauthorized")]
  Unauthorized,
  #[display(fmt = "{}", _0)]
  NotFound(String),
  #[display(fmt = "{}", _0)]
  BadRequest(String),
  #[display(fmt = "Method {} Not Allowed", method)]
  MethodNotAllowed {
    method: String,
    allow: &'static str
  }
}

// Old API was answering in plain text, the front end expects
// a JSON object with a message field now.
impl ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self {
      Error::InternalServerError(_) | Error::UpstreamError(_) =>
        StatusCode::INTERNAL_SERVER_ERROR,
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED
    }
  }

  fn error_response(&self) -> HttpResponse {
    let mut response = HttpResponse::build(self.status_code());
    if let Error::MethodNotAllowed { allow, .. } = self {
      response.insert_header((header::ALLOW, *allow));
    }
    response.json(JsonMessage::new(&self.to_string()))
  }
}

pub fn map_upstream_error(e: eyre::Report) -> Error {
  error!("Content repository error - {:?}", e);
  Error::UpstreamError(e.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;

  #[actix_web::test]
  async fn internal_details_stay_out_of_the_body() {
    let response = Error::UpstreamError("token abc expired".to_string()).error_response();
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
    let body = to_bytes(response.into_body()).await.unwrap();
    assert_eq!(body, r#"{"message":"Error fetching posts"}"#);
  }

  #[test]
  fn method_not_allowed_advertises_methods() {
    let response = Error::MethodNotAllowed {
      method: "PATCH".to_string(),
      allow: "POST, GET, PUT, DELETE"
    }.error_response();
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, response.status());
    assert_eq!(
      response.headers().get(header::ALLOW).unwrap(),
      "POST, GET, PUT, DELETE"
    );
  }
}
