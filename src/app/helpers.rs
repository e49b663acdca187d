use actix_web::{http::header::HeaderMap, web};
use log::error;
use super::error::Error;
use super::AppState;

// Extracting Actix header values is kinda convoluted.
// They check for an error in the header value not
// being convertable to string because of uh...
// invalid characters or something. Those count as
// missing here.
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
  headers.get(name)
    .and_then(|h| h.to_str().ok())
}

/**
 * The comment store does plain blocking file IO, this sends
 * it to the Actix thread pool meant for that instead of
 * blocking a worker.
 */
pub async fn blocking<F, T>(
  app_state: &web::Data<AppState>,
  f: F
) -> Result<T, Error>
  where
    F: FnOnce(&AppState) -> T + Send + 'static,
    T: Send + 'static
{
  let state = app_state.clone();
  web::block(move || f(&state))
    .await
    .map_err(|e| {
      error!("Blocking task failed - {}", e);
      Error::InternalServerError(e.to_string())
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::http::header::{HeaderName, HeaderValue};

  #[test]
  fn reads_header_by_name_ignoring_case() {
    let mut headers = HeaderMap::new();
    headers.insert(
      HeaderName::from_static("x-api-key"),
      HeaderValue::from_static("secret")
    );
    assert_eq!(Some("secret"), header_value(&headers, "X-Api-Key"));
    assert_eq!(None, header_value(&headers, "authorization"));
  }
}
