// Case-insensitive substring check. Lowercasing both sides is what the
// search has always done, it's not proper Unicode case folding but
// nobody complained.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn equals_ignore_case(a: &str, b: &str) -> bool {
  a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn contains_ignores_case() {
    assert!(contains_ignore_case("Hello World", "o wor"));
    assert!(contains_ignore_case("anything", ""));
    assert!(!contains_ignore_case("Hello", "help"));
  }

  #[test]
  fn equality_is_exact_apart_from_case() {
    assert!(equals_ignore_case("Jane", "jane"));
    assert!(!equals_ignore_case("Jane", "Janet"));
  }
}
