use chrono::{DateTime, Utc};
use crate::content::Post;
use crate::utils::text_utils;

/// Filters that can be applied to posts. A filter that isn't set
/// lets everything through.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PostFilters {
  /// Case-insensitive, but otherwise exact: "Jane" won't match "Janet".
  pub author: Option<String>,
  /// Both dates are inclusive.
  pub start_date: Option<DateTime<Utc>>,
  pub end_date: Option<DateTime<Utc>>
}

impl PostFilters {

  pub fn matches_author(&self, post: &Post) -> bool {
    match &self.author {
      Some(author) => text_utils::equals_ignore_case(&post.author, author),
      None => true
    }
  }

  // Undated posts can't be out of range, they always pass.
  pub fn matches_date_range(&self, post: &Post) -> bool {
    let date = match post.date {
      Some(date) => date,
      None => return true
    };
    if let Some(start) = self.start_date {
      if date < start {
        return false;
      }
    }
    if let Some(end) = self.end_date {
      if date > end {
        return false;
      }
    }
    true
  }

  pub fn matches(&self, post: &Post) -> bool {
    self.matches_author(post) && self.matches_date_range(post)
  }

  // Keeps the order we got, which should already be newest first.
  pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
    posts.into_iter()
      .filter(|p| self.matches(p))
      .collect()
  }

}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::rich_text::Node;
  use crate::utils::time_utils::parse_date;

  fn post(slug: &str, author: &str, date: &str) -> Post {
    Post {
      title: slug.to_uppercase(),
      author: author.to_string(),
      date: parse_date(date),
      content: Node::default(),
      slug: slug.to_string()
    }
  }

  fn slugs(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
  }

  #[test]
  fn no_filters_lets_everything_through() {
    let posts = vec![post("a", "Jane", "2024-01-01"), post("b", "John", "2023-05-05")];
    assert_eq!(posts.clone(), PostFilters::default().apply(posts));
  }

  #[test]
  fn author_is_case_insensitive_and_exact() {
    let filters = PostFilters {
      author: Some("Jane".to_string()),
      ..Default::default()
    };
    let posts = vec![
      post("a", "jane", "2024-01-01"),
      post("b", "Janet", "2024-01-02"),
      post("c", "JANE", "2024-01-03")
    ];
    assert_eq!(vec!["a", "c"], slugs(&filters.apply(posts)));
  }

  #[test]
  fn date_range_is_inclusive() {
    let filters = PostFilters {
      start_date: parse_date("2024-01-01"),
      end_date: parse_date("2024-01-31"),
      ..Default::default()
    };
    let posts = vec![
      post("before", "Jane", "2023-12-31T23:59:59Z"),
      post("first", "Jane", "2024-01-01T00:00:00Z"),
      post("middle", "Jane", "2024-01-15T12:00:00Z"),
      post("last", "Jane", "2024-01-31"),
      post("after", "Jane", "2024-02-01")
    ];
    assert_eq!(vec!["first", "middle", "last"], slugs(&filters.apply(posts)));
  }

  #[test]
  fn undated_posts_pass_date_bounds() {
    let filters = PostFilters {
      start_date: parse_date("2024-01-01"),
      end_date: parse_date("2024-01-31"),
      ..Default::default()
    };
    let posts = vec![
      post("undated", "Jane", "someday"),
      post("after", "Jane", "2024-02-01")
    ];
    assert_eq!(None, posts[0].date);
    assert_eq!(vec!["undated"], slugs(&filters.apply(posts)));
  }

  #[test]
  fn bounds_are_independent() {
    let only_start = PostFilters {
      start_date: parse_date("2024-01-10"),
      ..Default::default()
    };
    let only_end = PostFilters {
      end_date: parse_date("2024-01-10"),
      ..Default::default()
    };
    let posts = vec![post("early", "Jane", "2024-01-01"), post("late", "Jane", "2024-01-20")];
    assert_eq!(vec!["late"], slugs(&only_start.apply(posts.clone())));
    assert_eq!(vec!["early"], slugs(&only_end.apply(posts)));
  }

  #[test]
  fn author_and_dates_combine() {
    let filters = PostFilters {
      author: Some("john".to_string()),
      start_date: parse_date("2024-01-01"),
      end_date: None
    };
    let posts = vec![
      post("c", "John", "2024-03-01"),
      post("b", "Jane", "2024-02-01"),
      post("a", "John", "2023-12-01")
    ];
    assert_eq!(vec!["c"], slugs(&filters.apply(posts)));
  }
}
