//! Text search and pages over a list of posts.
//!
//! `PostListing` is the state a client keeps while browsing: which
//! server-side filters are on, what's typed in the search box and
//! which page is showing. Nothing is cached, the page is worked out
//! again from the posts every time it's asked for.
use serde::Serialize;
use crate::content::Post;
use crate::utils::text_utils;
use super::filters::PostFilters;

/// Empty query matches everything, otherwise the query has to be in
/// the title or in the text of the post, ignoring case.
pub fn matches(post: &Post, query: &str) -> bool {
  if query.is_empty() {
    return true;
  }
  text_utils::contains_ignore_case(&post.title, query)
    || text_utils::contains_ignore_case(&post.content.to_plain_text(), query)
}

pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
  posts.iter()
    .filter(|p| matches(p, query))
    .collect()
}

// Zero when there's nothing to show.
pub fn total_pages(count: usize, page_size: usize) -> usize {
  if page_size == 0 {
    return 0;
  }
  (count + page_size - 1) / page_size
}

/// Page numbers start at 1. Pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
  let start = page.saturating_sub(1).saturating_mul(page_size);
  if page == 0 || start >= items.len() {
    return &[];
  }
  let end = (start + page_size).min(items.len());
  &items[start..end]
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items: Vec<T>,
  pub current_page: usize,
  pub total_pages: usize,
  pub total_items: usize
}

#[derive(Debug, Clone)]
pub struct PostListing {
  filters: PostFilters,
  search: String,
  current_page: usize,
  page_size: usize
}

impl PostListing {

  pub fn new(page_size: usize) -> Self {
    Self {
      filters: PostFilters::default(),
      search: String::new(),
      current_page: 1,
      page_size
    }
  }

  pub fn filters(&self) -> &PostFilters {
    &self.filters
  }

  pub fn search_text(&self) -> &str {
    &self.search
  }

  pub fn current_page(&self) -> usize {
    self.current_page
  }

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  // New filters mean a new set of posts from the server, so
  // we start over from the first page.
  pub fn set_filters(&mut self, filters: PostFilters) {
    if self.filters != filters {
      self.filters = filters;
      self.current_page = 1;
    }
  }

  // Changing the search text keeps the current page. That's how the
  // listing has always behaved, even though it can leave you on a
  // page past the end of the results.
  pub fn set_search(&mut self, search: &str) {
    self.search = search.to_string();
  }

  // Clamped between the first and the last page for `posts`.
  pub fn go_to(&mut self, page: usize, posts: &[Post]) {
    let last = self.total_pages(posts).max(1);
    self.current_page = page.max(1).min(last);
  }

  pub fn next_page(&mut self, posts: &[Post]) {
    self.go_to(self.current_page + 1, posts);
  }

  pub fn previous_page(&mut self, posts: &[Post]) {
    self.go_to(self.current_page.saturating_sub(1), posts);
  }

  pub fn total_pages(&self, posts: &[Post]) -> usize {
    total_pages(search(posts, &self.search).len(), self.page_size)
  }

  /// `posts` is whatever the server sent back for the current filters.
  pub fn page<'a>(&self, posts: &'a [Post]) -> Page<&'a Post> {
    let matched = search(posts, &self.search);
    Page {
      items: paginate(&matched, self.current_page, self.page_size).to_vec(),
      current_page: self.current_page,
      total_pages: total_pages(matched.len(), self.page_size),
      total_items: matched.len()
    }
  }

}
