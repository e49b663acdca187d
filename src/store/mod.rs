use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use log::{debug, error};
pub mod entities;
use entities::*;
use crate::utils::time_utils::current_datetime;

/**
 * File backed comment collection.
 *
 * There is no cache: every operation reads the whole file, changes
 * what it needs in memory and writes the whole file back. Mutations
 * happen while holding `lock`, which makes the read-modify-write
 * cycle exclusive for everyone going through the same store. Other
 * processes writing the same file are not accounted for.
 */
pub struct CommentStore {
  path: PathBuf,
  lock: Mutex<()>
}

impl CommentStore {

  pub fn new<P: Into<PathBuf>>(path: P) -> Self {
    Self {
      path: path.into(),
      lock: Mutex::new(())
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  // Missing file means no comments yet. Anything else that goes wrong
  // is logged and also gives an empty collection, callers can't tell
  // the difference.
  pub fn read_all(&self) -> Vec<Comment> {
    let _guard = self.acquire();
    self.read_file()
  }

  // Errors are logged and dropped.
  pub fn write_all(&self, comments: &[Comment]) {
    let _guard = self.acquire();
    self.write_file(comments);
  }

  /**
   * Runs `f` on the full collection while holding the store lock.
   * The collection is only written back if `f` returns Ok. The guard
   * is dropped on every way out of this function, panics included.
   */
  pub fn modify<T, E, F>(&self, f: F) -> Result<T, E>
    where F: FnOnce(&mut Vec<Comment>) -> Result<T, E>
  {
    let _guard = self.acquire();
    let mut comments = self.read_file();
    let result = f(&mut comments)?;
    self.write_file(&comments);
    Ok(result)
  }

  fn acquire(&self) -> std::sync::MutexGuard<'_, ()> {
    // A poisoned lock only means another request panicked while
    // holding it. The file on disk is still whatever was last
    // written in full, so just carry on.
    self.lock.lock().unwrap_or_else(|e| {
      error!("Comment store lock was poisoned - {}", e);
      PoisonError::into_inner(e)
    })
  }

  fn read_file(&self) -> Vec<Comment> {
    let data = match fs::read_to_string(&self.path) {
      Ok(data) => data,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!("No comments file at {}, starting empty", self.path.display());
        return Vec::new();
      },
      Err(e) => {
        error!("Error reading comments from {} - {}", self.path.display(), e);
        return Vec::new();
      }
    };
    match serde_json::from_str::<Option<Vec<Comment>>>(&data) {
      // A file containing "null" counts as empty too.
      Ok(comments) => comments.unwrap_or_default(),
      Err(e) => {
        error!("Error parsing comments from {} - {}", self.path.display(), e);
        Vec::new()
      }
    }
  }

  fn write_file(&self, comments: &[Comment]) {
    if let Err(e) = self.try_write_file(comments) {
      error!("Error writing comments to {} - {}", self.path.display(), e);
    }
  }

  // Write to a temporary file next to the real one and rename it
  // over, so nobody ever reads half a file.
  fn try_write_file(&self, comments: &[Comment]) -> io::Result<()> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
      }
    }
    let json = serde_json::to_string_pretty(comments)?;
    let mut tmp_name = self.path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, &self.path).map_err(|e| {
      // Don't leave the temporary file lying around.
      if let Err(e) = fs::remove_file(&tmp_path) {
        error!("Could not remove {} - {}", tmp_path.display(), e);
      }
      e
    })
  }

}

fn next_id(comments: &[Comment]) -> i64 {
  comments.iter()
    .map(|c| c.id)
    .max()
    .map(|max| max + 1)
    .unwrap_or(1)
}

pub fn insert_comment(
  store: &CommentStore,
  new_comment: NewComment
) -> Comment {
  // The closure can't fail, that Err type is just there
  // to make the compiler happy.
  let result: Result<Comment, std::convert::Infallible> = store.modify(|comments| {
    let comment = Comment {
      id: next_id(comments),
      post_slug: new_comment.post_slug,
      author: new_comment.author,
      content: new_comment.content,
      date: current_datetime()
    };
    comments.push(comment.clone());
    Ok(comment)
  });
  match result {
    Ok(comment) => comment,
    Err(never) => match never {}
  }
}

// Storage order is insertion order, so oldest first.
pub fn comments_for_post(
  store: &CommentStore,
  post_slug: &str
) -> Vec<Comment> {
  store.read_all()
    .into_iter()
    .filter(|c| c.post_slug == post_slug)
    .collect()
}

pub fn comment_count(store: &CommentStore) -> usize {
  store.read_all().len()
}

// Returns None when there's no such comment, in which case
// nothing gets written.
pub fn update_comment_content(
  store: &CommentStore,
  id: i64,
  content: String
) -> Option<Comment> {
  store.modify(|comments| {
    match comments.iter_mut().find(|c| c.id == id) {
      Some(comment) => {
        comment.content = content;
        comment.date = current_datetime();
        Ok(comment.clone())
      },
      None => Err(())
    }
  }).ok()
}

pub fn delete_comment(
  store: &CommentStore,
  id: i64
) -> Option<Comment> {
  store.modify(|comments| {
    match comments.iter().position(|c| c.id == id) {
      Some(index) => Ok(comments.remove(index)),
      None => Err(())
    }
  }).ok()
}
