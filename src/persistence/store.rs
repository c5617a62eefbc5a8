//! Post storage backends

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single feed post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub likes: u32,
    /// Unix timestamp (ms) when posted
    pub timestamp_ms: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store is not connected")]
    NotConnected,
    #[error("no post with id {0}")]
    NotFound(String),
    #[error("store backend failed: {0}")]
    Backend(String),
}

/// Document-store operations the feed relies on
pub trait PostStore {
    fn connect(&mut self) -> Result<(), StoreError>;

    fn create_post(&mut self, post: &Post) -> Result<(), StoreError>;

    /// All posts, most recent first
    fn get_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Increment a post's like counter by one
    fn update_post_likes(&mut self, id: &str) -> Result<(), StoreError>;
}

/// In-process store, mostly for tests and offline demos
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    posts: Vec<Post>,
    connected: bool,
    /// When set, `connect` fails with this message
    #[serde(skip)]
    unreachable: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose connection attempts always fail
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            unreachable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Pre-populated store
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    /// Drop the connection (simulates a network loss)
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.connected {
            Ok(())
        } else {
            Err(StoreError::NotConnected)
        }
    }
}

impl PostStore for MemoryStore {
    fn connect(&mut self) -> Result<(), StoreError> {
        if let Some(reason) = &self.unreachable {
            return Err(StoreError::Backend(reason.clone()));
        }
        self.connected = true;
        Ok(())
    }

    fn create_post(&mut self, post: &Post) -> Result<(), StoreError> {
        self.ensure_connected()?;
        self.posts.push(post.clone());
        Ok(())
    }

    fn get_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.ensure_connected()?;
        let mut posts = self.posts.clone();
        // Equal timestamps: later insert first
        posts.reverse();
        posts.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
        Ok(posts)
    }

    fn update_post_likes(&mut self, id: &str) -> Result<(), StoreError> {
        self.ensure_connected()?;
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        post.likes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, timestamp_ms: u64) -> Post {
        Post {
            id: id.to_string(),
            text: format!("post {id}"),
            likes: 0,
            timestamp_ms,
        }
    }

    #[test]
    fn test_requires_connection() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_posts(), Err(StoreError::NotConnected));
        assert_eq!(store.create_post(&post("1", 1)), Err(StoreError::NotConnected));
        store.connect().unwrap();
        assert!(store.create_post(&post("1", 1)).is_ok());
    }

    #[test]
    fn test_posts_newest_first() {
        let mut store = MemoryStore::with_posts(vec![post("a", 10), post("b", 30)]);
        store.connect().unwrap();
        store.create_post(&post("c", 20)).unwrap();
        let ids: Vec<_> = store.get_posts().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_likes_increment() {
        let mut store = MemoryStore::with_posts(vec![post("a", 10)]);
        store.connect().unwrap();
        store.update_post_likes("a").unwrap();
        store.update_post_likes("a").unwrap();
        assert_eq!(store.get_posts().unwrap()[0].likes, 2);
        assert_eq!(
            store.update_post_likes("zzz"),
            Err(StoreError::NotFound("zzz".into()))
        );
    }

    #[test]
    fn test_unreachable_store() {
        let mut store = MemoryStore::unreachable("dns failure");
        assert!(matches!(store.connect(), Err(StoreError::Backend(_))));
        assert!(!store.is_connected());
    }
}
