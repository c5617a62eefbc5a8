//! Local-first posting feed

use super::store::{Post, PostStore};

/// Whether the feed is mirroring to its store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Offline,
    Connected,
}

/// Feed of posts, newest first, with an optional backing store
#[derive(Debug)]
pub struct Feed<S: PostStore> {
    posts: Vec<Post>,
    store: S,
    status: ConnectionStatus,
}

impl<S: PostStore> Feed<S> {
    /// Start offline with an empty feed
    pub fn new(store: S) -> Self {
        Self {
            posts: Vec::new(),
            store,
            status: ConnectionStatus::Offline,
        }
    }

    /// Try to connect and load existing posts; stays offline on failure.
    ///
    /// Posts written while offline are uploaded and merged with the stored
    /// ones. A stored post wins over a local one with the same id.
    pub fn connect(&mut self) -> ConnectionStatus {
        let loaded = self.store.connect().and_then(|_| self.store.get_posts());
        match loaded {
            Ok(mut posts) => {
                log::info!("Connected to post store ({} posts)", posts.len());
                for local in std::mem::take(&mut self.posts) {
                    if posts.iter().any(|p| p.id == local.id) {
                        continue;
                    }
                    if let Err(e) = self.store.create_post(&local) {
                        log::warn!("Error uploading offline post {}: {e}", local.id);
                    }
                    posts.push(local);
                }
                posts.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
                self.posts = posts;
                self.status = ConnectionStatus::Connected;
            }
            Err(e) => {
                log::warn!("Post store unavailable, staying offline: {e}");
                self.status = ConnectionStatus::Offline;
            }
        }
        self.status
    }

    /// Add a post at the top of the feed.
    ///
    /// Blank text is ignored. The id is derived from the timestamp, bumped if
    /// two posts land on the same millisecond.
    pub fn add_post(&mut self, text: &str, now_ms: u64) -> Option<&Post> {
        if text.trim().is_empty() {
            return None;
        }

        let mut stamp = now_ms;
        while self.posts.iter().any(|p| p.id == stamp.to_string()) {
            stamp += 1;
        }
        let post = Post {
            id: stamp.to_string(),
            text: text.to_string(),
            likes: 0,
            timestamp_ms: now_ms,
        };

        if self.status == ConnectionStatus::Connected {
            if let Err(e) = self.store.create_post(&post) {
                log::warn!("Error saving post {}: {e}", post.id);
            }
        }

        self.posts.insert(0, post);
        self.posts.first()
    }

    /// Like a post. Returns the new like count, or None for an unknown id.
    pub fn like_post(&mut self, id: &str) -> Option<u32> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.likes += 1;
        let likes = post.likes;

        if self.status == ConnectionStatus::Connected {
            if let Err(e) = self.store.update_post_likes(id) {
                log::warn!("Error updating likes for {id}: {e}");
            }
        }
        Some(likes)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
