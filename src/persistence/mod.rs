//! Posting feed persistence
//!
//! The feed keeps its own local state and treats the store as fire-and-forget:
//! a failing store is logged and never undoes or blocks a local update. The
//! game engine does not depend on this module.

pub mod feed;
pub mod store;

pub use feed::{ConnectionStatus, Feed};
pub use store::{MemoryStore, Post, PostStore, StoreError};
