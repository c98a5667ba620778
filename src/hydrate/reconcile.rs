use crate::error::{RehydrateError, Result};
use crate::hydrate::types::{post_id, DehydratedRecord, PostId};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Fetched posts indexed by identifier.
///
/// The lookup endpoint returns posts in no particular order and silently
/// omits deleted or protected ones, so batch members are matched by id.
#[derive(Debug, Default)]
pub struct PostIndex {
    posts: HashMap<PostId, Value>,
}

impl PostIndex {
    /// Index a lookup response. Every post must carry an integer `id`.
    pub fn from_posts(posts: Vec<Value>) -> Result<Self> {
        let mut index = HashMap::with_capacity(posts.len());
        for post in posts {
            let id = post_id(&post).ok_or(RehydrateError::MissingPostId)?;
            index.insert(id, post);
        }
        Ok(PostIndex { posts: index })
    }

    /// Walk the batch in order and hand each record with its fetched post
    /// to `on_match`.
    ///
    /// Records without a fetched post are logged and skipped; their ids are
    /// returned in batch order. A record repeated within the batch sees the
    /// post as left by the previous match.
    pub fn reconcile<F>(&mut self, batch: &[DehydratedRecord], mut on_match: F) -> Result<Vec<PostId>>
    where
        F: FnMut(&mut Value, &DehydratedRecord) -> Result<()>,
    {
        let mut missing = Vec::new();

        for record in batch {
            match self.posts.get_mut(&record.id) {
                Some(post) => on_match(post, record)?,
                None => {
                    warn!("No post found with ID {} - it may have been deleted", record.id);
                    missing.push(record.id);
                }
            }
        }

        Ok(missing)
    }
}
