//! Post feed service.

use fanvault_common::{AppError, AppResult, PinScope, Price};
use fanvault_db::{
    entities::{MediaKind, Post, PostAccess, PostContent},
    repositories::{CreatorRepository, PostRepository},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

/// Payload of a new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NewPostContent {
    Text { body: String },
    Media { kind: MediaKind, url: String },
}

/// Input for publishing a new post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub content: NewPostContent,

    #[validate(length(max = 2200))]
    #[serde(default)]
    pub caption: Option<String>,

    /// Unlock price; makes the post pay-per-view. Media only.
    #[serde(default)]
    pub price: Option<Price>,
}

/// Post feed service for business logic.
#[derive(Clone)]
pub struct FeedService {
    post_repo: PostRepository,
    creator_repo: CreatorRepository,
    pin_scope: PinScope,
}

impl FeedService {
    /// Create a new feed service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        creator_repo: CreatorRepository,
        pin_scope: PinScope,
    ) -> Self {
        Self {
            post_repo,
            creator_repo,
            pin_scope,
        }
    }

    /// Get a post by ID.
    pub fn get(&self, post_id: u64) -> AppResult<Post> {
        self.post_repo.get_by_id(post_id)
    }

    /// List a creator's posts with the pinned post first and the rest in feed order.
    pub fn list_posts_by_creator(&self, creator_id: u64) -> AppResult<Vec<Post>> {
        let mut posts = self.post_repo.find_by_creator(creator_id)?;
        // Stable sort: unpinned posts keep their relative order.
        posts.sort_by_key(|p| !p.is_pinned);
        Ok(posts)
    }

    /// Publish a new post at the top of a creator's feed.
    pub fn create_post(&self, creator_id: u64, input: CreatePostInput) -> AppResult<Post> {
        input.validate()?;

        if !self.creator_repo.exists(creator_id)? {
            return Err(AppError::CreatorNotFound(creator_id));
        }

        let content = match (input.content, input.price) {
            (NewPostContent::Text { body }, None) => {
                if body.trim().is_empty() {
                    return Err(AppError::Validation("Text post body is empty".to_string()));
                }
                PostContent::Text { body }
            }
            (NewPostContent::Text { .. }, Some(_)) => {
                return Err(AppError::Validation(
                    "Text posts cannot be pay-per-view".to_string(),
                ));
            }
            (NewPostContent::Media { kind, url }, price) => {
                if url.trim().is_empty() {
                    return Err(AppError::Validation("Media post URL is empty".to_string()));
                }
                let access = match price {
                    Some(price) if price.is_free() => {
                        return Err(AppError::Validation(
                            "Pay-per-view price must be positive".to_string(),
                        ));
                    }
                    Some(price) => PostAccess::PayPerView { price },
                    None => PostAccess::Free,
                };
                PostContent::Media { kind, url, access }
            }
        };

        let post = Post {
            id: self.post_repo.next_id()?,
            creator_id,
            content,
            caption: input.caption,
            timestamp: "just now".to_string(),
            likes: 0,
            comments: 0,
            is_liked: false,
            is_pinned: false,
        };

        let post = self.post_repo.insert_front(post)?;
        self.creator_repo
            .update(creator_id, |c| c.stats.posts = c.stats.posts.saturating_add(1))?;

        info!(post_id = post.id, creator_id, ppv = post.is_ppv(), "Created post");
        Ok(post)
    }

    /// Delete a post permanently. Missing ids are a no-op.
    ///
    /// Creator stats are left untouched.
    pub fn delete_post(&self, post_id: u64) -> AppResult<bool> {
        let deleted = self.post_repo.delete(post_id)?;
        if deleted {
            info!(post_id, "Deleted post");
        } else {
            debug!(post_id, "Delete skipped: post not found");
        }
        Ok(deleted)
    }

    /// Toggle a post's pin.
    ///
    /// Pinning clears any other pin in the configured scope, so a creator never has more
    /// than one pinned post. Unpinning touches nothing else.
    pub fn pin_post(&self, post_id: u64) -> AppResult<Option<Post>> {
        let Some(target) = self.post_repo.find_by_id(post_id)? else {
            debug!(post_id, "Pin skipped: post not found");
            return Ok(None);
        };

        let pinning = !target.is_pinned;
        let scope = self.pin_scope;
        let mut updated = None;

        self.post_repo.update_all(|post| {
            if post.id == post_id {
                post.is_pinned = pinning;
                updated = Some(post.clone());
            } else if pinning
                && post.is_pinned
                && (scope == PinScope::Global || post.creator_id == target.creator_id)
            {
                post.is_pinned = false;
            }
        })?;

        info!(post_id, pinned = pinning, ?scope, "Toggled post pin");
        Ok(updated)
    }

    /// Replace a post's caption. Empty captions are allowed.
    pub fn edit_post(&self, post_id: u64, caption: String) -> AppResult<Option<Post>> {
        let updated = self.post_repo.update(post_id, |post| {
            post.caption = Some(caption);
            post.clone()
        })?;
        if updated.is_none() {
            debug!(post_id, "Edit skipped: post not found");
        }
        Ok(updated)
    }

    /// Toggle the viewer's like on a post.
    pub fn like_post(&self, post_id: u64) -> AppResult<Option<Post>> {
        let updated = self.post_repo.update(post_id, |post| {
            post.toggle_like();
            post.clone()
        })?;
        match &updated {
            Some(post) => debug!(post_id, liked = post.is_liked, likes = post.likes, "Toggled like"),
            None => debug!(post_id, "Like skipped: post not found"),
        }
        Ok(updated)
    }
}
