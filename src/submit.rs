// SPDX-License-Identifier: GPL-3.0-only

//! Post composition and the submit collaborator
//!
//! The capture core hands finished posts to an external posting service.
//! That service is out of scope here — the in-tree sink only logs — so the
//! contract is fire-and-forget: invoked at most once per asset, always with
//! a live asset.

use crate::storage::Asset;
use tracing::info;

/// A composed post ready for delivery
#[derive(Debug, Clone)]
pub struct Post {
    /// The captured asset backing this post
    pub asset: Asset,
    /// Caption typed in review; may be empty
    pub caption: String,
    /// Selected friend recipient ids; empty means everyone
    pub recipients: Vec<String>,
}

/// Delivery collaborator for finished posts
pub trait PostSink {
    /// Hand a post to the posting service; fire-and-forget
    fn deliver(&self, post: &Post);
}

/// Sink that logs the post instead of uploading it
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl PostSink for ConsoleSink {
    fn deliver(&self, post: &Post) {
        info!(
            asset_id = %post.asset.id,
            kind = %post.asset.kind,
            square_size = post.asset.square_size,
            caption = %post.caption,
            recipients = post.recipients.len(),
            "Submitting post"
        );
    }
}
