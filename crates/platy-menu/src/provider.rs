//! Chat Model Strategy
//!
//! One seam for the generative model so the service can be exercised with
//! canned or failing models in tests, and the hosted provider can be
//! swapped without touching the generation loop.

use async_trait::async_trait;

use crate::error::Result;

/// Strategy trait for chat-completion backends.
///
/// The service only ever asks for a single JSON completion; streaming and
/// multi-turn state are out of scope here.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Provider/model label for logs
    fn name(&self) -> &str;

    /// One system + user turn, answered as raw text that should be JSON
    async fn complete_json(&self, system: &str, user: &str) -> Result<String>;
}
