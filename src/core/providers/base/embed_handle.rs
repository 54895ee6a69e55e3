//! Generic capability adapter binding a provider's own embeddings method to
//! the unified `Embedding` trait, the embedding analog of `chat_handle`'s
//! `RawChat`/`ChatHandle`.

use async_trait::async_trait;

use crate::core::traits::provider::Embedding;
use crate::core::types::{EmbeddingInput, EmbeddingRequest, RequestContext};
use crate::utils::error::{GatewayError, Result};

use super::chat_handle::ChatHandle;
use super::RawChat;

/// A provider's raw embeddings call, the embedding analog of `RawChat`.
#[async_trait]
pub trait RawEmbed: Send + Sync {
    /// The provider's own error type
    type Error: Into<GatewayError> + Send + Sync + 'static;

    async fn raw_embeddings(
        &self,
        request: EmbeddingRequest,
        context: RequestContext,
    ) -> std::result::Result<crate::core::types::EmbeddingResponse, Self::Error>;
}

#[async_trait]
impl<P: RawChat + RawEmbed> Embedding for ChatHandle<P> {
    async fn embed(&self, inputs: Vec<String>) -> Result<Vec<Vec<f64>>> {
        let request = EmbeddingRequest {
            model: self.defaults().model.clone(),
            input: EmbeddingInput::Array(inputs),
            user: None,
            encoding_format: None,
            dimensions: None,
            task_type: None,
        };
        let response = self
            .provider()
            .raw_embeddings(request, RequestContext::default())
            .await
            .map_err(Into::into)?;

        Ok(response
            .data
            .into_iter()
            .map(|data| data.embedding.into_iter().map(|f| f as f64).collect())
            .collect())
    }
}
