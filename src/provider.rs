//! Subtitle provider seam
//!
//! The dispatcher only needs "search for a context" and "fetch a body by id".
//! [`SubtisClient`] is the production implementation.

use std::future::Future;

use crate::api::{FetchError, SubtisClient};
use crate::models::{PlaybackContext, SubtitleCandidate, SubtitleId};

pub trait SubtitleProvider {
    /// Ordered candidates for the context, as the remote returned them
    fn search(
        &self,
        context: &PlaybackContext,
    ) -> impl Future<Output = Result<Vec<SubtitleCandidate>, FetchError>>;

    /// Full subtitle file content
    fn fetch(&self, id: &SubtitleId) -> impl Future<Output = Result<String, FetchError>>;
}

impl SubtitleProvider for SubtisClient {
    async fn search(
        &self,
        context: &PlaybackContext,
    ) -> Result<Vec<SubtitleCandidate>, FetchError> {
        self.try_search(context).await
    }

    async fn fetch(&self, id: &SubtitleId) -> Result<String, FetchError> {
        self.fetch_subtitle(id).await
    }
}
