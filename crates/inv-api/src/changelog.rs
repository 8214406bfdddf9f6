//! Client for `/changelog`: the inventory-wide change feed.

use inv_core::entities::ChangelogEntry;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ChangelogClient {
    client: ApiClient,
}

impl ChangelogClient {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the full change feed, oldest first as the API returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the feed cannot be
    /// decoded.
    pub async fn list(&self) -> Result<Vec<ChangelogEntry>, ApiError> {
        let resp = self.client.execute(self.client.get("changelog")).await?;
        Ok(resp.json().await?)
    }
}
