//! Lookup by free-text term.

use super::ArrClient;
use crate::error::ArrResult;
use crate::http::HttpBackend;
use crate::models::LookupItem;
use crate::url::build_lookup_url;

impl<B: HttpBackend> ArrClient<B> {
    /// Raw lookup results, in backend order.
    pub(crate) async fn lookup(&self, term: &str) -> ArrResult<Vec<LookupItem>> {
        let url = build_lookup_url(&self.config.base_url, self.config.flavor.resource(), term);
        tracing::debug!(service = self.config.flavor.service_name(), term, "Looking up");
        self.backend.get_json(&url).await
    }
}
