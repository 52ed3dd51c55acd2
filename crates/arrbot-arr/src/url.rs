//! URL builders for the v3 API.

use url::Url;

use crate::error::ArrResult;

/// Parse the configured base URL.
pub fn parse_base_url(base: &str) -> ArrResult<Url> {
    Ok(Url::parse(base.trim())?)
}

/// `{base}/api/v3/{endpoint}`, keeping any path prefix on the base.
pub fn build_api_url(base: &Url, endpoint: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}/api/v3/{}", endpoint.trim_start_matches('/')));
    url.set_query(None);
    url
}

/// Lookup URL for a free-text term.
pub fn build_lookup_url(base: &Url, resource: &str, term: &str) -> Url {
    let mut url = build_api_url(base, &format!("{resource}/lookup"));
    url.query_pairs_mut().append_pair("term", term);
    url
}
