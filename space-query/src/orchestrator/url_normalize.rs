//! URL canonicalisation for result de-duplication.
//!
//! Two result links are the same page when they differ only in scheme or
//! host case, a default port, a fragment, a trailing slash, tracking
//! parameters or query-parameter order.

use url::form_urlencoded;
use url::Url;

/// Query parameters that never change page content.
const TRACKING_PARAMS: &[&str] = &[
    "cmpid", "fbclid", "gclid", "mc_cid", "mc_eid", "msclkid", "ref", "ref_src", "_ga", "_gl",
];

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Canonical form of `raw` for equality comparison.
///
/// Input that does not parse as an absolute URL is returned trimmed but
/// otherwise unchanged.
///
/// # Examples
///
/// ```
/// use space_query::orchestrator::url_normalize::normalize_url;
///
/// assert_eq!(
///     normalize_url("HTTPS://www.NASA.gov:443/missions/?utm_source=x&b=2&a=1#top"),
///     normalize_url("https://www.nasa.gov/missions?a=1&b=2"),
/// );
/// ```
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_owned();
    };

    // Url::parse lower-cases scheme and host and drops default ports.
    url.set_fragment(None);

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    params.sort();

    if params.is_empty() {
        url.set_query(None);
    } else {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&params)
            .finish();
        url.set_query(Some(&query));
    }

    let trimmed = url.path().trim_end_matches('/').to_owned();
    if !trimmed.is_empty() {
        url.set_path(&trimmed);
    }

    url.to_string()
}
