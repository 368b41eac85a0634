//! Request URL resolution.

use std::collections::HashMap;
use url::Url;

/// Combine a base URL, a route suffix, and extra query parameters into one
/// request URL.
///
/// A single trailing slash is stripped from the base and a single leading
/// slash from the route. Extra parameters are appended to any query string
/// already on the base (existing pairs are kept, never overwritten) and the
/// result is re-serialized sorted by key so the output is deterministic.
///
/// A base that does not parse as an absolute URL degrades to plain string
/// concatenation with no query merging.
pub fn resolve(base_url: &str, route: &str, params: &HashMap<String, String>) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    if route.is_empty() && params.is_empty() {
        return base.to_string();
    }

    let trimmed_route = route.strip_prefix('/').unwrap_or(route);

    let Ok(mut url) = Url::parse(base) else {
        return format!("{base}/{trimmed_route}");
    };

    if !trimmed_route.is_empty() {
        let path = format!("{}/{}", url.path().trim_end_matches('/'), trimmed_route);
        url.set_path(&path);
    }

    if !params.is_empty() {
        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        for (key, value) in params {
            pairs.push((key.clone(), value.clone()));
        }
        // Stable sort: duplicate keys keep base-then-params order.
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}
