//! Next-page URL builder

use crate::error::Result;
use crate::state::PaginationState;
use crate::types::{MergeMode, PAGE_QUERY_PARAM};
use tracing::debug;
use url::Url;

/// Build the absolute URL of the next fetch. Pure given its inputs.
///
/// The base URL resolves against the origin of `document_url`; the live
/// page's own path and query never leak into the request.
pub fn build_next_url(state: &PaginationState, document_url: &Url) -> Result<Url> {
    let mut url = origin_root(document_url)?.join(&state.base_url)?;

    if state.mode == MergeMode::Append && state.tracks_page {
        let next = state.current_page.saturating_add(1).to_string();
        set_query_param(&mut url, PAGE_QUERY_PARAM, &next);
    }

    debug!(url = %url, "Built next page URL");
    Ok(url)
}

/// Root URL (`scheme://host[:port]/`) of the document's origin. Documents
/// with an opaque origin (`file:`, `data:`) resolve against themselves.
fn origin_root(document_url: &Url) -> Result<Url> {
    let origin = document_url.origin();
    if !origin.is_tuple() {
        return Ok(document_url.clone());
    }
    Ok(Url::parse(&format!("{}/", origin.ascii_serialization()))?)
}

/// Set a query parameter, replacing the first occurrence in place and
/// dropping any later duplicates. Appends when the key is absent.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (k, v) in url.query_pairs() {
        if k == key {
            if !replaced {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }

    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs.iter());
}
