// Directory listing over PROPFIND.
//
// Turns the multi-status document for one folder into its direct children.
// Hrefs come back percent-encoded and often relative to the server root, so
// everything is normalised into absolute `Url`s here and compared through
// `folder_key`, which ignores encoding differences and trailing slashes.

use crate::dav::DavTransport;
use crate::error::{Result, SyncError, Verb};
use tracing::warn;
use url::Url;

const DAV_NS: &str = "DAV:";
const MULTI_STATUS: u16 = 207;

/// One direct child of a listed folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub url: Url,
    pub is_dir: bool,
}

impl DirEntry {
    /// Percent-decoded final path segment.
    pub fn base_name(&self) -> String {
        decoded_segments(&self.url).pop().unwrap_or_default()
    }
}

/// Path segments of `url`, percent-decoded, empty segments dropped.
pub fn decoded_segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(|s| {
                    urlencoding::decode(s)
                        .map(|d| d.into_owned())
                        .unwrap_or_else(|_| s.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Identity of a folder locator: origin plus decoded path, no trailing slash.
pub fn folder_key(url: &Url) -> String {
    format!(
        "{}/{}",
        url.origin().ascii_serialization(),
        decoded_segments(url).join("/")
    )
}

/// List the direct children of `folder`.
///
/// `service_root` is the base URL relative hrefs are resolved against.
pub fn list_children<T>(dav: &T, service_root: &Url, folder: &Url) -> Result<Vec<DirEntry>>
where
    T: DavTransport + ?Sized,
{
    let res = dav.propfind(folder)?;
    if res.status != MULTI_STATUS {
        return Err(SyncError::protocol(Verb::Propfind, folder.as_str(), res.status));
    }
    parse_multistatus(&res.body, folder, service_root)
}

/// Parse a multi-status body, dropping the entry describing `folder` itself.
pub fn parse_multistatus(body: &str, folder: &Url, service_root: &Url) -> Result<Vec<DirEntry>> {
    let doc = roxmltree::Document::parse(body).map_err(|e| SyncError::MalformedResponse {
        url: folder.to_string(),
        reason: e.to_string(),
    })?;
    let own_key = folder_key(folder);

    let mut entries = Vec::new();
    for response in doc
        .descendants()
        .filter(|n| n.has_tag_name((DAV_NS, "response")))
    {
        let href = response
            .children()
            .find(|n| n.has_tag_name((DAV_NS, "href")))
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|h| !h.is_empty());
        let Some(href) = href else {
            warn!(%folder, "multi-status entry without href, skipped");
            continue;
        };
        let url = match service_root.join(href) {
            Ok(url) => url,
            Err(e) => {
                warn!(%folder, href, error = %e, "unresolvable href, skipped");
                continue;
            }
        };
        if folder_key(&url) == own_key {
            continue;
        }
        let is_dir = response
            .descendants()
            .any(|n| n.has_tag_name((DAV_NS, "collection")));
        entries.push(DirEntry { url, is_dir });
    }
    Ok(entries)
}
