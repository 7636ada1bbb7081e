// Folder -> album name mapping.
//
// The mapping is a pure function of the folder locator, the root locator and
// the policy, so the same folder always lands in the same album across runs.

use crate::listing::decoded_segments;
use url::Url;

/// Separator substituted for `/` under the `long` policy.
pub const LONG_SEPARATOR: &str = " -- ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Naming {
    /// Folder's own name only. Same-named folders in different places share
    /// one album.
    Short,
    /// Path below the root, `a/b` becomes `a -- b`.
    #[default]
    Long,
}

/// Album name for `folder` under `policy`.
///
/// The root itself has no relative path; under `long` it is named after its
/// own final segment, as under `short`.
pub fn name_for(folder: &Url, root: &Url, policy: Naming) -> String {
    let segments = decoded_segments(folder);
    let base = segments.last().cloned().unwrap_or_default();
    match policy {
        Naming::Short => base,
        Naming::Long => {
            let root_segments = decoded_segments(root);
            match segments.strip_prefix(root_segments.as_slice()) {
                Some([]) => base,
                Some(relative) => relative.join(LONG_SEPARATOR),
                // Outside the root: fall back to the full decoded path.
                None => segments.join(LONG_SEPARATOR),
            }
        }
    }
}

/// Locator of the album called `name` below `albums_root`.
pub fn album_url(albums_root: &Url, name: &str) -> Result<Url, url::ParseError> {
    child_url(albums_root, name)
}

/// `parent/<name>` with `name` percent-encoded as a single segment.
pub fn child_url(parent: &Url, name: &str) -> Result<Url, url::ParseError> {
    let joined = format!(
        "{}/{}",
        parent.as_str().trim_end_matches('/'),
        urlencoding::encode(name)
    );
    Url::parse(&joined)
}
