// Run configuration: the locators derived from base URL, user and remote
// path, plus the knobs the synchronizer reads. Parsing them from the command
// line and the environment happens in `main`.

use crate::media::MediaFilter;
use crate::naming::Naming;
use thiserror::Error;
use url::Url;

/// Path of the WebDAV endpoint below the base URL.
pub const DAV_ENDPOINT: [&str; 2] = ["remote.php", "dav"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("base URL {0} must be http or https")]
    Scheme(String),

    #[error("base URL {0} cannot carry a path")]
    NotABase(String),
}

/// Every locator a run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Base URL with a trailing slash; relative hrefs resolve against it.
    pub service_root: Url,
    /// `<base>/remote.php/dav/files/<user>/<remote path>`
    pub files_root: Url,
    /// `<base>/remote.php/dav/photos/<user>/albums`
    pub albums_root: Url,
}

impl Layout {
    pub fn new(base: &Url, user: &str, remote_path: &str) -> Result<Self, ConfigError> {
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Scheme(base.to_string()));
        }
        let files_root = below(
            base,
            DAV_ENDPOINT
                .iter()
                .copied()
                .chain(["files", user])
                .chain(remote_path.split('/').filter(|s| !s.is_empty())),
        )?;
        let albums_root = below(
            base,
            DAV_ENDPOINT.iter().copied().chain(["photos", user, "albums"]),
        )?;
        let mut service_root = base.clone();
        service_root.set_query(None);
        service_root.set_fragment(None);
        if !service_root.path().ends_with('/') {
            let path = format!("{}/", service_root.path());
            service_root.set_path(&path);
        }
        Ok(Layout {
            service_root,
            files_root,
            albums_root,
        })
    }
}

/// `base` with `segments` appended, each percent-encoded.
fn below<'s>(base: &Url, segments: impl IntoIterator<Item = &'s str>) -> Result<Url, ConfigError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| ConfigError::NotABase(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Behaviour switches for one run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub naming: Naming,
    pub media: MediaFilter,
    /// Ensure an album for every walked folder, before listing its files.
    ///
    /// Off by default: a folder's files are listed first and the album is
    /// only created when at least one media file is present, so folders that
    /// merely hold subfolders (the root, year folders) do not become empty
    /// albums. Turning it on gives every folder an album, media or not.
    pub include_empty: bool,
}
