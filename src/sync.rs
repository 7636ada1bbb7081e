// Album/link synchronizer.
//
// For every folder the walker yields: name the album, make sure it exists,
// list the folder again, and link each media file into the album. Every
// MKCOL and COPY status is classified into an outcome; anything outside the
// idempotent set aborts the whole run.

pub use crate::cancel::CancelToken;
use crate::config::{Layout, SyncOptions};
use crate::dav::DavTransport;
use crate::error::{Result, SyncError, Verb};
use crate::listing::{list_children, DirEntry};
use crate::naming::{album_url, child_url, name_for};
use crate::report::{Reporter, RunStats, TraceSink};
use crate::walker::walk;
use tracing::debug;
use url::Url;

/// Result of ensuring an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumOutcome {
    /// 201
    Created,
    /// 405
    Exists,
}

/// Result of linking one file into an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// 201: new link.
    Linked,
    /// 204: the identical link is already there.
    AlreadyLinked,
    /// 409: another file with this name already occupies the slot.
    Conflict,
    /// 403: link present and the server refuses to relink.
    Forbidden,
}

impl LinkOutcome {
    /// Only a fresh link counts towards the statistics.
    pub fn is_new(self) -> bool {
        self == LinkOutcome::Linked
    }
}

pub fn classify_mkcol(url: &Url, status: u16) -> Result<AlbumOutcome> {
    match status {
        201 => Ok(AlbumOutcome::Created),
        405 => Ok(AlbumOutcome::Exists),
        _ => Err(SyncError::protocol(Verb::Mkcol, url.as_str(), status)),
    }
}

pub fn classify_copy(source: &Url, status: u16) -> Result<LinkOutcome> {
    match status {
        201 => Ok(LinkOutcome::Linked),
        204 => Ok(LinkOutcome::AlreadyLinked),
        409 => Ok(LinkOutcome::Conflict),
        403 => Ok(LinkOutcome::Forbidden),
        _ => Err(SyncError::protocol(Verb::Copy, source.as_str(), status)),
    }
}

pub struct Synchronizer<'a, T: ?Sized> {
    dav: &'a T,
    layout: &'a Layout,
    options: &'a SyncOptions,
    cancel: CancelToken,
}

impl<'a, T> Synchronizer<'a, T>
where
    T: DavTransport + ?Sized,
{
    pub fn new(dav: &'a T, layout: &'a Layout, options: &'a SyncOptions, cancel: CancelToken) -> Self {
        Synchronizer {
            dav,
            layout,
            options,
            cancel,
        }
    }

    /// Walk the files root and mirror every folder.
    ///
    /// Returns the counters for this run. Stops at the first fatal outcome or
    /// when the cancel token is raised; remote writes done so far stay.
    pub fn run<S: TraceSink>(&self, reporter: &mut Reporter<S>) -> Result<RunStats> {
        let root = &self.layout.files_root;
        let walker = walk(self.dav, &self.layout.service_root, root.clone())
            .with_cancel(self.cancel.clone());
        for folder in walker {
            self.cancel.check()?;
            self.sync_folder(&folder?, reporter)?;
        }
        // A stop raised during the last request must not end in success.
        self.cancel.check()?;
        Ok(reporter.stats())
    }

    fn sync_folder<S: TraceSink>(&self, folder: &Url, reporter: &mut Reporter<S>) -> Result<()> {
        let name = name_for(folder, &self.layout.files_root, self.options.naming);
        reporter.folder(&name);
        let album = album_url(&self.layout.albums_root, &name).map_err(|e| SyncError::Locator {
            parent: self.layout.albums_root.to_string(),
            name: name.clone(),
            reason: e.to_string(),
        })?;

        if self.options.include_empty {
            self.ensure_album(&name, &album, reporter)?;
        }

        // Second listing of this folder; the walker's one only feeds the queue.
        self.cancel.check()?;
        let media: Vec<DirEntry> = list_children(self.dav, &self.layout.service_root, folder)?
            .into_iter()
            .filter(|e| !e.is_dir && self.options.media.matches(&e.base_name()))
            .collect();
        debug!(%folder, media = media.len(), "listed folder");

        if !self.options.include_empty {
            if media.is_empty() {
                reporter.empty_folder(&name);
                return Ok(());
            }
            self.ensure_album(&name, &album, reporter)?;
        }

        for entry in &media {
            self.cancel.check()?;
            let file = entry.base_name();
            let destination = child_url(&album, &file).map_err(|e| SyncError::Locator {
                parent: album.to_string(),
                name: file.clone(),
                reason: e.to_string(),
            })?;
            let status = self.dav.copy(&entry.url, &destination)?;
            reporter.link(&name, &file, classify_copy(&entry.url, status)?);
        }
        Ok(())
    }

    fn ensure_album<S: TraceSink>(&self, name: &str, album: &Url, reporter: &mut Reporter<S>) -> Result<()> {
        self.cancel.check()?;
        let status = self.dav.mkcol(album)?;
        reporter.album(name, classify_mkcol(album, status)?);
        Ok(())
    }
}
