// Breadth-first walk of the remote folder tree.
//
// The walk is an explicit work queue rather than recursion: pop a folder,
// hand it to the caller, and only on the following pull list it and enqueue
// its unseen subfolders. A folder is therefore always yielded before any of
// its descendants.

use crate::cancel::CancelToken;
use crate::dav::DavTransport;
use crate::error::Result;
use crate::listing::{folder_key, list_children};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Iterator over every folder below (and including) a root.
///
/// Finite and single use; a listing failure is yielded once and ends it.
pub struct Walker<'a, T: ?Sized> {
    dav: &'a T,
    service_root: &'a Url,
    queue: VecDeque<Url>,
    visited: HashSet<String>,
    // Yielded but not yet listed.
    pending: Option<Url>,
    failed: bool,
    cancel: CancelToken,
}

impl<'a, T> Walker<'a, T>
where
    T: DavTransport + ?Sized,
{
    pub fn new(dav: &'a T, service_root: &'a Url, root: Url) -> Self {
        let mut visited = HashSet::new();
        visited.insert(folder_key(&root));
        Walker {
            dav,
            service_root,
            queue: VecDeque::from([root]),
            visited,
            pending: None,
            failed: false,
            cancel: CancelToken::new(),
        }
    }

    /// Stop before the next listing once `cancel` is raised.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn descend(&mut self, folder: &Url) -> Result<()> {
        for entry in list_children(self.dav, self.service_root, folder)? {
            if entry.is_dir && self.visited.insert(folder_key(&entry.url)) {
                self.queue.push_back(entry.url);
            }
        }
        Ok(())
    }
}

impl<'a, T> Iterator for Walker<'a, T>
where
    T: DavTransport + ?Sized,
{
    type Item = Result<Url>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(previous) = self.pending.take() {
            if let Err(e) = self.cancel.check().and_then(|_| self.descend(&previous)) {
                self.failed = true;
                return Some(Err(e));
            }
        }
        let folder = self.queue.pop_front()?;
        self.pending = Some(folder.clone());
        Some(Ok(folder))
    }
}

/// Convenience wrapper around [`Walker::new`].
pub fn walk<'a, T>(dav: &'a T, service_root: &'a Url, root: Url) -> Walker<'a, T>
where
    T: DavTransport + ?Sized,
{
    Walker::new(dav, service_root, root)
}
