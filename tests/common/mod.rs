// In-memory stand-in for a Nextcloud WebDAV server: a file tree under
// `/remote.php/dav/files/<user>` and an album store under
// `/remote.php/dav/photos/<user>/albums`, answering with the status codes
// the real server uses.

#![allow(dead_code)]

use remote2albums::dav::{DavResponse, DavTransport};
use remote2albums::Result;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

pub const BASE: &str = "https://cloud.test/";

pub struct FakeDav {
    files_prefix: String,
    albums_prefix: String,
    folders: BTreeSet<String>,
    files: BTreeSet<String>,
    // album name -> (link name -> source path)
    albums: RefCell<BTreeMap<String, BTreeMap<String, String>>>,
    requests: RefCell<Vec<String>>,
}

fn decoded_path(url: &Url) -> String {
    let segments: Vec<String> = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).unwrap().into_owned())
        .collect();
    format!("/{}", segments.join("/"))
}

fn encoded_href(path: &str, is_dir: bool) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    let mut href = encoded.join("/");
    if is_dir {
        href.push('/');
    }
    href
}

impl FakeDav {
    /// `paths` are relative to the user's file root; entries ending in `/`
    /// are (possibly empty) folders, everything else a file.
    pub fn new(user: &str, paths: &[&str]) -> Self {
        let files_prefix = format!("/remote.php/dav/files/{user}");
        let mut folders = BTreeSet::from([files_prefix.clone()]);
        let mut files = BTreeSet::new();
        for path in paths {
            let full = format!("{files_prefix}/{}", path.trim_end_matches('/'));
            let mut parent = full.as_str();
            while let Some((p, _)) = parent.rsplit_once('/') {
                if p.len() < files_prefix.len() {
                    break;
                }
                folders.insert(p.to_string());
                parent = p;
            }
            if path.ends_with('/') {
                folders.insert(full);
            } else {
                files.insert(full);
            }
        }
        FakeDav {
            files_prefix,
            albums_prefix: format!("/remote.php/dav/photos/{user}/albums"),
            folders,
            files,
            albums: RefCell::new(BTreeMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn album_names(&self) -> Vec<String> {
        self.albums.borrow().keys().cloned().collect()
    }

    pub fn links(&self, album: &str) -> Vec<String> {
        self.albums
            .borrow()
            .get(album)
            .map(|links| links.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn children<'a>(&'a self, set: &'a BTreeSet<String>, folder: &'a str) -> impl Iterator<Item = &'a String> {
        set.iter().filter(move |p| {
            p.strip_prefix(folder)
                .and_then(|rest| rest.strip_prefix('/'))
                .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
        })
    }

    fn log(&self, verb: &str, path: &str) {
        self.requests.borrow_mut().push(format!("{verb} {path}"));
    }
}

impl DavTransport for FakeDav {
    fn propfind(&self, url: &Url) -> Result<DavResponse> {
        let folder = decoded_path(url);
        self.log("PROPFIND", &folder);
        if !self.folders.contains(&folder) {
            return Ok(DavResponse {
                status: 404,
                body: String::new(),
            });
        }
        let mut body = String::from(r#"<?xml version="1.0"?><d:multistatus xmlns:d="DAV:">"#);
        let mut entry = |path: &str, is_dir: bool| {
            let kind = if is_dir { "<d:collection/>" } else { "" };
            body.push_str(&format!(
                "<d:response><d:href>{}</d:href><d:propstat><d:prop><d:resourcetype>{kind}\
                 </d:resourcetype></d:prop><d:status>HTTP/1.1 200 OK</d:status></d:propstat>\
                 </d:response>",
                encoded_href(path, is_dir)
            ));
        };
        entry(folder.as_str(), true);
        for sub in self.children(&self.folders, &folder) {
            entry(sub.as_str(), true);
        }
        for file in self.children(&self.files, &folder) {
            entry(file.as_str(), false);
        }
        body.push_str("</d:multistatus>");
        Ok(DavResponse { status: 207, body })
    }

    fn mkcol(&self, url: &Url) -> Result<u16> {
        let path = decoded_path(url);
        self.log("MKCOL", &path);
        let Some(name) = path
            .strip_prefix(&self.albums_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(403);
        };
        let mut albums = self.albums.borrow_mut();
        if albums.contains_key(name) {
            return Ok(405);
        }
        albums.insert(name.to_string(), BTreeMap::new());
        Ok(201)
    }

    fn copy(&self, source: &Url, destination: &Url) -> Result<u16> {
        let src = decoded_path(source);
        let dst = decoded_path(destination);
        self.log("COPY", &src);
        if !self.files.contains(&src) || !src.starts_with(&self.files_prefix) {
            return Ok(404);
        }
        let Some((album, name)) = dst
            .strip_prefix(&self.albums_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.split_once('/'))
        else {
            return Ok(403);
        };
        let mut albums = self.albums.borrow_mut();
        let Some(links) = albums.get_mut(album) else {
            return Ok(409);
        };
        match links.get(name) {
            Some(existing) if *existing == src => Ok(204),
            Some(_) => Ok(409),
            None => {
                links.insert(name.to_string(), src);
                Ok(201)
            }
        }
    }
}
