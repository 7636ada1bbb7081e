// WebDAV transport: a small blocking HTTP client that speaks the three verbs
// a run needs. It knows nothing about albums or folders; it sends a request
// and hands back the raw status (and body for PROPFIND). Interpreting those
// codes is the job of `listing` and `sync`.

use crate::error::{Result, SyncError, Verb};
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Shallow PROPFIND body asking for the resource type only.
pub const PROPFIND_BODY: &str = concat!(
    r#"<?xml version="1.0"?>"#,
    r#"<d:propfind xmlns:d="DAV:"><d:prop><d:resourcetype/></d:prop></d:propfind>"#
);

/// Status and body of a PROPFIND exchange.
#[derive(Debug, Clone)]
pub struct DavResponse {
    pub status: u16,
    pub body: String,
}

/// The remote operations the synchronizer depends on.
///
/// Implementations return `Err` only when no status code could be obtained;
/// every status code, expected or not, is returned as data.
#[cfg_attr(test, mockall::automock)]
pub trait DavTransport {
    /// Depth-1 PROPFIND on `url`.
    fn propfind(&self, url: &Url) -> Result<DavResponse>;

    /// MKCOL on `url`, returning the status code.
    fn mkcol(&self, url: &Url) -> Result<u16>;

    /// COPY `source` to `destination`, returning the status code.
    fn copy(&self, source: &Url, destination: &Url) -> Result<u16>;
}

/// `DavTransport` over `reqwest::blocking` with basic authentication.
///
/// Credentials are fixed at construction and never change during a run.
#[derive(Clone)]
pub struct HttpDav {
    client: Client,
    user: String,
    password: String,
    // PROPFIND, MKCOL, COPY
    methods: [Method; 3],
}

impl HttpDav {
    /// Build the underlying HTTP client once; every request reuses it.
    pub fn new(user: &str, password: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        let method = |verb: Verb| {
            Method::from_bytes(verb.as_str().as_bytes())
                .with_context(|| format!("Invalid HTTP method {verb}"))
        };
        Ok(HttpDav {
            client,
            user: user.to_string(),
            password: password.to_string(),
            methods: [
                method(Verb::Propfind)?,
                method(Verb::Mkcol)?,
                method(Verb::Copy)?,
            ],
        })
    }

    fn method(&self, verb: Verb) -> &Method {
        match verb {
            Verb::Propfind => &self.methods[0],
            Verb::Mkcol => &self.methods[1],
            Verb::Copy => &self.methods[2],
        }
    }

    fn request(&self, verb: Verb, url: &Url) -> reqwest::blocking::RequestBuilder {
        self.client
            .request(self.method(verb).clone(), url.clone())
            .basic_auth(&self.user, Some(&self.password))
    }

    fn transport_error(verb: Verb, url: &Url, err: reqwest::Error) -> SyncError {
        SyncError::Transport {
            verb,
            url: url.to_string(),
            source: Box::new(err),
        }
    }
}

impl DavTransport for HttpDav {
    fn propfind(&self, url: &Url) -> Result<DavResponse> {
        let res = self
            .request(Verb::Propfind, url)
            .header("Depth", "1")
            .header(CONTENT_TYPE, HeaderValue::from_static("application/xml"))
            .body(PROPFIND_BODY)
            .send()
            .map_err(|e| Self::transport_error(Verb::Propfind, url, e))?;
        let status = res.status().as_u16();
        let body = res
            .text()
            .map_err(|e| Self::transport_error(Verb::Propfind, url, e))?;
        debug!(%url, status, bytes = body.len(), "PROPFIND");
        Ok(DavResponse { status, body })
    }

    fn mkcol(&self, url: &Url) -> Result<u16> {
        let res = self
            .request(Verb::Mkcol, url)
            .send()
            .map_err(|e| Self::transport_error(Verb::Mkcol, url, e))?;
        let status = res.status().as_u16();
        debug!(%url, status, "MKCOL");
        Ok(status)
    }

    fn copy(&self, source: &Url, destination: &Url) -> Result<u16> {
        let res = self
            .request(Verb::Copy, source)
            .header("Destination", destination.as_str())
            .send()
            .map_err(|e| Self::transport_error(Verb::Copy, source, e))?;
        let status = res.status().as_u16();
        debug!(%source, %destination, status, "COPY");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_methods_are_preserved() {
        let dav = HttpDav::new("u", "p", Duration::from_secs(5)).unwrap();
        assert_eq!(dav.method(Verb::Propfind).as_str(), "PROPFIND");
        assert_eq!(dav.method(Verb::Mkcol).as_str(), "MKCOL");
        assert_eq!(dav.method(Verb::Copy).as_str(), "COPY");
    }

    #[test]
    fn propfind_body_only_requests_resourcetype() {
        assert!(PROPFIND_BODY.contains("<d:resourcetype/>"));
        assert!(!PROPFIND_BODY.contains("getcontentlength"));
    }
}
