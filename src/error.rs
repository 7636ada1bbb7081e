// Error types shared by every stage of a run.
//
// Only unexpected outcomes live here. "Album exists", "already linked",
// "conflict" and "forbidden" are normal idempotent results and are modelled
// as outcome enums in `sync`, never as errors.

use std::fmt;
use thiserror::Error;

/// The three WebDAV verbs a run issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Propfind,
    Mkcol,
    Copy,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Propfind => "PROPFIND",
            Verb::Mkcol => "MKCOL",
            Verb::Copy => "COPY",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum SyncError {
    /// The server answered with a status outside the expected set for `verb`.
    #[error("{verb} {url} -> {status}")]
    Protocol { verb: Verb, url: String, status: u16 },

    /// The request never produced a status code (DNS, TLS, connection reset).
    #[error("{verb} {url} failed: {source}")]
    Transport {
        verb: Verb,
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unreadable multi-status response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("cannot build a locator for {name:?} below {parent}: {reason}")]
    Locator {
        parent: String,
        name: String,
        reason: String,
    },

    #[error("interrupted")]
    Interrupted,
}

impl SyncError {
    pub fn protocol(verb: Verb, url: impl Into<String>, status: u16) -> Self {
        SyncError::Protocol {
            verb,
            url: url.into(),
            status,
        }
    }

    /// Status code carried by a protocol failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
