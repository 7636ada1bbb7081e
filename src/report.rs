// Run reporting: counters plus the human-readable trace.
//
// The reporter owns the statistics for one run. The synchronizer feeds it
// every classified outcome and it decides, based on verbosity, whether a
// line is printed. Where lines go is abstracted behind `TraceSink` so the
// terminal spinner and tests can both receive them.

use crate::sync::{AlbumOutcome, LinkOutcome};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// How much per-item output to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Final summary only.
    Quiet,
    /// Album creation lines.
    #[default]
    Normal,
    /// Album lines plus one line per file.
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub albums_created: u64,
    pub media_linked: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} albums, {} media linked",
            self.albums_created, self.media_linked
        )
    }
}

/// Destination of trace lines.
pub trait TraceSink {
    fn line(&mut self, line: &str);

    /// Transient status (current folder); ignored by default.
    fn status(&mut self, _status: &str) {}
}

impl TraceSink for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

pub struct Reporter<S> {
    verbosity: Verbosity,
    stats: RunStats,
    sink: S,
}

impl<S: TraceSink> Reporter<S> {
    pub fn new(verbosity: Verbosity, sink: S) -> Self {
        Reporter {
            verbosity,
            stats: RunStats::default(),
            sink,
        }
    }

    pub fn folder(&mut self, album: &str) {
        info!(album, "processing folder");
        self.sink.status(album);
    }

    pub fn empty_folder(&mut self, album: &str) {
        if self.verbosity == Verbosity::Verbose {
            self.sink.line(&format!("  no media, skipped: {album}"));
        }
    }

    pub fn album(&mut self, album: &str, outcome: AlbumOutcome) {
        match (outcome, self.verbosity) {
            (AlbumOutcome::Created, Verbosity::Quiet) => {}
            (AlbumOutcome::Created, _) => self.sink.line(&format!("+ album {album}")),
            (AlbumOutcome::Exists, Verbosity::Verbose) => {
                self.sink.line(&format!("= album {album}"))
            }
            (AlbumOutcome::Exists, _) => {}
        }
        if outcome == AlbumOutcome::Created {
            self.stats.albums_created += 1;
        }
    }

    pub fn link(&mut self, album: &str, file: &str, outcome: LinkOutcome) {
        if outcome.is_new() {
            self.stats.media_linked += 1;
        }
        if self.verbosity == Verbosity::Verbose {
            let tag = match outcome {
                LinkOutcome::Linked => "linked",
                LinkOutcome::AlreadyLinked => "already linked",
                LinkOutcome::Conflict => "name taken",
                LinkOutcome::Forbidden => "exists, relink refused",
            };
            self.sink.line(&format!("  {file} -> {album} ({tag})"));
        }
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink and the final counters.
    pub fn finish(self) -> (RunStats, S) {
        (self.stats, self.sink)
    }
}
