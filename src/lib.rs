// Library root
// -----------
// Mirrors a folder tree in a Nextcloud-style WebDAV file store onto albums
// in the same server's photo module. The binary (`main.rs`) only parses the
// command line and wires these modules together.
//
// Module responsibilities:
// - `dav`: blocking WebDAV transport (PROPFIND, MKCOL, COPY).
// - `listing`: multi-status parsing into direct children.
// - `walker`: breadth-first folder traversal.
// - `naming`: folder -> album name policies.
// - `media`: extension allow-list.
// - `cancel`: interruption token.
// - `sync`: album creation and linking, status classification.
// - `report`: counters and trace output.
// - `config`: derived locators and run options.
// - `ui`: password prompt and spinner.
pub mod cancel;
pub mod config;
pub mod dav;
pub mod error;
pub mod listing;
pub mod media;
pub mod naming;
pub mod report;
pub mod sync;
pub mod ui;
pub mod walker;

pub use error::{Result, SyncError, Verb};
