// Entrypoint for the CLI application.
// - Keeps `main` small: resolve configuration, build the WebDAV client and
//   hand everything to the synchronizer.
// - Returns `anyhow::Result` so any fatal protocol error ends the process
//   with its locator and status in the message.

use anyhow::{Context, Result};
use clap::Parser;
use remote2albums::config::{Layout, SyncOptions};
use remote2albums::dav::HttpDav;
use remote2albums::media::MediaFilter;
use remote2albums::naming::Naming;
use remote2albums::report::{Reporter, Verbosity};
use remote2albums::sync::{CancelToken, Synchronizer};
use remote2albums::ui::{prompt_password, SpinnerSink};
use remote2albums::SyncError;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Exit status used when the run is interrupted (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

/// Create one photo album per folder below a remote path and link every
/// image and video into it, entirely server side.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the server, e.g. https://cloud.example.com
    #[arg(long, env = "REMOTE2ALBUMS_URL")]
    url: Url,

    #[arg(long, env = "REMOTE2ALBUMS_USER")]
    user: String,

    /// App password; prompted for when absent
    #[arg(long, env = "REMOTE2ALBUMS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Path below the user's files, e.g. InstantUpload/Pictures
    #[arg(long, env = "REMOTE2ALBUMS_REMOTE")]
    remote: String,

    /// Album naming policy
    #[arg(long, value_enum, default_value_t = Naming::Long)]
    naming: Naming,

    /// Additional media extension (repeatable)
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Also create albums for folders without media
    #[arg(long)]
    include_empty: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Only print the summary
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print one line per file
    #[arg(short, long)]
    verbose: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let layout = Layout::new(&args.url, &args.user, &args.remote)
        .context("Invalid server configuration")?;
    let password = match args.password {
        Some(password) => password,
        None => prompt_password(&args.user)?,
    };
    let dav = HttpDav::new(&args.user, &password, Duration::from_secs(args.timeout))?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Failed to install interrupt handler")?;

    let options = SyncOptions {
        naming: args.naming,
        media: MediaFilter::with_extra(&args.extensions),
        include_empty: args.include_empty,
    };
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    let mut reporter = Reporter::new(verbosity, SpinnerSink::new(verbosity));

    let result = Synchronizer::new(&dav, &layout, &options, cancel).run(&mut reporter);
    let (_, sink) = reporter.finish();
    sink.finish();

    let stats = match result {
        Ok(stats) => stats,
        Err(SyncError::Interrupted) => {
            eprintln!("Aborted by user.");
            std::process::exit(EXIT_INTERRUPTED);
        }
        Err(e) => return Err(e).context("Synchronization aborted"),
    };

    if args.json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        println!("{stats}");
    }
    Ok(())
}
