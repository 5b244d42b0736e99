//! A small CLI that runs a request description through the example router
//! (spec §6d: "exit codes and CLI surface are not part of this core" — this
//! binary is a thin collaborator shell around it, not the core itself).

use std::{fs, io};

use clap::Parser as ClapParser;
use tracing::info;

use viaduct::demo::router;
use viaduct::request::RawHttpRequest;

/// Parse an HTTP request description against the example router and print
/// the resulting route.
#[derive(ClapParser, Debug)]
#[command(author, about)]
struct Args {
    /// HTTP method, e.g. GET or POST.
    #[arg(long, default_value = "GET")]
    method: String,

    /// Request path, e.g. /episodes/1.
    #[arg(long, default_value = "/")]
    path: String,

    /// Raw (still percent-encoded) query string, without the leading `?`.
    #[arg(long, default_value = "")]
    query: String,

    /// Read the request body from this file instead of sending an empty one.
    #[arg(long)]
    body_file: Option<String>,

    /// Increase log verbosity; repeatable.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Parse(viaduct::ParseError),
    Print(viaduct::PrintError),
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<viaduct::ParseError> for CliError {
    fn from(e: viaduct::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<viaduct::PrintError> for CliError {
    fn from(e: viaduct::PrintError) -> Self {
        CliError::Print(e)
    }
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    let body = match args.body_file {
        Some(path) => fs::read(path)?,
        None => Vec::new(),
    };

    let raw = RawHttpRequest {
        method: Some(args.method),
        path: args.path,
        query: args.query,
        headers: Vec::new(),
        body,
    };

    info!(?raw, "parsing request");

    let request = raw.into_request();
    let router = router();
    let (route, remaining) = viaduct::parse(&router, request)?;
    info!(?remaining, "unconsumed request slices after routing");
    println!("route: {route:?}");

    let reprinted = viaduct::print(&router, route)?;
    info!(?reprinted, "printed route back into a request");
    println!("round-tripped request: {reprinted:?}");

    Ok(())
}
