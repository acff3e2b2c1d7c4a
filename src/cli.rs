use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version = env!("APP_VERSION"), about, propagate_version = true)]
pub struct Args {
    /// YAML configuration file; default locations are searched when omitted.
    #[clap(long, short = 'c', env = "STROMVARSLER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch prices once, alert on LOW/HIGH hours, and exit.
    #[clap(name = "check")]
    Check,

    /// Serve the price API and chart over HTTP.
    #[clap(name = "serve")]
    Serve(ServeArgs),
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Bind address, overrides `web.host`.
    #[clap(long)]
    pub host: Option<String>,

    /// TCP port, overrides `web.port`.
    #[clap(long)]
    pub port: Option<u16>,
}
