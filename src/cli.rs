use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "cronjob-tail")]
#[command(about = "Tail aggregated logs from all pods of a CronJob's jobs")]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// CronJob name
    pub name: String,

    /// Namespace (defaults to the current context namespace)
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Container name (if multi-container pod)
    #[arg(short = 'c', long)]
    pub container: Option<String>,

    /// Keep streaming logs instead of exiting at end of stream
    #[arg(short = 'f', long)]
    pub follow: bool,

    /// Ask the API server to prefix each line with a timestamp
    #[arg(long)]
    pub timestamps: bool,

    /// Maximum number of concurrent pod log streams (default: unbounded)
    #[arg(long)]
    pub max_streams: Option<usize>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}
