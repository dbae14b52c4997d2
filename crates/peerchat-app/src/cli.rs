use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// CLI arguments for peerchat
#[derive(Parser)]
#[command(name = "peerchat")]
#[command(about = "Peerchat - terminal client for the peerchat messaging service")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Base URL of the chat service
    #[arg(
        long,
        value_name = "URL",
        default_value = "http://localhost:8000",
        env = "PEERCHAT_SERVER"
    )]
    pub server: String,

    /// Path to the persisted session token (default: ~/.peerchat/token)
    #[arg(long, value_name = "PATH", env = "PEERCHAT_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Enable verbose debug output (shows HTTP requests and responses)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,
}
