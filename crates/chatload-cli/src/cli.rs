use std::path::PathBuf;

use chatload_config::ChatloadConfig;
use clap::{Parser, Subcommand};

/// chatload: drive concurrent simulated users against a streaming chat API.
#[derive(Parser, Debug)]
#[command(name = "chatload", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a load test and write the JSON summary.
    Run(Overrides),
    /// Print the resolved config as JSON (token redacted).
    ShowConfig(Overrides),
    /// Write a commented default config file.
    InitConfig {
        /// Destination; defaults to the platform config path.
        path: Option<PathBuf>,
    },
}

/// Flags that override the config file and environment.
#[derive(clap::Args, Debug, Default)]
pub struct Overrides {
    /// Base URL of the chat API (requests go to {base_url}/chat-messages).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Application identifier.
    #[arg(long)]
    pub app_id: Option<String>,

    /// Bearer token. Prefer CHATLOAD_API_TOKEN to keep it out of the process list.
    #[arg(long)]
    pub api_token: Option<String>,

    /// Number of concurrent virtual users.
    #[arg(short, long)]
    pub users: Option<u32>,

    /// Run length in seconds (0 = iterations only).
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Iterations per user (0 = duration only).
    #[arg(short, long)]
    pub iterations: Option<u64>,

    /// Spread user start over this many seconds.
    #[arg(long)]
    pub ramp_up: Option<u64>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Where to write the JSON summary.
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(&self, config: &mut ChatloadConfig) {
        if let Some(ref url) = self.base_url {
            config.target.base_url = url.clone();
        }
        if let Some(ref app_id) = self.app_id {
            config.target.app_id = app_id.clone();
        }
        if let Some(ref token) = self.api_token {
            config.target.api_token = token.clone();
        }
        if let Some(users) = self.users {
            config.load.users = users;
        }
        if let Some(duration) = self.duration {
            config.load.duration_secs = duration;
        }
        if let Some(iterations) = self.iterations {
            config.load.iterations = iterations;
        }
        if let Some(ramp_up) = self.ramp_up {
            config.load.ramp_up_secs = ramp_up;
        }
        if let Some(timeout) = self.timeout {
            config.load.request_timeout_secs = timeout;
        }
        if let Some(ref path) = self.summary {
            config.output.summary_path = path.clone();
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
