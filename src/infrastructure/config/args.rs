use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "votebooth",
    version,
    about = "A keyboard-driven terminal voting booth",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Directory holding the candidate roster and voter log records.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Ring the terminal bell when a vote is cast.
    #[arg(long)]
    pub bell: Option<bool>,

    /// Announce the next voter through a desktop notification.
    #[arg(long)]
    pub desktop_notifications: Option<bool>,

    /// Delay before the post-vote flow reset, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub reset_delay_ms: Option<u64>,

    /// Admin panel password.
    #[arg(long, env = "VOTEBOOTH_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}
