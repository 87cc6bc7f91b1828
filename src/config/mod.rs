#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "numerology-engine")]
#[command(about = "Date and name numerology calculator")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}
