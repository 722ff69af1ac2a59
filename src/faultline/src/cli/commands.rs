use clap::{Parser, Subcommand};

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "faultline",
    about = "Reports unhandled server errors to a chat webhook",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Path to a TOML config file (falls back to FAULTLINE_CONFIG)
    #[clap(long, global = true)]
    pub config: Option<String>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP daemon
    Serve,

    /// Render a format request (JSON file, or `-` for stdin) as a report
    Format { input: String },

    /// Shows the current version
    Version,
}
