use clap::{Parser, command};

/// Static site server reporting the real status behind custom error pages
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file, `.yaml`/`.yml` or `.toml`
    #[arg(short, long)]
    pub configuration_path: Option<String>,
}
