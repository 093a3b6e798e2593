use crate::{
    core::{
        cli,
        configuration::{self, Configuration},
        logging,
    },
    net::http_adapter::HttpAdapter,
};
use clap::Parser;

const DEFAULT_CONFIGURATION_PATH: &str = "config.yaml";

/// Boots the application kernel: parses the command line, installs logging
/// and loads the configuration (`config.yaml` unless given).
/// ``` rust
/// let krn = kernel::boot().await?;
/// krn.setup_http_adapter().run().await?;
/// ```
pub async fn boot() -> Result<Kernel, Box<dyn std::error::Error + Send + Sync>> {
    let cli = cli::Cli::parse();

    logging::init();

    let path = cli
        .configuration_path
        .unwrap_or_else(|| DEFAULT_CONFIGURATION_PATH.to_string());
    let conf = configuration::load_configuration(&path).await?;
    tracing::info!("configuration loaded from {path}");

    Ok(Kernel::new(conf))
}

/// The application kernel, responsible for managing the application's lifecycle and providing access to its core components.
pub struct Kernel {
    configuration: Configuration,
}

impl Kernel {
    pub fn new(configuration: Configuration) -> Self {
        Self { configuration }
    }

    /// HTTP adapter serving the configured application behind the error page stages
    pub fn setup_http_adapter(&self) -> HttpAdapter<'_> {
        HttpAdapter::new(&self.configuration)
    }
}
