use std::path::PathBuf;

use clap::Parser;

use crate::cobalt::CobaltConfig;

#[derive(Parser, Debug)]
#[command(
    name = "cobalt-media-downloader",
    about = "Desktop front end for the cobalt media downloader"
)]
pub struct Cli {
    /// Command that launches cobalt, split on whitespace
    #[arg(long, env = "COBALT_COMMAND", default_value = "python -m cobalt.cli.main")]
    pub cobalt_command: CobaltConfig,

    /// Directory pre-filled in the advanced options
    #[arg(long, env = "COBALT_DOWNLOAD_DIR", default_value = "downloads")]
    pub download_dir: PathBuf,

    /// tracing filter directives
    #[arg(long, env = "RUST_LOG", default_value = "warn,cobalt_media_downloader=info")]
    pub log_filter: String,
}

/// Everything the window needs at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cobalt: CobaltConfig,
    pub download_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cobalt: CobaltConfig::default(),
            download_dir: PathBuf::from("downloads"),
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            cobalt: cli.cobalt_command,
            download_dir: cli.download_dir,
        }
    }
}
