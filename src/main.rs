mod app;
mod application;
mod cobalt;
mod config;
mod domain;
mod logging;
mod ui;
mod utils;

use clap::Parser;
use iced::{window, Size};

const ICON_SIZE: u32 = 64;

fn main() -> iced::Result {
    let cli = config::Cli::parse();
    logging::init_tracing(&cli.log_filter);

    let config = config::AppConfig::from(cli);
    tracing::info!(
        cobalt = %config.cobalt,
        download_dir = %config.download_dir.display(),
        "Starting Cobalt Media Downloader"
    );

    let icon = window::icon::from_rgba(
        ui::icon::app_icon(ICON_SIZE).into_raw(),
        ICON_SIZE,
        ICON_SIZE,
    )
    .inspect_err(|e| tracing::warn!(error = %e, "Failed to build window icon"))
    .ok();

    iced::application(
        move || app::DownloadApp::new(config.clone()),
        app::update,
        app::view,
    )
    .title("Cobalt Media Downloader")
    .window(window::Settings {
        icon,
        size: Size::new(720.0, 760.0),
        ..Default::default()
    })
    .run()
}
